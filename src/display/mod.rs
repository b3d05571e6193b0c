//! Display formatting for terminal output
//!
//! Formatters return strings; command handlers decide where they go.

pub mod account;
pub mod transaction;
