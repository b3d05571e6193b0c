//! actual-tools - bulk maintenance for Actual budget transactions
//!
//! This library backs the `actual-tools` command: it resolves an account,
//! selects its transactions in a date window, and rewrites their notes
//! under one policy, splits a single transaction into two children, or
//! exports the budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, credentials and the session configuration value
//! - `error`: Custom error types
//! - `models`: Accounts, transactions, money, date windows, note policies
//! - `session`: The budget session capability and its implementations
//! - `services`: Account resolution, filtering, note rewriting, splits
//! - `storage`: JSON file helpers for the local budget cache
//! - `display`: Terminal formatting
//! - `export`: JSON and CSV export
//! - `cli`: Argument validation and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use actual_tools::config::{ActualPaths, Credentials, SessionConfig};
//! use actual_tools::session::{BudgetSession, LocalSession};
//!
//! let paths = ActualPaths::new()?;
//! let credentials = Credentials::load(&paths.credentials_file())?;
//! let config = SessionConfig::new(&paths, &credentials);
//!
//! let mut session = LocalSession::new();
//! session.init_session(&config)?;
//! session.download_budget(&config.sync_id, config.encryption_password())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{ActualError, ActualResult};
