//! Configuration module for actual-tools
//!
//! - Path resolution for the credentials file and cache directory
//! - Credentials loading
//! - The explicit session configuration built from both

pub mod credentials;
pub mod paths;
pub mod session;

pub use credentials::{Credentials, ServerCredentials};
pub use paths::ActualPaths;
pub use session::SessionConfig;
