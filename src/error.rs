//! Custom error types for actual-tools
//!
//! Every failure is terminal for the current run. The variants carry enough
//! context for the user to correct the invocation and re-run.

use thiserror::Error;

use crate::models::Money;

/// The main error type for actual-tools operations
#[derive(Error, Debug)]
pub enum ActualError {
    /// Bad or missing credentials file
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bad command-line input, one message per issue
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Date window with start after end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// Lookup miss
    #[error("{entity_type} not found: {identifier}{}", known_suffix(.known))]
    NotFound {
        entity_type: &'static str,
        identifier: String,
        known: Vec<String>,
    },

    /// More than one transaction where exactly one was required
    #[error("Too many matching transactions: expected 1, found {count}")]
    AmbiguousMatch { count: usize },

    /// No transaction where exactly one was required
    #[error("No matching transaction in {start}..={end}")]
    NoMatch { start: String, end: String },

    /// The single match is not the record the caller expected
    #[error("Wrong transaction {id}: expected '{expected_payee}' {expected_amount}, found '{found_payee}' {found_amount}")]
    UnexpectedTransaction {
        id: String,
        expected_payee: String,
        expected_amount: Money,
        found_payee: String,
        found_amount: Money,
    },

    /// Transaction already has subtransactions
    #[error("Transaction {id} is already split into {children} subtransactions")]
    AlreadySplit { id: String, children: usize },

    /// Remote mutation failure; the rest of the batch is abandoned
    #[error("Failed to update transaction {transaction_id}: {cause}")]
    UpdateFailed {
        transaction_id: String,
        cause: String,
    },

    /// Budget session errors (init, download, lookup)
    #[error("Session error: {0}")]
    Session(String),

    /// Local budget file errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn known_suffix(known: &[String]) -> String {
    if known.is_empty() {
        String::new()
    } else {
        format!(", try one of: {}", known.join(", "))
    }
}

impl ActualError {
    /// Create a "not found" error for accounts, listing the names the user can retry with
    pub fn account_not_found(identifier: impl Into<String>, known: Vec<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
            known,
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
            known: Vec::new(),
        }
    }

    /// Create a validation error from a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from bad user input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidRange { .. })
    }

    /// Lines to print on stderr, one per issue
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Self::Validation(issues) => issues.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<std::io::Error> for ActualError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ActualError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for actual-tools operations
pub type ActualResult<T> = Result<T, ActualError>;
