//! Account model
//!
//! Accounts are owned by the budget session; this crate only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;

/// A budget account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque identifier assigned by the budgeting server
    pub id: AccountId,

    /// Display name (e.g., "Mechanics Bank")
    pub name: String,

    /// Whether this account is tracked off-budget
    #[serde(default)]
    pub offbudget: bool,

    /// Whether this account has been closed
    #[serde(default)]
    pub closed: bool,
}

impl Account {
    /// Create an open, on-budget account
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            offbudget: false,
            closed: false,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
