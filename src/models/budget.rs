//! Budget snapshot
//!
//! The whole downloaded budget as one serializable value. Used as the export
//! format and as the on-disk shape of the local session.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::ids::AccountId;
use super::transaction::Transaction;

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Accounts and top-level transactions of one budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Sync id of the budget this snapshot came from
    #[serde(default)]
    pub sync_id: String,

    #[serde(default)]
    pub accounts: Vec<Account>,

    /// Top-level transactions; split children live under their parent
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl BudgetSnapshot {
    pub fn new(sync_id: impl Into<String>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            sync_id: sync_id.into(),
            accounts: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Transactions belonging to `account`, in snapshot order
    pub fn transactions_for<'a>(
        &'a self,
        account: &'a AccountId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |t| &t.account == account)
    }
}
