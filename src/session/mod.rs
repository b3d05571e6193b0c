//! Budget session capability
//!
//! The budgeting client (sync, download, decryption, storage) sits behind
//! the narrow [`BudgetSession`] trait so the workflows can run against an
//! in-memory fake as well as the local budget cache.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut session = LocalSession::new();
//! session.init_session(&config)?;
//! session.download_budget(&config.sync_id, config.encryption_password())?;
//! let accounts = session.list_accounts()?;
//! batch_updates(&mut session, |s| s.update_transaction(&id, &update))?;
//! session.close_session()?;
//! ```

pub mod local;
pub mod memory;

pub use local::LocalSession;
pub use memory::MemorySession;

use crate::config::SessionConfig;
use crate::error::ActualResult;
use crate::models::{
    Account, AccountId, BudgetSnapshot, DateWindow, Money, Transaction, TransactionId,
    TransactionUpdate,
};

/// Operations the workflows need from the budgeting client
///
/// Calls are blocking and issued one at a time, in order.
pub trait BudgetSession {
    /// Prepare the local cache and remember the server to talk to
    fn init_session(&mut self, config: &SessionConfig) -> ActualResult<()>;

    /// Load the budget identified by `sync_id`
    fn download_budget(
        &mut self,
        sync_id: &str,
        encryption_password: Option<&str>,
    ) -> ActualResult<()>;

    fn list_accounts(&self) -> ActualResult<Vec<Account>>;

    /// Top-level transactions of `account` dated inside `window`
    ///
    /// Split children are nested under their parent's `subtransactions`.
    fn list_transactions(
        &self,
        account: &AccountId,
        window: &DateWindow,
    ) -> ActualResult<Vec<Transaction>>;

    /// Sum of every top-level transaction in `account`
    fn account_balance(&self, account: &AccountId) -> ActualResult<Money>;

    /// Submit a partial update for one transaction
    fn update_transaction(
        &mut self,
        id: &TransactionId,
        update: &TransactionUpdate,
    ) -> ActualResult<()>;

    /// Start grouping updates; nothing is committed until `commit_batch`
    fn begin_batch(&mut self) -> ActualResult<()>;

    fn commit_batch(&mut self) -> ActualResult<()>;

    /// Discard every update since `begin_batch`
    fn rollback_batch(&mut self);

    /// The whole loaded budget
    fn export_budget(&self) -> ActualResult<BudgetSnapshot>;

    fn close_session(&mut self) -> ActualResult<()>;
}

/// Run `f` inside one batch: commit if it succeeds, roll back if it fails
pub fn batch_updates<T, F>(session: &mut dyn BudgetSession, f: F) -> ActualResult<T>
where
    F: FnOnce(&mut dyn BudgetSession) -> ActualResult<T>,
{
    session.begin_batch()?;
    match f(&mut *session) {
        Ok(value) => match session.commit_batch() {
            Ok(()) => Ok(value),
            Err(err) => {
                session.rollback_batch();
                Err(err)
            }
        },
        Err(err) => {
            log::warn!("rolling back batch: {}", err);
            session.rollback_batch();
            Err(err)
        }
    }
}
