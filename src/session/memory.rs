//! In-memory budget session
//!
//! Holds a whole [`BudgetSnapshot`] in memory. Used directly by tests and as
//! the working copy behind [`super::LocalSession`]. Counts every update call
//! and can be told to fail updates for chosen transactions.

use std::collections::HashSet;

use crate::config::SessionConfig;
use crate::error::{ActualError, ActualResult};
use crate::models::{
    Account, AccountId, BudgetSnapshot, DateWindow, Money, Transaction, TransactionId,
    TransactionUpdate,
};

use super::BudgetSession;

/// Budget session backed by an in-memory snapshot
#[derive(Debug, Default)]
pub struct MemorySession {
    snapshot: BudgetSnapshot,
    loaded: bool,
    /// Copy taken at `begin_batch`, restored on rollback
    checkpoint: Option<BudgetSnapshot>,
    update_calls: usize,
    fail_on: HashSet<TransactionId>,
}

impl MemorySession {
    /// Session that will serve `snapshot` once downloaded
    pub fn new(snapshot: BudgetSnapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    /// Session with `snapshot` already downloaded
    pub fn loaded(snapshot: BudgetSnapshot) -> Self {
        Self {
            snapshot,
            loaded: true,
            ..Self::default()
        }
    }

    /// Make every update of `id` fail
    pub fn fail_updates_for(&mut self, id: impl Into<TransactionId>) {
        self.fail_on.insert(id.into());
    }

    /// Number of `update_transaction` calls received, failed ones included
    pub fn update_calls(&self) -> usize {
        self.update_calls
    }

    /// Current state, including uncommitted batch updates
    pub fn snapshot(&self) -> &BudgetSnapshot {
        &self.snapshot
    }

    pub fn in_batch(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Find a transaction by id, looking inside split parents too
    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.snapshot.transactions.iter().find_map(|t| {
            if &t.id == id {
                Some(t)
            } else {
                t.subtransactions
                    .as_ref()
                    .and_then(|children| children.iter().find(|c| &c.id == id))
            }
        })
    }

    fn find_mut(&mut self, id: &TransactionId) -> Option<&mut Transaction> {
        self.snapshot.transactions.iter_mut().find_map(|t| {
            if &t.id == id {
                Some(t)
            } else {
                t.subtransactions
                    .as_mut()
                    .and_then(|children| children.iter_mut().find(|c| &c.id == id))
            }
        })
    }

    fn ensure_loaded(&self) -> ActualResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(ActualError::Session("No budget loaded".into()))
        }
    }
}

impl BudgetSession for MemorySession {
    fn init_session(&mut self, config: &SessionConfig) -> ActualResult<()> {
        log::debug!("memory session for {}", config.server_url);
        Ok(())
    }

    fn download_budget(
        &mut self,
        sync_id: &str,
        _encryption_password: Option<&str>,
    ) -> ActualResult<()> {
        if !self.snapshot.sync_id.is_empty() && self.snapshot.sync_id != sync_id {
            return Err(ActualError::Session(format!(
                "Budget {} not found",
                sync_id
            )));
        }
        self.loaded = true;
        Ok(())
    }

    fn list_accounts(&self) -> ActualResult<Vec<Account>> {
        self.ensure_loaded()?;
        Ok(self.snapshot.accounts.clone())
    }

    fn list_transactions(
        &self,
        account: &AccountId,
        window: &DateWindow,
    ) -> ActualResult<Vec<Transaction>> {
        self.ensure_loaded()?;
        let mut transactions: Vec<Transaction> = self
            .snapshot
            .transactions_for(account)
            .filter(|t| !t.is_child && window.contains(t.date))
            .cloned()
            .collect();
        // Newest first, stable for equal dates
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    fn account_balance(&self, account: &AccountId) -> ActualResult<Money> {
        self.ensure_loaded()?;
        let amounts = self
            .snapshot
            .transactions_for(account)
            .filter(|t| !t.is_child)
            .map(|t| t.amount);
        Money::checked_sum(amounts).ok_or_else(|| {
            ActualError::Storage(format!("Balance of account {} overflows", account))
        })
    }

    fn update_transaction(
        &mut self,
        id: &TransactionId,
        update: &TransactionUpdate,
    ) -> ActualResult<()> {
        self.ensure_loaded()?;
        self.update_calls += 1;

        if self.fail_on.contains(id) {
            return Err(ActualError::Session(format!(
                "Server rejected update of {}",
                id
            )));
        }

        let txn = self
            .find_mut(id)
            .ok_or_else(|| ActualError::transaction_not_found(id.to_string()))?;
        txn.apply(update);
        Ok(())
    }

    fn begin_batch(&mut self) -> ActualResult<()> {
        self.ensure_loaded()?;
        if self.checkpoint.is_some() {
            return Err(ActualError::Session("A batch is already open".into()));
        }
        self.checkpoint = Some(self.snapshot.clone());
        Ok(())
    }

    fn commit_batch(&mut self) -> ActualResult<()> {
        match self.checkpoint.take() {
            Some(_) => Ok(()),
            None => Err(ActualError::Session("No batch to commit".into())),
        }
    }

    fn rollback_batch(&mut self) {
        if let Some(checkpoint) = self.checkpoint.take() {
            self.snapshot = checkpoint;
        }
    }

    fn export_budget(&self) -> ActualResult<BudgetSnapshot> {
        self.ensure_loaded()?;
        Ok(self.snapshot.clone())
    }

    fn close_session(&mut self) -> ActualResult<()> {
        if self.checkpoint.is_some() {
            log::warn!("closing session with an open batch; discarding it");
            self.rollback_batch();
        }
        self.loaded = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::batch_updates;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn txn(id: &str, account: &str, day: u32, cents: i64) -> Transaction {
        let mut t = Transaction::new(account, date(day), Money::from_cents(cents));
        t.id = TransactionId::from(id);
        t
    }

    fn budget() -> BudgetSnapshot {
        let mut snapshot = BudgetSnapshot::new("sync-1");
        snapshot.accounts = vec![Account::new("1", "Checking"), Account::new("2", "Savings")];
        snapshot.transactions = vec![
            txn("a", "1", 1, -100),
            txn("b", "1", 3, -200),
            txn("c", "1", 5, -300),
            txn("d", "2", 3, 1000),
        ];
        snapshot
    }

    #[test]
    fn test_requires_download() {
        let mut session = MemorySession::new(budget());
        assert!(session.list_accounts().is_err());
        assert!(session.download_budget("other", None).is_err());
        session.download_budget("sync-1", None).unwrap();
        assert_eq!(session.list_accounts().unwrap().len(), 2);
    }

    #[test]
    fn test_list_transactions_window_inclusive() {
        let session = MemorySession::loaded(budget());
        let window = DateWindow::new(date(1), date(3)).unwrap();
        let found = session
            .list_transactions(&AccountId::from("1"), &window)
            .unwrap();
        let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_account_balance() {
        let session = MemorySession::loaded(budget());
        assert_eq!(
            session.account_balance(&AccountId::from("1")).unwrap(),
            Money::from_cents(-600)
        );
    }

    #[test]
    fn test_account_balance_overflow_is_error() {
        let mut snapshot = budget();
        snapshot.transactions.push(txn("big", "2", 4, i64::MAX));
        let session = MemorySession::loaded(snapshot);

        let err = session.account_balance(&AccountId::from("2")).unwrap_err();
        assert!(matches!(err, ActualError::Storage(_)));
        assert!(session.account_balance(&AccountId::from("1")).is_ok());
    }

    #[test]
    fn test_update_unknown_transaction() {
        let mut session = MemorySession::loaded(budget());
        let err = session
            .update_transaction(&"zzz".into(), &TransactionUpdate::notes("x"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.update_calls(), 1);
    }

    #[test]
    fn test_batch_commits() {
        let mut session = MemorySession::loaded(budget());
        batch_updates(&mut session, |s| {
            s.update_transaction(&"a".into(), &TransactionUpdate::notes("one"))?;
            s.update_transaction(&"b".into(), &TransactionUpdate::notes("two"))
        })
        .unwrap();

        assert!(!session.in_batch());
        assert_eq!(session.find(&"a".into()).unwrap().notes.as_deref(), Some("one"));
        assert_eq!(session.find(&"b".into()).unwrap().notes.as_deref(), Some("two"));
    }

    #[test]
    fn test_batch_rolls_back_on_failure() {
        let mut session = MemorySession::loaded(budget());
        session.fail_updates_for("b");

        let result = batch_updates(&mut session, |s| {
            s.update_transaction(&"a".into(), &TransactionUpdate::notes("one"))?;
            s.update_transaction(&"b".into(), &TransactionUpdate::notes("two"))
        });

        assert!(result.is_err());
        assert_eq!(session.find(&"a".into()).unwrap().notes, None);
        assert!(!session.in_batch());
    }

    #[test]
    fn test_children_nested_and_hidden() {
        let mut session = MemorySession::loaded(budget());
        let parent = session.find(&"c".into()).unwrap().clone();
        let children = vec![
            parent.child(Money::from_cents(-100)),
            parent.child(Money::from_cents(-200)),
        ];
        let child_id = children[0].id.clone();
        session
            .update_transaction(&"c".into(), &TransactionUpdate::split(children))
            .unwrap();

        let listed = session
            .list_transactions(&AccountId::from("1"), &DateWindow::all_time())
            .unwrap();
        assert_eq!(listed.len(), 3);
        assert!(session.find(&child_id).is_some());
        assert_eq!(
            session.account_balance(&AccountId::from("1")).unwrap(),
            Money::from_cents(-600)
        );
    }

    #[test]
    fn test_close_discards_open_batch() {
        let mut session = MemorySession::loaded(budget());
        session.begin_batch().unwrap();
        session
            .update_transaction(&"a".into(), &TransactionUpdate::notes("x"))
            .unwrap();
        session.close_session().unwrap();
        assert_eq!(session.snapshot().transactions[0].notes, None);
    }
}
