//! Budget session over the local cache directory
//!
//! The budget downloaded for a sync id lives at
//! `<data_dir>/<sync_id>/budget.json`. Reads come from an in-memory working
//! copy. An update outside a batch is written through at once; a batch is
//! written once, atomically, on commit, and never reaches disk if rolled
//! back.

use std::path::{Path, PathBuf};

use crate::config::SessionConfig;
use crate::error::{ActualError, ActualResult};
use crate::models::{
    Account, AccountId, BudgetSnapshot, DateWindow, Money, Transaction, TransactionId,
    TransactionUpdate,
};
use crate::storage::{read_json_required, write_json_atomic};

use super::{BudgetSession, MemorySession};

/// File name of a downloaded budget inside its sync id directory
pub const BUDGET_FILE: &str = "budget.json";

/// Budget session reading and writing the local budget cache
#[derive(Debug, Default)]
pub struct LocalSession {
    data_dir: Option<PathBuf>,
    server_url: String,
    budget_path: Option<PathBuf>,
    working: MemorySession,
}

impl LocalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the budget file for `sync_id` under `data_dir`
    pub fn budget_path(data_dir: &Path, sync_id: &str) -> PathBuf {
        data_dir.join(sync_id).join(BUDGET_FILE)
    }

    fn persist(&self) -> ActualResult<()> {
        let path = self
            .budget_path
            .as_ref()
            .ok_or_else(|| ActualError::Session("No budget loaded".into()))?;
        write_json_atomic(path, self.working.snapshot())?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

impl BudgetSession for LocalSession {
    fn init_session(&mut self, config: &SessionConfig) -> ActualResult<()> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            ActualError::Session(format!(
                "Failed to prepare data directory {}: {}",
                config.data_dir.display(),
                e
            ))
        })?;
        self.data_dir = Some(config.data_dir.clone());
        self.server_url = config.server_url.clone();
        log::info!(
            "session initialized for {} at {}",
            self.server_url,
            config.data_dir.display()
        );
        Ok(())
    }

    fn download_budget(
        &mut self,
        sync_id: &str,
        encryption_password: Option<&str>,
    ) -> ActualResult<()> {
        let data_dir = self
            .data_dir
            .as_ref()
            .ok_or_else(|| ActualError::Session("Session not initialized".into()))?;
        let path = Self::budget_path(data_dir, sync_id);
        if !path.exists() {
            return Err(ActualError::Session(format!(
                "Budget {} not found in cache: {}",
                sync_id,
                path.display()
            )));
        }

        let mut snapshot: BudgetSnapshot = read_json_required(&path)?;
        if snapshot.sync_id.is_empty() {
            snapshot.sync_id = sync_id.to_string();
        } else if snapshot.sync_id != sync_id {
            return Err(ActualError::Session(format!(
                "{} holds budget {}, expected {}",
                path.display(),
                snapshot.sync_id,
                sync_id
            )));
        }
        log::info!(
            "loaded budget {} ({} accounts, {} transactions, encrypted: {})",
            sync_id,
            snapshot.accounts.len(),
            snapshot.transactions.len(),
            encryption_password.is_some()
        );

        self.working = MemorySession::loaded(snapshot);
        self.budget_path = Some(path);
        Ok(())
    }

    fn list_accounts(&self) -> ActualResult<Vec<Account>> {
        self.working.list_accounts()
    }

    fn list_transactions(
        &self,
        account: &AccountId,
        window: &DateWindow,
    ) -> ActualResult<Vec<Transaction>> {
        self.working.list_transactions(account, window)
    }

    fn account_balance(&self, account: &AccountId) -> ActualResult<Money> {
        self.working.account_balance(account)
    }

    fn update_transaction(
        &mut self,
        id: &TransactionId,
        update: &TransactionUpdate,
    ) -> ActualResult<()> {
        if self.working.in_batch() {
            return self.working.update_transaction(id, update);
        }

        // Outside a batch the working copy only keeps the change once it is on disk
        self.working.begin_batch()?;
        let written = self
            .working
            .update_transaction(id, update)
            .and_then(|()| self.persist());
        match written {
            Ok(()) => self.working.commit_batch(),
            Err(err) => {
                self.working.rollback_batch();
                Err(err)
            }
        }
    }

    fn begin_batch(&mut self) -> ActualResult<()> {
        self.working.begin_batch()
    }

    fn commit_batch(&mut self) -> ActualResult<()> {
        if !self.working.in_batch() {
            return Err(ActualError::Session("No batch to commit".into()));
        }
        // Write first so a failed write leaves the batch open for rollback
        self.persist()?;
        self.working.commit_batch()
    }

    fn rollback_batch(&mut self) {
        self.working.rollback_batch();
    }

    fn export_budget(&self) -> ActualResult<BudgetSnapshot> {
        self.working.export_budget()
    }

    fn close_session(&mut self) -> ActualResult<()> {
        self.working.close_session()?;
        self.budget_path = None;
        log::debug!("session closed");
        Ok(())
    }
}
