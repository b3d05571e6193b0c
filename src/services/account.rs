//! Account service
//!
//! Resolves a user-supplied identifier to an account and lists accounts with
//! their balances.

use std::collections::HashMap;

use crate::error::{ActualError, ActualResult};
use crate::models::{Account, Money};
use crate::session::BudgetSession;

/// Service for account lookup
pub struct AccountService<'a> {
    session: &'a dyn BudgetSession,
}

/// An account with its computed balance
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    pub balance: Money,
}

impl<'a> AccountService<'a> {
    pub fn new(session: &'a dyn BudgetSession) -> Self {
        Self { session }
    }

    /// Find the account whose id or name equals `identifier`
    pub fn resolve(&self, identifier: &str) -> ActualResult<Account> {
        let accounts = self.session.list_accounts()?;
        resolve_account(&accounts, identifier)
    }

    /// Every account with its balance, in session order
    pub fn list_with_balances(&self) -> ActualResult<Vec<AccountSummary>> {
        let accounts = self.session.list_accounts()?;
        let mut summaries = Vec::with_capacity(accounts.len());

        for account in accounts {
            let balance = self.session.account_balance(&account.id)?;
            summaries.push(AccountSummary { account, balance });
        }

        Ok(summaries)
    }
}

/// Look `identifier` up by id first, then by display name
///
/// # Errors
///
/// `ActualError::NotFound` listing every known display name when neither
/// matches.
pub fn resolve_account(accounts: &[Account], identifier: &str) -> ActualResult<Account> {
    let by_id: HashMap<&str, &Account> = accounts.iter().map(|a| (a.id.as_str(), a)).collect();
    if let Some(account) = by_id.get(identifier) {
        return Ok((*account).clone());
    }

    let by_name: HashMap<&str, &Account> = accounts.iter().map(|a| (a.name.as_str(), a)).collect();
    if let Some(account) = by_name.get(identifier) {
        return Ok((*account).clone());
    }

    let known = accounts.iter().map(|a| a.name.clone()).collect();
    Err(ActualError::account_not_found(identifier, known))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetSnapshot, Transaction};
    use crate::session::MemorySession;
    use chrono::NaiveDate;

    fn accounts() -> Vec<Account> {
        vec![Account::new("1", "Checking")]
    }

    #[test]
    fn test_resolve_by_name() {
        let account = resolve_account(&accounts(), "Checking").unwrap();
        assert_eq!(account.id.as_str(), "1");
    }

    #[test]
    fn test_resolve_by_id() {
        let account = resolve_account(&accounts(), "1").unwrap();
        assert_eq!(account.name, "Checking");
    }

    #[test]
    fn test_resolve_miss_lists_names() {
        let err = resolve_account(&accounts(), "Savings").unwrap_err();
        match err {
            ActualError::NotFound {
                identifier, known, ..
            } => {
                assert_eq!(identifier, "Savings");
                assert_eq!(known, vec!["Checking".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_id_wins_over_name() {
        // An account literally named like another account's id
        let accounts = vec![Account::new("1", "Checking"), Account::new("2", "1")];
        let account = resolve_account(&accounts, "1").unwrap();
        assert_eq!(account.name, "Checking");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert!(resolve_account(&accounts(), "checking").is_err());
    }

    #[test]
    fn test_resolve_empty_list() {
        let err = resolve_account(&[], "Checking").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_with_balances() {
        let mut snapshot = BudgetSnapshot::new("s");
        snapshot.accounts = vec![Account::new("1", "Checking"), Account::new("2", "Savings")];
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        snapshot
            .transactions
            .push(Transaction::new("1", date, Money::from_cents(-250)));
        snapshot
            .transactions
            .push(Transaction::new("1", date, Money::from_cents(1000)));
        let session = MemorySession::loaded(snapshot);

        let summaries = AccountService::new(&session).list_with_balances().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].balance, Money::from_cents(750));
        assert_eq!(summaries[1].balance, Money::zero());
    }
}
