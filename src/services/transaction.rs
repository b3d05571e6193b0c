//! Transaction filter
//!
//! Builds the inclusive date window from command-line input and fetches the
//! account's transactions through the session.

use chrono::NaiveDate;

use crate::error::ActualResult;
use crate::models::{AccountId, DateWindow, Transaction};
use crate::session::BudgetSession;

/// How the user asked for a date window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowSpec {
    /// Explicit `YYYY-MM-DD` endpoints
    Explicit { start: String, end: String },
    /// The last N days up to today
    LastDays(u32),
}

impl WindowSpec {
    /// Turn the request into a concrete window, `today` anchoring `LastDays`
    pub fn resolve(&self, today: NaiveDate) -> ActualResult<DateWindow> {
        match self {
            Self::Explicit { start, end } => DateWindow::parse(start, end),
            Self::LastDays(days) => DateWindow::last_days(*days, today),
        }
    }
}

/// Service for reading transactions
pub struct TransactionService<'a> {
    session: &'a dyn BudgetSession,
}

impl<'a> TransactionService<'a> {
    pub fn new(session: &'a dyn BudgetSession) -> Self {
        Self { session }
    }

    /// Transactions of `account` dated inside `window`, in session order
    pub fn fetch(&self, account: &AccountId, window: &DateWindow) -> ActualResult<Vec<Transaction>> {
        let transactions = self.session.list_transactions(account, window)?;
        log::debug!(
            "fetched {} transactions for {} in {}",
            transactions.len(),
            account,
            window
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActualError;
    use crate::models::{Account, BudgetSnapshot, Money};
    use crate::session::MemorySession;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_explicit_window() {
        let spec = WindowSpec::Explicit {
            start: "2024-10-01".into(),
            end: "2024-10-31".into(),
        };
        let window = spec.resolve(date(2030, 1, 1)).unwrap();
        assert_eq!(window.start(), date(2024, 10, 1));
        assert_eq!(window.end(), date(2024, 10, 31));
    }

    #[test]
    fn test_explicit_window_reversed() {
        let spec = WindowSpec::Explicit {
            start: "2023-01-02".into(),
            end: "2023-01-01".into(),
        };
        assert!(matches!(
            spec.resolve(date(2030, 1, 1)),
            Err(ActualError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_last_days_window() {
        let window = WindowSpec::LastDays(7).resolve(date(2024, 10, 19)).unwrap();
        assert_eq!(window.start(), date(2024, 10, 12));
        assert_eq!(window.end(), date(2024, 10, 19));
    }

    #[test]
    fn test_fetch_includes_endpoints() {
        let mut snapshot = BudgetSnapshot::new("s");
        snapshot.accounts.push(Account::new("1", "Checking"));
        for day in [1, 2, 3, 4] {
            snapshot.transactions.push(Transaction::new(
                "1",
                date(2024, 10, day),
                Money::from_cents(-(day as i64)),
            ));
        }
        let session = MemorySession::loaded(snapshot);
        let window = DateWindow::new(date(2024, 10, 2), date(2024, 10, 3)).unwrap();

        let found = TransactionService::new(&session)
            .fetch(&AccountId::from("1"), &window)
            .unwrap();
        let days: Vec<_> = found.iter().map(|t| t.date).collect();
        assert_eq!(days, vec![date(2024, 10, 3), date(2024, 10, 2)]);
    }
}
