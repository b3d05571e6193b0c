//! `transactions` command

use chrono::NaiveDate;
use clap::Args;

use crate::display::transaction::{format_transaction_full, format_transaction_register};
use crate::error::ActualResult;
use crate::models::DateWindow;
use crate::services::{AccountService, TransactionService};
use crate::session::BudgetSession;

use super::args::{AccountArg, Issues, WindowArgs};

#[derive(Args, Debug)]
pub struct TransactionArgs {
    #[command(flatten)]
    pub account: AccountArg,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Print every transaction verbatim as JSON
    #[arg(long)]
    pub full: bool,
}

/// Validated `transactions` invocation
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub account: String,
    pub window: DateWindow,
    pub full: bool,
}

impl TransactionArgs {
    pub fn validate(&self, today: NaiveDate) -> ActualResult<TransactionQuery> {
        let mut issues = Issues::new();
        let account = self.account.validate(&mut issues);
        let window = self.window.validate(today, &mut issues);

        let query = account.zip(window).map(|(account, window)| TransactionQuery {
            account,
            window,
            full: self.full,
        });
        issues.finish(query)
    }
}

/// Print the account's transactions inside the window
pub fn handle_transactions_command(
    session: &dyn BudgetSession,
    query: &TransactionQuery,
) -> ActualResult<()> {
    let account = AccountService::new(session).resolve(&query.account)?;
    let transactions = TransactionService::new(session).fetch(&account.id, &query.window)?;

    println!("{}  {}", account, query.window);
    if query.full {
        for txn in &transactions {
            println!("{}", format_transaction_full(txn));
        }
    } else {
        print!("{}", format_transaction_register(&transactions));
    }
    Ok(())
}
