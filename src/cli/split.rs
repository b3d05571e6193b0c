//! `split` command

use std::io;

use chrono::NaiveDate;
use clap::Args;

use crate::error::ActualResult;
use crate::models::DateWindow;
use crate::services::{plan_split, AccountService, SplitRequest, SplitService, TransactionService};
use crate::session::BudgetSession;

use super::args::{parse_money, AccountArg, Issues, WindowArgs};

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub account: AccountArg,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Payee the transaction must carry
    #[arg(long)]
    pub payee: String,

    /// Amount the transaction must have (e.g. "-35.00")
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// Amount of the first child; the second gets the rest
    #[arg(long, allow_hyphen_values = true)]
    pub first: String,

    /// Report the split without submitting it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Validated `split` invocation
#[derive(Debug, Clone)]
pub struct SplitJob {
    pub account: String,
    pub window: DateWindow,
    pub request: SplitRequest,
    pub dry_run: bool,
}

impl SplitArgs {
    pub fn validate(&self, today: NaiveDate) -> ActualResult<SplitJob> {
        let mut issues = Issues::new();
        let account = self.account.validate(&mut issues);
        let window = self.window.validate(today, &mut issues);

        if self.payee.trim().is_empty() {
            issues.push("payee: must not be empty");
        }
        let amount = parse_money("amount", &self.amount, &mut issues);
        let first = parse_money("first", &self.first, &mut issues);
        if let Some(first) = first {
            if first.is_zero() {
                issues.push("first: must not be zero");
            }
        }

        let job = match (account, window, amount, first) {
            (Some(account), Some(window), Some(amount), Some(first)) => Some(SplitJob {
                account,
                window,
                request: SplitRequest {
                    expected_payee: self.payee.clone(),
                    expected_amount: amount,
                    first,
                },
                dry_run: self.dry_run,
            }),
            _ => None,
        };
        issues.finish(job)
    }
}

/// Find the one transaction, check it, and split it
pub fn handle_split_command(session: &mut dyn BudgetSession, job: &SplitJob) -> ActualResult<()> {
    let account = AccountService::new(&*session).resolve(&job.account)?;
    let matches = TransactionService::new(&*session).fetch(&account.id, &job.window)?;
    let plan = plan_split(&matches, &job.window, &job.request)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    SplitService::new(session).apply(&plan, job.dry_run, &mut out)?;
    Ok(())
}
