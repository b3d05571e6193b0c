//! `accounts` command

use crate::display::account::format_account_list;
use crate::error::ActualResult;
use crate::services::AccountService;
use crate::session::BudgetSession;

/// List every account with its balance
pub fn handle_accounts_command(session: &dyn BudgetSession) -> ActualResult<()> {
    let summaries = AccountService::new(session).list_with_balances()?;
    print!("{}", format_account_list(&summaries));
    Ok(())
}
