//! Account display formatting

use crate::services::AccountSummary;

/// Format the account list with balances
pub fn format_account_list(summaries: &[AccountSummary]) -> String {
    if summaries.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = summaries
        .iter()
        .map(|s| s.account.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Account".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:name_width$}  {:>14}  {}\n",
        "Account",
        "Balance",
        "ID",
        name_width = name_width
    ));
    output.push_str(&"-".repeat(name_width + 18 + 36));
    output.push('\n');

    for summary in summaries {
        let mut flags = Vec::new();
        if summary.account.offbudget {
            flags.push("off-budget");
        }
        if summary.account.closed {
            flags.push("closed");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        };

        output.push_str(&format!(
            "{:name_width$}  {:>14}  {}{}\n",
            summary.account.name,
            summary.balance.to_string(),
            summary.account.id,
            flags,
            name_width = name_width
        ));
    }

    output
}
