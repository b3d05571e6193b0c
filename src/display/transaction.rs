//! Transaction display formatting

use crate::models::Transaction;

/// One-line audit form: date, amount in cents, notes
pub fn format_transaction_line(txn: &Transaction) -> String {
    txn.to_string()
}

/// Verbatim form of a transaction (pretty JSON)
pub fn format_transaction_full(txn: &Transaction) -> String {
    serde_json::to_string_pretty(txn).unwrap_or_else(|_| format!("{:?}", txn))
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:24} {:>12}  {}\n",
        "Date", "Payee", "Amount", "Notes"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for txn in transactions {
        let payee = if txn.payee_label().is_empty() {
            "(no payee)"
        } else {
            txn.payee_label()
        };
        let split = if txn.is_split() {
            format!(" [{} splits]", txn.child_count())
        } else {
            String::new()
        };
        output.push_str(&format!(
            "{} {:24} {:>12}  {}{}\n",
            txn.date.format("%Y-%m-%d"),
            truncate(payee, 24),
            txn.amount.to_string(),
            txn.notes_or_empty(),
            split
        ));
    }

    output
}

/// Truncate to at most `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        let mut txn = Transaction::new(
            "1",
            NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(),
            Money::from_cents(-3500),
        );
        txn.imported_payee = Some("Safe Deposit Fee".into());
        txn.notes = Some("#reviewed".into());
        txn
    }

    #[test]
    fn test_line() {
        assert_eq!(format_transaction_line(&sample()), "2024-10-02 -3500 #reviewed");
    }

    #[test]
    fn test_full_is_json() {
        let full = format_transaction_full(&sample());
        let value: serde_json::Value = serde_json::from_str(&full).unwrap();
        assert_eq!(value["imported_payee"], "Safe Deposit Fee");
    }

    #[test]
    fn test_register() {
        let formatted = format_transaction_register(&[sample()]);
        assert!(formatted.contains("Safe Deposit Fee"));
        assert!(formatted.contains("-$35.00"));
        assert!(format_transaction_register(&[]).contains("No transactions"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short");
        let result = truncate("A very long payee name", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }
}
