//! CSV export
//!
//! One row per transaction, with split children on their own rows right
//! after their parent.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ActualError, ActualResult};
use crate::models::{BudgetSnapshot, Transaction};

const HEADER: [&str; 9] = [
    "ID", "Date", "Account", "Payee", "Notes", "Amount", "Cleared", "Is Split", "Parent",
];

fn export_error(e: impl std::fmt::Display) -> ActualError {
    ActualError::Export(e.to_string())
}

/// Export every transaction of the budget to CSV
pub fn export_transactions_csv<W: Write>(
    snapshot: &BudgetSnapshot,
    writer: &mut W,
) -> ActualResult<()> {
    let account_names: HashMap<&str, &str> = snapshot
        .accounts
        .iter()
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER).map_err(export_error)?;

    for txn in &snapshot.transactions {
        write_row(&mut csv, &account_names, txn)?;
        for child in txn.subtransactions.iter().flatten() {
            write_row(&mut csv, &account_names, child)?;
        }
    }

    csv.flush().map_err(export_error)?;
    Ok(())
}

fn write_row<W: Write>(
    csv: &mut csv::Writer<W>,
    account_names: &HashMap<&str, &str>,
    txn: &Transaction,
) -> ActualResult<()> {
    let account = account_names
        .get(txn.account.as_str())
        .copied()
        .unwrap_or("Unknown");
    let amount = format!("{:.2}", txn.amount.cents() as f64 / 100.0);
    let parent = txn.parent_id.as_ref().map(|p| p.as_str()).unwrap_or("");

    csv.write_record([
        txn.id.as_str(),
        &txn.date.to_string(),
        account,
        txn.payee_label(),
        txn.notes_or_empty(),
        &amount,
        if txn.cleared { "true" } else { "false" },
        if txn.is_split() { "true" } else { "false" },
        parent,
    ])
    .map_err(export_error)
}
