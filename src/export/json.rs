//! JSON export
//!
//! Writes the downloaded budget as a versioned JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ActualError, ActualResult};
use crate::models::BudgetSnapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Budget export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of the tool that wrote the export
    pub app_version: String,

    pub metadata: ExportMetadata,

    pub budget: BudgetSnapshot,
}

/// Counts and date range, for a quick look without parsing the budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub transaction_count: usize,
    /// Split children across all parents
    pub child_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl BudgetExport {
    pub fn from_snapshot(snapshot: BudgetSnapshot) -> Self {
        let dates = || snapshot.transactions.iter().map(|t| t.date);
        let metadata = ExportMetadata {
            account_count: snapshot.accounts.len(),
            transaction_count: snapshot.transactions.len(),
            child_count: snapshot.transactions.iter().map(|t| t.child_count()).sum(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            budget: snapshot,
        }
    }
}

/// Export the budget to JSON
pub fn export_json<W: Write>(
    snapshot: &BudgetSnapshot,
    writer: &mut W,
    pretty: bool,
) -> ActualResult<()> {
    let export = BudgetExport::from_snapshot(snapshot.clone());

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| ActualError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ActualError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Money, Transaction};
    use chrono::NaiveDate;

    fn snapshot() -> BudgetSnapshot {
        let mut snapshot = BudgetSnapshot::new("sync-1");
        snapshot.accounts.push(Account::new("1", "Checking"));
        for day in [3, 1, 2] {
            snapshot.transactions.push(Transaction::new(
                "1",
                NaiveDate::from_ymd_opt(2024, 10, day).unwrap(),
                Money::from_cents(-100),
            ));
        }
        let parent = &snapshot.transactions[0];
        let children = vec![
            parent.child(Money::from_cents(-40)),
            parent.child(Money::from_cents(-60)),
        ];
        snapshot.transactions[0].is_parent = true;
        snapshot.transactions[0].subtransactions = Some(children);
        snapshot
    }

    #[test]
    fn test_metadata() {
        let export = BudgetExport::from_snapshot(snapshot());
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.account_count, 1);
        assert_eq!(export.metadata.transaction_count, 3);
        assert_eq!(export.metadata.child_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-10-01"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-10-03"));
    }

    #[test]
    fn test_export_reads_back() {
        let original = snapshot();
        let mut output = Vec::new();
        export_json(&original, &mut output, true).unwrap();

        let parsed: BudgetExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.budget, original);
    }

    #[test]
    fn test_empty_budget() {
        let export = BudgetExport::from_snapshot(BudgetSnapshot::new("s"));
        assert_eq!(export.metadata.earliest_transaction, None);
    }
}
