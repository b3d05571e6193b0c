//! Export module for actual-tools
//!
//! Writes the downloaded budget out:
//! - JSON: the full budget snapshot with export metadata
//! - CSV: transactions, spreadsheet-compatible

pub mod csv;
pub mod json;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_json, BudgetExport, EXPORT_SCHEMA_VERSION};
