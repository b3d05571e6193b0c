//! Core data models for actual-tools
//!
//! Accounts and transactions as the budgeting client exposes them, plus the
//! note rewrite policies applied to them.

pub mod account;
pub mod budget;
pub mod ids;
pub mod money;
pub mod policy;
pub mod transaction;
pub mod window;

pub use account::Account;
pub use budget::BudgetSnapshot;
pub use ids::{AccountId, PayeeId, TransactionId};
pub use money::Money;
pub use policy::{NoteDecision, NotePolicy, RewriteOptions, TEST_PREFIX};
pub use transaction::{Transaction, TransactionUpdate};
pub use window::DateWindow;
