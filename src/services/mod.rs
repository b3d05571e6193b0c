//! Service layer for actual-tools
//!
//! The service layer holds the workflows on top of a budget session:
//! account resolution, date-window filtering, note rewriting and splits.

pub mod account;
pub mod notes;
pub mod split;
pub mod transaction;

pub use account::{resolve_account, AccountService, AccountSummary};
pub use notes::{AppliedUpdate, NoteService, RewriteSummary, UpdateStatus};
pub use split::{plan_split, SplitPlan, SplitRequest, SplitService};
pub use transaction::{TransactionService, WindowSpec};
