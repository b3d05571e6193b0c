//! CLI command handlers
//!
//! This module bridges clap argument parsing with the service layer. Every
//! command validates its flags first, collecting all problems, so nothing
//! touches credentials or the session until the invocation is well formed.

pub mod account;
pub mod args;
pub mod config;
pub mod export;
pub mod notes;
pub mod split;
pub mod transaction;

pub use account::handle_accounts_command;
pub use config::handle_config_command;
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use notes::{handle_notes_command, NotesCommands, NotesRequest};
pub use split::{handle_split_command, SplitArgs, SplitJob};
pub use transaction::{handle_transactions_command, TransactionArgs, TransactionQuery};

use crate::error::ActualResult;
use crate::session::BudgetSession;

/// A validated command that needs an open budget session
#[derive(Debug)]
pub enum Request {
    Accounts,
    Transactions(TransactionQuery),
    Notes(NotesRequest),
    Split(SplitJob),
    Export(ExportArgs),
}

/// Run a validated command against the session
pub fn dispatch(session: &mut dyn BudgetSession, request: &Request) -> ActualResult<()> {
    match request {
        Request::Accounts => handle_accounts_command(session),
        Request::Transactions(query) => handle_transactions_command(session, query),
        Request::Notes(notes) => handle_notes_command(session, notes).map(|_| ()),
        Request::Split(job) => handle_split_command(session, job),
        Request::Export(args) => handle_export_command(session, args),
    }
}
