//! `notes` commands
//!
//! Each subcommand picks one note policy and runs it over an account's
//! transactions in a date window.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::error::ActualResult;
use crate::models::policy::parse_exclude_pattern;
use crate::models::{DateWindow, NotePolicy, RewriteOptions};
use crate::services::{AccountService, NoteService, RewriteSummary, TransactionService};
use crate::session::BudgetSession;

use super::args::{AccountArg, Issues, WindowArgs};

/// Notes subcommands
#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// Prefix notes with "[test] "
    Add(NotesArgs),
    /// Strip a leading "[test] " from notes
    Remove(NotesArgs),
    /// Print every transaction verbatim, change nothing
    Dump(NotesArgs),
    /// Prepend a string to notes not matching a pattern
    Prepend(PrependArgs),
}

#[derive(Args, Debug)]
pub struct NotesArgs {
    #[command(flatten)]
    pub account: AccountArg,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Report what would change without updating anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PrependArgs {
    #[command(flatten)]
    pub common: NotesArgs,

    /// Skip notes matching this pattern (`/pattern/flags` or a bare pattern)
    #[arg(short = 'x', long)]
    pub exclude: String,

    /// String to prepend
    #[arg(short = 'p', long)]
    pub prepend: String,
}

/// Validated `notes` invocation
#[derive(Debug, Clone)]
pub struct NotesRequest {
    pub account: String,
    pub window: DateWindow,
    pub policy: NotePolicy,
    pub options: RewriteOptions,
}

impl NotesCommands {
    pub fn validate(&self, today: NaiveDate) -> ActualResult<NotesRequest> {
        let mut issues = Issues::new();

        let (common, policy) = match self {
            Self::Add(args) => (args, Some(NotePolicy::AddPrefix)),
            Self::Remove(args) => (args, Some(NotePolicy::RemovePrefix)),
            Self::Dump(args) => (args, Some(NotePolicy::FullDump)),
            Self::Prepend(args) => {
                let exclude = issues.check("exclude", parse_exclude_pattern(&args.exclude));
                if args.prepend.is_empty() {
                    issues.push("prepend: must not be empty");
                }
                let policy = exclude.map(|exclude| NotePolicy::PrependWithExclusion {
                    exclude,
                    prepend: args.prepend.clone(),
                });
                (&args.common, policy)
            }
        };

        let account = common.account.validate(&mut issues);
        let window = common.window.validate(today, &mut issues);

        let request = match (account, window, policy) {
            (Some(account), Some(window), Some(policy)) => Some(NotesRequest {
                account,
                window,
                policy,
                options: RewriteOptions {
                    dry_run: common.dry_run,
                },
            }),
            _ => None,
        };
        issues.finish(request)
    }
}

/// Run the note policy and print a closing summary
pub fn handle_notes_command(
    session: &mut dyn BudgetSession,
    request: &NotesRequest,
) -> ActualResult<RewriteSummary> {
    let account = AccountService::new(&*session).resolve(&request.account)?;
    let transactions = TransactionService::new(&*session).fetch(&account.id, &request.window)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}  {}", account, request.window)?;

    let updates = NoteService::new(session).apply(
        &transactions,
        &request.policy,
        request.options,
        &mut out,
    )?;

    let summary = RewriteSummary::from_updates(&updates);
    writeln!(
        out,
        "{}: {} inspected, {} updated, {} pending, {} excluded{}",
        request.policy.name(),
        summary.inspected,
        summary.applied,
        summary.pending,
        summary.excluded,
        if request.options.dry_run { " (dry run)" } else { "" }
    )?;
    Ok(summary)
}
