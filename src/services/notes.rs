//! Note rewriter
//!
//! Evaluates the active [`NotePolicy`] against each transaction, in input
//! order, reports every transaction inspected and every update applied or
//! skipped, and submits the pending updates inside a single batch.

use std::io::Write;

use crate::display::transaction::{format_transaction_full, format_transaction_line};
use crate::error::{ActualError, ActualResult};
use crate::models::{
    NoteDecision, NotePolicy, RewriteOptions, Transaction, TransactionId, TransactionUpdate,
};
use crate::session::{batch_updates, BudgetSession};

/// What happened to one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// Policy left the notes alone
    Unchanged,
    /// Notes matched the exclusion pattern
    Excluded,
    /// Change computed but not submitted
    DryRun,
    /// Change submitted
    Applied,
}

/// Record of one inspected transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub id: TransactionId,
    /// Notes before, absent normalized to ""
    pub old_notes: String,
    /// Notes after; equal to `old_notes` when nothing changed
    pub new_notes: String,
    pub status: UpdateStatus,
}

impl AppliedUpdate {
    pub fn applied(&self) -> bool {
        self.status == UpdateStatus::Applied
    }

    /// Whether the notes would change
    pub fn is_change(&self) -> bool {
        self.old_notes != self.new_notes
    }
}

/// Counts for the closing summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub inspected: usize,
    pub applied: usize,
    pub pending: usize,
    pub excluded: usize,
}

impl RewriteSummary {
    pub fn from_updates(updates: &[AppliedUpdate]) -> Self {
        let mut summary = Self {
            inspected: updates.len(),
            ..Self::default()
        };
        for update in updates {
            match update.status {
                UpdateStatus::Applied => summary.applied += 1,
                UpdateStatus::DryRun => summary.pending += 1,
                UpdateStatus::Excluded => summary.excluded += 1,
                UpdateStatus::Unchanged => {}
            }
        }
        summary
    }
}

/// Service that rewrites transaction notes
pub struct NoteService<'a> {
    session: &'a mut dyn BudgetSession,
}

impl<'a> NoteService<'a> {
    pub fn new(session: &'a mut dyn BudgetSession) -> Self {
        Self { session }
    }

    /// Apply `policy` to `transactions`, writing progress to `out`
    ///
    /// With `dry_run` nothing is submitted. Otherwise all changes go into
    /// one batch; the first failed update aborts and rolls it back.
    pub fn apply(
        &mut self,
        transactions: &[Transaction],
        policy: &NotePolicy,
        options: RewriteOptions,
        out: &mut dyn Write,
    ) -> ActualResult<Vec<AppliedUpdate>> {
        let submit = !options.dry_run
            && policy.mutates()
            && transactions.iter().any(|t| changes_notes(policy, t));

        log::info!(
            "{} over {} transactions (dry run: {})",
            policy.name(),
            transactions.len(),
            options.dry_run
        );

        if submit {
            batch_updates(&mut *self.session, |session| {
                rewrite_all(Some(session), transactions, policy, out)
            })
        } else {
            rewrite_all(None, transactions, policy, out)
        }
    }
}

fn changes_notes(policy: &NotePolicy, txn: &Transaction) -> bool {
    match policy.decide(txn.notes_or_empty()) {
        NoteDecision::Rewrite(new) => new != txn.notes_or_empty(),
        NoteDecision::Keep | NoteDecision::Excluded => false,
    }
}

/// Walk the transactions in order; `session` is `None` when nothing may be submitted
fn rewrite_all(
    mut session: Option<&mut dyn BudgetSession>,
    transactions: &[Transaction],
    policy: &NotePolicy,
    out: &mut dyn Write,
) -> ActualResult<Vec<AppliedUpdate>> {
    let mut updates = Vec::with_capacity(transactions.len());

    for txn in transactions {
        match policy {
            NotePolicy::FullDump => writeln!(out, "{}", format_transaction_full(txn))?,
            _ => writeln!(out, "{}", format_transaction_line(txn))?,
        }

        let old_notes = txn.notes_or_empty().to_string();
        let (new_notes, status) = match policy.decide(&old_notes) {
            NoteDecision::Keep => (old_notes.clone(), UpdateStatus::Unchanged),
            NoteDecision::Excluded => {
                writeln!(out, "  skipped, matches exclusion: {}", old_notes)?;
                (old_notes.clone(), UpdateStatus::Excluded)
            }
            NoteDecision::Rewrite(new) if new == old_notes => (new, UpdateStatus::Unchanged),
            NoteDecision::Rewrite(new) => match session.as_deref_mut() {
                Some(session) => {
                    writeln!(out, "  updating note to '{}'", new)?;
                    session
                        .update_transaction(&txn.id, &TransactionUpdate::notes(new.clone()))
                        .map_err(|e| ActualError::UpdateFailed {
                            transaction_id: txn.id.to_string(),
                            cause: e.to_string(),
                        })?;
                    (new, UpdateStatus::Applied)
                }
                None => {
                    writeln!(out, "  would update note to '{}'", new)?;
                    (new, UpdateStatus::DryRun)
                }
            },
        };

        updates.push(AppliedUpdate {
            id: txn.id.clone(),
            old_notes,
            new_notes,
            status,
        });
    }

    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::policy::parse_exclude_pattern;
    use crate::models::{Account, BudgetSnapshot, Money};
    use crate::session::MemorySession;
    use chrono::NaiveDate;

    fn txn(id: &str, notes: Option<&str>) -> Transaction {
        let mut t = Transaction::new(
            "1",
            NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(),
            Money::from_cents(-1200),
        );
        t.id = TransactionId::from(id);
        t.notes = notes.map(str::to_string);
        t
    }

    fn session_with(transactions: Vec<Transaction>) -> MemorySession {
        let mut snapshot = BudgetSnapshot::new("s");
        snapshot.accounts.push(Account::new("1", "Checking"));
        snapshot.transactions = transactions;
        MemorySession::loaded(snapshot)
    }

    fn run(
        session: &mut MemorySession,
        policy: &NotePolicy,
        dry_run: bool,
    ) -> (ActualResult<Vec<AppliedUpdate>>, String) {
        let transactions = session.snapshot().transactions.clone();
        let mut out = Vec::new();
        let result = NoteService::new(session).apply(
            &transactions,
            policy,
            RewriteOptions { dry_run },
            &mut out,
        );
        (result, String::from_utf8(out).unwrap())
    }

    fn notes_of(session: &MemorySession, id: &str) -> Option<String> {
        session.find(&TransactionId::from(id)).unwrap().notes.clone()
    }

    #[test]
    fn test_add_prefix_null_notes() {
        let mut session = session_with(vec![txn("a", None)]);
        let (result, _) = run(&mut session, &NotePolicy::AddPrefix, false);
        let updates = result.unwrap();

        assert_eq!(updates[0].old_notes, "");
        assert_eq!(updates[0].new_notes, "[test] ");
        assert!(updates[0].applied());
        assert_eq!(notes_of(&session, "a").as_deref(), Some("[test] "));
    }

    #[test]
    fn test_remove_prefix() {
        let mut session = session_with(vec![txn("a", Some("[test] hi")), txn("b", Some("hi"))]);
        let (result, _) = run(&mut session, &NotePolicy::RemovePrefix, false);
        let updates = result.unwrap();

        assert_eq!(updates[0].new_notes, "hi");
        assert_eq!(updates[1].status, UpdateStatus::Unchanged);
        assert_eq!(session.update_calls(), 1);
        assert_eq!(notes_of(&session, "a").as_deref(), Some("hi"));
    }

    #[test]
    fn test_prepend_with_exclusion() {
        let policy = NotePolicy::PrependWithExclusion {
            exclude: parse_exclude_pattern("/#review(ed)?/").unwrap(),
            prepend: "X".into(),
        };
        let mut session = session_with(vec![txn("a", Some("lunch #reviewed")), txn("b", Some("dinner"))]);
        let (result, out) = run(&mut session, &policy, false);
        let updates = result.unwrap();

        assert_eq!(updates[0].status, UpdateStatus::Excluded);
        assert_eq!(updates[0].new_notes, "lunch #reviewed");
        assert_eq!(updates[1].new_notes, "X dinner");
        assert_eq!(session.update_calls(), 1);
        assert!(out.contains("skipped"));
    }

    #[test]
    fn test_dry_run_never_updates() {
        let policies = vec![
            NotePolicy::AddPrefix,
            NotePolicy::RemovePrefix,
            NotePolicy::PrependWithExclusion {
                exclude: parse_exclude_pattern("nomatch").unwrap(),
                prepend: "X".into(),
            },
            NotePolicy::FullDump,
        ];
        for policy in &policies {
            let mut session = session_with(vec![
                txn("a", None),
                txn("b", Some("[test] tagged")),
                txn("c", Some("plain")),
            ]);
            let (result, _) = run(&mut session, policy, true);
            let updates = result.unwrap();

            assert_eq!(session.update_calls(), 0, "{} submitted", policy.name());
            assert!(updates.iter().all(|u| !u.applied()));
            assert_eq!(notes_of(&session, "c").as_deref(), Some("plain"));
        }
    }

    #[test]
    fn test_dry_run_reports_pending() {
        let mut session = session_with(vec![txn("a", Some("plain"))]);
        let (result, out) = run(&mut session, &NotePolicy::AddPrefix, true);
        let updates = result.unwrap();

        assert_eq!(updates[0].status, UpdateStatus::DryRun);
        assert!(updates[0].is_change());
        assert!(out.contains("would update note to '[test] plain'"));
    }

    #[test]
    fn test_full_dump_prints_every_transaction() {
        let mut session = session_with(vec![txn("a", None), txn("b", Some("x"))]);
        let (result, out) = run(&mut session, &NotePolicy::FullDump, false);

        assert!(result.unwrap().iter().all(|u| u.status == UpdateStatus::Unchanged));
        assert_eq!(out.matches("\"id\"").count(), 2);
        assert_eq!(session.update_calls(), 0);
        assert!(!session.in_batch());
    }

    #[test]
    fn test_failure_aborts_and_rolls_back() {
        let mut session = session_with(vec![
            txn("a", Some("one")),
            txn("b", Some("two")),
            txn("c", Some("three")),
        ]);
        session.fail_updates_for("b");

        let (result, out) = run(&mut session, &NotePolicy::AddPrefix, false);
        match result.unwrap_err() {
            ActualError::UpdateFailed { transaction_id, .. } => assert_eq!(transaction_id, "b"),
            other => panic!("unexpected error: {:?}", other),
        }

        // "c" never attempted, "a" rolled back
        assert_eq!(session.update_calls(), 2);
        assert_eq!(notes_of(&session, "a").as_deref(), Some("one"));
        assert!(!out.contains("three'"));
    }

    #[test]
    fn test_reports_in_input_order() {
        let mut session = session_with(vec![txn("a", Some("first")), txn("b", Some("second"))]);
        let (result, out) = run(&mut session, &NotePolicy::AddPrefix, false);
        result.unwrap();

        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_summary_counts() {
        let updates = vec![
            AppliedUpdate {
                id: "a".into(),
                old_notes: String::new(),
                new_notes: "[test] ".into(),
                status: UpdateStatus::Applied,
            },
            AppliedUpdate {
                id: "b".into(),
                old_notes: "x #review".into(),
                new_notes: "x #review".into(),
                status: UpdateStatus::Excluded,
            },
        ];
        let summary = RewriteSummary::from_updates(&updates);
        assert_eq!(summary.inspected, 2);
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.pending, 0);
    }
}
