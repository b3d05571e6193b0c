//! Transaction split
//!
//! One-off correction: find exactly one transaction, check it is the
//! expected record, and turn it into a parent with two children whose
//! amounts sum to the parent's. Refuses to split twice.

use std::io::Write;

use crate::error::{ActualError, ActualResult};
use crate::models::{DateWindow, Money, Transaction, TransactionUpdate};
use crate::session::BudgetSession;

/// What the caller expects to find and how to divide it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    /// Payee label the transaction must carry
    pub expected_payee: String,
    /// Amount the transaction must have
    pub expected_amount: Money,
    /// Amount of the first child; the second child takes the rest
    pub first: Money,
}

/// A validated split, ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub parent: Transaction,
    pub children: Vec<Transaction>,
}

impl SplitPlan {
    /// Sum of the child amounts, equal to the parent amount by construction
    pub fn children_total(&self) -> Money {
        self.children.iter().map(|c| c.amount).sum()
    }
}

/// Check the guards and build the split for the single transaction in `matches`
///
/// # Errors
///
/// - `NoMatch` / `AmbiguousMatch` unless exactly one transaction matched
/// - `UnexpectedTransaction` if payee or amount differ
/// - `AlreadySplit` if the transaction already has children
/// - `Validation` if either child would be zero or out of range
pub fn plan_split(
    matches: &[Transaction],
    window: &DateWindow,
    request: &SplitRequest,
) -> ActualResult<SplitPlan> {
    let parent = match matches {
        [] => {
            return Err(ActualError::NoMatch {
                start: window.start().to_string(),
                end: window.end().to_string(),
            })
        }
        [single] => single,
        many => return Err(ActualError::AmbiguousMatch { count: many.len() }),
    };

    if parent.payee_label() != request.expected_payee || parent.amount != request.expected_amount
    {
        return Err(ActualError::UnexpectedTransaction {
            id: parent.id.to_string(),
            expected_payee: request.expected_payee.clone(),
            expected_amount: request.expected_amount,
            found_payee: parent.payee_label().to_string(),
            found_amount: parent.amount,
        });
    }

    if parent.is_split() {
        return Err(ActualError::AlreadySplit {
            id: parent.id.to_string(),
            children: parent.child_count(),
        });
    }

    let second = parent.amount.checked_sub(request.first).ok_or_else(|| {
        ActualError::validation(format!(
            "first: {} is out of range for {}",
            request.first, parent.amount
        ))
    })?;
    if request.first.is_zero() || second.is_zero() {
        return Err(ActualError::validation(format!(
            "first: {} would leave a zero-amount child of {}",
            request.first, parent.amount
        )));
    }

    Ok(SplitPlan {
        parent: parent.clone(),
        children: vec![parent.child(request.first), parent.child(second)],
    })
}

/// Service that submits splits
pub struct SplitService<'a> {
    session: &'a mut dyn BudgetSession,
}

impl<'a> SplitService<'a> {
    pub fn new(session: &'a mut dyn BudgetSession) -> Self {
        Self { session }
    }

    /// Report the plan and, unless `dry_run`, submit it; returns whether it was submitted
    pub fn apply(&mut self, plan: &SplitPlan, dry_run: bool, out: &mut dyn Write) -> ActualResult<bool> {
        writeln!(
            out,
            "{} {} {} ({})",
            plan.parent.date,
            plan.parent.payee_label(),
            plan.parent.amount,
            plan.parent.id
        )?;
        for child in &plan.children {
            writeln!(out, "  -> {}", child.amount)?;
        }

        if dry_run {
            writeln!(out, "not splitting (dry run)")?;
            return Ok(false);
        }

        writeln!(out, "splitting")?;
        self.session
            .update_transaction(
                &plan.parent.id,
                &TransactionUpdate::split(plan.children.clone()),
            )
            .map_err(|e| ActualError::UpdateFailed {
                transaction_id: plan.parent.id.to_string(),
                cause: e.to_string(),
            })?;
        log::info!("split {} into {} children", plan.parent.id, plan.children.len());
        Ok(true)
    }
}
