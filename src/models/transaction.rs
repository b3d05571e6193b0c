//! Transaction model
//!
//! Mirrors the transaction entity of the budgeting client: split parents carry
//! their children under `subtransactions`, children point back through
//! `parent_id`. Updates are submitted as partial field sets by id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, PayeeId, TransactionId};
use super::money::Money;

/// A budget transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owning account
    pub account: AccountId,

    /// Transaction date (serialized as YYYY-MM-DD)
    pub date: NaiveDate,

    /// Amount in cents (negative for outflow)
    pub amount: Money,

    /// Free-text notes; absent and empty are equivalent for rewriting
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub payee: Option<PayeeId>,

    /// Resolved payee display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,

    /// Payee label as it arrived from the bank import
    #[serde(default)]
    pub imported_payee: Option<String>,

    #[serde(default)]
    pub cleared: bool,

    #[serde(default)]
    pub is_parent: bool,

    #[serde(default)]
    pub is_child: bool,

    #[serde(default)]
    pub parent_id: Option<TransactionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtransactions: Option<Vec<Transaction>>,
}

impl Transaction {
    /// Create a transaction with no payee or notes
    pub fn new(account: impl Into<AccountId>, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::generate(),
            account: account.into(),
            date,
            amount,
            notes: None,
            payee: None,
            payee_name: None,
            imported_payee: None,
            cleared: false,
            is_parent: false,
            is_child: false,
            parent_id: None,
            subtransactions: None,
        }
    }

    /// Notes with absent normalized to the empty string
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// Best available payee label: the imported one, then the resolved name
    pub fn payee_label(&self) -> &str {
        self.imported_payee
            .as_deref()
            .or(self.payee_name.as_deref())
            .unwrap_or("")
    }

    /// Number of child transactions already attached
    pub fn child_count(&self) -> usize {
        self.subtransactions.as_ref().map_or(0, Vec::len)
    }

    /// Check if this transaction already has children
    pub fn is_split(&self) -> bool {
        self.child_count() > 0
    }

    /// Build a child of this transaction carrying `amount`
    ///
    /// The child inherits account, date and payee fields and links back
    /// through `parent_id`.
    pub fn child(&self, amount: Money) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            account: self.account.clone(),
            date: self.date,
            amount,
            notes: None,
            payee: self.payee.clone(),
            payee_name: self.payee_name.clone(),
            imported_payee: self.imported_payee.clone(),
            cleared: self.cleared,
            is_parent: false,
            is_child: true,
            parent_id: Some(self.id.clone()),
            subtransactions: None,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &TransactionUpdate) {
        if let Some(notes) = &update.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(is_parent) = update.is_parent {
            self.is_parent = is_parent;
        }
        if let Some(children) = &update.subtransactions {
            self.subtransactions = Some(children.clone());
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount.cents(),
            self.notes_or_empty()
        )
    }
}

/// Partial field set submitted for an existing transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_parent: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtransactions: Option<Vec<Transaction>>,
}

impl TransactionUpdate {
    /// Update only the notes field
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// Turn a transaction into a split parent with the given children
    pub fn split(children: Vec<Transaction>) -> Self {
        Self {
            is_parent: Some(true),
            subtransactions: Some(children),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_none() && self.is_parent.is_none() && self.subtransactions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee() -> Transaction {
        let mut txn = Transaction::new(
            "acct-1",
            NaiveDate::from_ymd_opt(2024, 10, 2).unwrap(),
            Money::from_cents(-3500),
        );
        txn.imported_payee = Some("Safe Deposit Fee".into());
        txn
    }

    #[test]
    fn test_notes_normalization() {
        let mut txn = fee();
        assert_eq!(txn.notes_or_empty(), "");
        txn.notes = Some("hi".into());
        assert_eq!(txn.notes_or_empty(), "hi");
    }

    #[test]
    fn test_payee_label_prefers_imported() {
        let mut txn = fee();
        txn.payee_name = Some("Bank".into());
        assert_eq!(txn.payee_label(), "Safe Deposit Fee");
        txn.imported_payee = None;
        assert_eq!(txn.payee_label(), "Bank");
    }

    #[test]
    fn test_child_inherits_parent_fields() {
        let parent = fee();
        let child = parent.child(Money::from_cents(-100));
        assert!(child.is_child);
        assert_eq!(child.parent_id.as_ref(), Some(&parent.id));
        assert_eq!(child.account, parent.account);
        assert_eq!(child.date, parent.date);
        assert_eq!(child.imported_payee, parent.imported_payee);
        assert_ne!(child.id, parent.id);
    }

    #[test]
    fn test_apply_split_update() {
        let mut parent = fee();
        let children = vec![
            parent.child(Money::from_cents(-100)),
            parent.child(Money::from_cents(-3400)),
        ];
        parent.apply(&TransactionUpdate::split(children));
        assert!(parent.is_parent);
        assert!(parent.is_split());
        assert_eq!(parent.child_count(), 2);
        assert_eq!(parent.notes, None);
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "id": "t1",
            "account": "a1",
            "date": "2024-10-02",
            "amount": -3500,
            "notes": null,
            "imported_payee": "Safe Deposit Fee",
            "is_parent": false
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id.as_str(), "t1");
        assert_eq!(txn.amount.cents(), -3500);
        assert_eq!(txn.notes, None);
        assert!(!txn.is_split());
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let json = serde_json::to_string(&TransactionUpdate::notes("x")).unwrap();
        assert_eq!(json, r#"{"notes":"x"}"#);
        assert!(TransactionUpdate::default().is_empty());
    }

    #[test]
    fn test_display() {
        let mut txn = fee();
        txn.notes = Some("lunch".into());
        assert_eq!(txn.to_string(), "2024-10-02 -3500 lunch");
    }
}
