//! Transaction model
//!
//! A transaction is either income or expense; the amount is always stored
//! as a non-negative magnitude and the `kind` carries the direction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction (also the type of a category or budget)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    #[default]
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Magnitude of the transaction, never negative
    pub amount: Money,

    pub category_id: CategoryId,

    #[serde(default)]
    pub description: String,

    pub transaction_date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: TransactionId,
        kind: EntryKind,
        amount: Money,
        category_id: CategoryId,
        description: impl Into<String>,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            category_id,
            description: description.into(),
            transaction_date,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Amount with sign applied: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.transaction_date, self.kind, self.amount, self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Transaction amount cannot be negative")]
    NegativeAmount,
    #[error("Transaction description cannot be empty")]
    EmptyDescription,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            TransactionId::new(1),
            EntryKind::Expense,
            Money::from_cents(15000),
            CategoryId::new(1),
            "Grocery shopping",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_signed_amount() {
        let txn = sample();
        assert_eq!(txn.signed_amount().cents(), -15000);
        assert!(txn.is_expense());
    }

    #[test]
    fn test_validation() {
        let mut txn = sample();
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(-1);
        assert_eq!(txn.validate(), Err(TransactionValidationError::NegativeAmount));

        txn.amount = Money::from_cents(1);
        txn.description = "  ".into();
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyDescription));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_serde_uses_type_field() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["transaction_date"], "2024-01-15");
    }
}
