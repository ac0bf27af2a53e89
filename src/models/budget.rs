//! Budget model
//!
//! A budget caps spending in one category per period. Only the limit is
//! stored; `spent` and `remaining` are derived from the transaction set
//! every time they are needed (see `BudgetStatus`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::{BudgetPeriod, DateRange};
use super::transaction::{EntryKind, Transaction};

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    /// Must match the kind of the backing category
    #[serde(rename = "type", default)]
    pub kind: EntryKind,

    pub limit: Money,

    #[serde(default)]
    pub period: BudgetPeriod,
}

impl Budget {
    /// Create a new expense budget
    pub fn new(id: BudgetId, category_id: CategoryId, limit: Money, period: BudgetPeriod) -> Self {
        Self {
            id,
            category_id,
            kind: EntryKind::Expense,
            limit,
            period,
        }
    }

    /// The part of `report` the limit applies to
    ///
    /// That is the budget period containing the last day of the report,
    /// cut to start no earlier than the report itself.
    pub fn active_window(&self, report: &DateRange) -> DateRange {
        let period = self.period.to_date(report.to);
        DateRange::new(period.from.max(report.from), report.to)
    }

    /// Spending counted against the limit for a report window
    pub fn spent_for(&self, transactions: &[Transaction], report: &DateRange) -> Money {
        self.spent_in(transactions, &self.active_window(report))
    }

    /// Sum of the transactions this budget tracks inside `window`
    pub fn spent_in(&self, transactions: &[Transaction], window: &DateRange) -> Money {
        transactions
            .iter()
            .filter(|t| {
                t.category_id == self.category_id
                    && t.kind == self.kind
                    && window.contains(t.transaction_date)
            })
            .map(|t| t.amount)
            .sum()
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} limit {}", self.category_id, self.period, self.limit)
    }
}

/// A budget joined with its category name and derived spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub category_name: String,
    pub spent: Money,
}

impl BudgetStatus {
    pub fn new(budget: Budget, category_name: impl Into<String>, spent: Money) -> Self {
        Self {
            budget,
            category_name: category_name.into(),
            // spent can never be below zero
            spent: if spent.is_negative() { Money::zero() } else { spent },
        }
    }

    pub fn limit(&self) -> Money {
        self.budget.limit
    }

    /// `limit - spent`, recomputed on every call
    pub fn remaining(&self) -> Money {
        self.budget.limit - self.spent
    }

    /// Unclamped `spent / limit`; zero for a zero limit
    pub fn usage_ratio(&self) -> f64 {
        self.spent.ratio_of(self.budget.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("Budget limit must be greater than zero")]
    NonPositiveLimit,
}
