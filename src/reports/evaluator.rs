//! Budget evaluator
//!
//! Classifies each budget's health from its current spending and produces
//! the recommendation lines for the budget report. Nothing is persisted;
//! every call recomputes from the statuses it is given.

use std::fmt;

use serde::Serialize;

use crate::models::BudgetStatus;

/// Usage ratio above which a budget is "near its limit"
pub const WARNING_RATIO: f64 = 0.8;

pub const ALERT_RECOMMENDATION: &str = "Consider setting up alerts for when you reach 80% of your budget.";
pub const REVIEW_RECOMMENDATION: &str = "Review your budget limits monthly based on your actual spending patterns.";
pub const ALL_GOOD_RECOMMENDATION: &str = "Great job! You are within your budget across all categories.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    /// usage <= 80%
    Good,
    /// 80% < usage <= 100%
    Warning,
    /// usage > 100%
    OverBudget,
}

impl BudgetHealth {
    /// Classify an unclamped `spent / limit` ratio
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.0 {
            Self::OverBudget
        } else if ratio > WARNING_RATIO {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub fn of(status: &BudgetStatus) -> Self {
        Self::from_ratio(status.usage_ratio())
    }

    /// Label used in the budget analysis table
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::OverBudget => "Over Budget",
        }
    }

    /// Two-state label used in the financial report's budget table
    pub fn within_label(&self) -> &'static str {
        match self {
            Self::OverBudget => "Over Budget",
            _ => "Within Budget",
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "Near Limit"),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// Recommendation lines in report order
///
/// Over-budget lines come first (a summary, then one per category in
/// budget order), then the near-limit summary, or a single affirming line
/// when nothing needs attention. The two generic lines always close the
/// list.
pub fn recommendations(statuses: &[BudgetStatus]) -> Vec<String> {
    let over: Vec<&BudgetStatus> = statuses
        .iter()
        .filter(|s| BudgetHealth::of(s) == BudgetHealth::OverBudget)
        .collect();
    let near = statuses
        .iter()
        .filter(|s| BudgetHealth::of(s) == BudgetHealth::Warning)
        .count();

    let mut lines = Vec::new();

    if !over.is_empty() {
        lines.push(format!(
            "You are over budget in {} {}. Consider reviewing your spending in these areas.",
            over.len(),
            plural(over.len())
        ));
        for status in &over {
            lines.push(format!(
                "{}: Consider reducing spending or increasing your budget limit.",
                status.category_name
            ));
        }
    }

    if near > 0 {
        lines.push(format!(
            "You are approaching your budget limit in {} {}. Monitor these closely.",
            near,
            plural(near)
        ));
    }

    if over.is_empty() && near == 0 {
        lines.push(ALL_GOOD_RECOMMENDATION.to_string());
    }

    lines.push(ALERT_RECOMMENDATION.to_string());
    lines.push(REVIEW_RECOMMENDATION.to_string());
    lines
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "category"
    } else {
        "categories"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money};

    fn status(name: &str, limit: i64, spent: i64) -> BudgetStatus {
        let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(limit), BudgetPeriod::Monthly);
        BudgetStatus::new(budget, name, Money::from_cents(spent))
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(BudgetHealth::from_ratio(0.0), BudgetHealth::Good);
        assert_eq!(BudgetHealth::from_ratio(0.8), BudgetHealth::Good);
        assert_eq!(BudgetHealth::from_ratio(0.81), BudgetHealth::Warning);
        assert_eq!(BudgetHealth::from_ratio(1.0), BudgetHealth::Warning);
        assert_eq!(BudgetHealth::from_ratio(1.01), BudgetHealth::OverBudget);
    }

    #[test]
    fn test_zero_limit_is_good() {
        assert_eq!(BudgetHealth::of(&status("Food", 0, 500)), BudgetHealth::Good);
    }

    #[test]
    fn test_recommendation_order() {
        let statuses = vec![
            status("Food", 100, 150),
            status("Fun", 100, 90),
            status("Gas", 100, 120),
            status("Books", 100, 10),
        ];

        let lines = recommendations(&statuses);
        assert_eq!(
            lines,
            vec![
                "You are over budget in 2 categories. Consider reviewing your spending in these areas.".to_string(),
                "Food: Consider reducing spending or increasing your budget limit.".to_string(),
                "Gas: Consider reducing spending or increasing your budget limit.".to_string(),
                "You are approaching your budget limit in 1 category. Monitor these closely.".to_string(),
                ALERT_RECOMMENDATION.to_string(),
                REVIEW_RECOMMENDATION.to_string(),
            ]
        );
    }

    #[test]
    fn test_all_good() {
        let lines = recommendations(&[status("Food", 100, 10)]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ALL_GOOD_RECOMMENDATION);

        assert_eq!(recommendations(&[]).len(), 3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(BudgetHealth::Warning.to_string(), "Near Limit");
        assert_eq!(BudgetHealth::Warning.label(), "Warning");
        assert_eq!(BudgetHealth::Warning.within_label(), "Within Budget");
        assert_eq!(BudgetHealth::OverBudget.within_label(), "Over Budget");
    }
}
