//! Budget display formatting
//!
//! Budget list with progress bars and health, plus the totals block.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetStatus;
use crate::reports::{compute_budget_progress, BudgetHealth};
use crate::services::BudgetSummary;

use super::format::{format_bar, format_currency, format_percentage};

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: BudgetHealth,
}

/// Format budgets with derived spending as a table
pub fn format_budget_list(statuses: &[BudgetStatus], symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = statuses.iter().map(|status| {
        let progress = compute_budget_progress(status);
        BudgetRow {
            id: status.budget.id.to_string(),
            category: status.category_name.clone(),
            period: status.budget.period.to_string(),
            spent: format_currency(status.spent, symbol),
            limit: format_currency(status.limit(), symbol),
            remaining: format_currency(status.remaining(), symbol),
            progress: format!(
                "{} {}",
                format_bar(progress.percentage, BAR_WIDTH),
                format_percentage(status.usage_ratio() * 100.0)
            ),
            status: BudgetHealth::of(status),
        }
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Format the totals across every budget
pub fn format_budget_summary(summary: &BudgetSummary, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Total Budget:    {}\n", format_currency(summary.total_budget, symbol)));
    output.push_str(&format!("Total Spent:     {}\n", format_currency(summary.total_spent, symbol)));
    output.push_str(&format!("Remaining:       {}\n", format_currency(summary.total_remaining, symbol)));
    output.push_str(&format!("Overall Usage:   {}\n", format_percentage(summary.usage_percentage())));
    if summary.over_budget_count > 0 {
        output.push_str(&format!(
            "Over budget:     {} of {}\n",
            summary.over_budget_count, summary.budget_count
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetId, BudgetPeriod, CategoryId, Money};

    fn status(limit: i64, spent: i64) -> BudgetStatus {
        let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(limit), BudgetPeriod::Monthly);
        BudgetStatus::new(budget, "Food & Dining", Money::from_cents(spent))
    }

    #[test]
    fn test_over_budget_row() {
        let output = format_budget_list(&[status(10000, 15000)], "$");
        assert!(output.contains("-$50.00"));
        assert!(output.contains("150.0%"));
        assert!(output.contains("Over Budget"));
        assert!(output.contains(&"█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_near_limit_row() {
        let output = format_budget_list(&[status(10000, 9000)], "$");
        assert!(output.contains("Near Limit"));
    }

    #[test]
    fn test_summary() {
        let summary = BudgetSummary::from_statuses(&[status(10000, 15000), status(10000, 1000)]);
        let output = format_budget_summary(&summary, "$");
        assert!(output.contains("Total Budget:    $200.00"));
        assert!(output.contains("Overall Usage:   80.0%"));
        assert!(output.contains("Over budget:     1 of 2"));
    }
}
