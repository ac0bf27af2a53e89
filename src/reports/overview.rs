//! Dashboard overview
//!
//! Every aggregate the terminal summary shows, computed in one pass from
//! the fetched report inputs.

use serde::Serialize;

use crate::models::{BudgetStatus, DateRange, Transaction};

use super::aggregation::{
    compute_category_breakdown, compute_insights, compute_monthly_series, compute_savings_insight,
    compute_totals, CategoryBreakdown, Insight, MonthlyTotals, SavingsInsight, Totals,
};
use super::ReportInputs;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub range: DateRange,
    pub totals: Totals,
    pub savings: SavingsInsight,
    pub breakdown: Vec<CategoryBreakdown>,
    /// Oldest month first
    pub monthly: Vec<MonthlyTotals>,
    pub budgets: Vec<BudgetStatus>,
    pub insights: Vec<Insight>,
}

impl Overview {
    /// Build the overview for `inputs.range`
    ///
    /// `history` feeds the monthly series only; anything dated after the
    /// end of the window is ignored.
    pub fn build(inputs: &ReportInputs, history: &[Transaction], months: usize) -> Self {
        let totals = compute_totals(&inputs.transactions);
        let budgets = inputs.budget_statuses();

        let past: Vec<Transaction> = history
            .iter()
            .filter(|t| t.transaction_date <= inputs.range.to)
            .cloned()
            .collect();

        Self {
            range: inputs.range,
            savings: compute_savings_insight(totals.income, totals.expenses),
            breakdown: compute_category_breakdown(&inputs.transactions, &inputs.categories),
            monthly: compute_monthly_series(&past, months),
            insights: compute_insights(&totals, &budgets),
            budgets,
            totals,
        }
    }
}
