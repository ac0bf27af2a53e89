//! Reports module for fintrack
//!
//! The pipeline runs one way: fetched records go through the aggregation
//! engine and the budget evaluator into a `ReportDocument`, which `layout`
//! paginates and `export::pdf` encodes.

pub mod aggregation;
pub mod budget_analysis;
pub mod document;
pub mod evaluator;
pub mod financial;
pub mod layout;
pub mod overview;

pub use aggregation::{
    compute_budget_progress, compute_category_breakdown, compute_insights, compute_monthly_series,
    compute_savings_insight, compute_totals, BudgetProgress, CategoryBreakdown, Insight, InsightTone,
    MonthlyTotals, SavingsInsight, Totals,
};
pub use budget_analysis::build_budget_report;
pub use document::{Cell, Column, ReportDocument, ReportKind, Rgb, Section};
pub use evaluator::{recommendations, BudgetHealth};
pub use financial::build_report;
pub use layout::{layout, Align, LaidOutPage, PageItem, PagedDocument};
pub use overview::Overview;

use crate::error::FinanceResult;
use crate::models::{Budget, BudgetStatus, Category, DateRange, Transaction};
use crate::services::derive_statuses;
use crate::storage::{DataSource, TransactionFilter};

/// Every record set a report needs, fetched up front
///
/// Aggregation never starts until all of them have been resolved; a fetch
/// failure surfaces here as `FinanceError::Fetch`.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub range: DateRange,
    /// Transactions inside `range`, newest first
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
}

impl ReportInputs {
    pub fn fetch(source: &dyn DataSource, range: DateRange) -> FinanceResult<Self> {
        let transactions = source
            .fetch_transactions(&TransactionFilter::in_range(range))?
            .data;
        let categories = source.fetch_categories()?;
        let budgets = source.fetch_budgets()?;

        Ok(Self {
            range,
            transactions,
            categories,
            budgets,
        })
    }

    /// Budgets joined with spending derived from `transactions`
    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        derive_statuses(&self.budgets, &self.categories, &self.transactions, &self.range)
    }
}
