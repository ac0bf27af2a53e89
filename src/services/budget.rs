//! Budget service
//!
//! Budget CRUD plus the derived spending view. Spending is always
//! recomputed from the transaction set for the requested window; nothing
//! here ever writes a `spent` value back.

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    next_id, Budget, BudgetId, BudgetPeriod, BudgetStatus, Category, CategoryId, DateRange, Money,
    Transaction, UNCATEGORIZED,
};
use crate::storage::{Storage, TransactionFilter};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Totals across every budget for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub budget_count: usize,
    pub over_budget_count: usize,
}

impl BudgetSummary {
    /// Summarize already-derived statuses
    pub fn from_statuses(statuses: &[BudgetStatus]) -> Self {
        let total_budget: Money = statuses.iter().map(|s| s.limit()).sum();
        let total_spent: Money = statuses.iter().map(|s| s.spent).sum();
        Self {
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
            budget_count: statuses.len(),
            over_budget_count: statuses.iter().filter(|s| s.spent > s.limit()).count(),
        }
    }

    /// Overall usage as a percentage of the combined limit (unclamped)
    pub fn usage_percentage(&self) -> f64 {
        self.total_spent.ratio_of(self.total_budget) * 100.0
    }
}

/// Join budgets with category names and spending derived from `transactions`
///
/// Each budget counts spending over its active window inside `window`
/// (see `Budget::active_window`). Budgets whose category no longer exists
/// are labelled "Uncategorized".
pub fn derive_statuses(
    budgets: &[Budget],
    categories: &[Category],
    transactions: &[Transaction],
    window: &DateRange,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let name = categories
                .iter()
                .find(|c| c.id == budget.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or(UNCATEGORIZED);
            BudgetStatus::new(budget.clone(), name, budget.spent_for(transactions, window))
        })
        .collect()
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a budget for a category
    ///
    /// The category must exist and may not already have a budget. The
    /// budget takes the category's kind.
    pub fn create(&self, category_id: CategoryId, limit: Money, period: BudgetPeriod) -> FinanceResult<Budget> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| FinanceError::category_not_found(category_id.to_string()))?;

        if self.storage.budgets.get_by_category(category_id)?.is_some() {
            return Err(FinanceError::Duplicate {
                entity_type: "Budget",
                identifier: category.name,
            });
        }

        let id = next_id(self.storage.budgets.ids()?);
        let mut budget = Budget::new(id, category_id, limit, period);
        budget.kind = category.kind;
        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FinanceResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by ID string or by its category's name
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Budget>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return self.storage.budgets.get_by_category(category.id);
        }

        if let Ok(id) = identifier.trim().parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        Ok(None)
    }

    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Change a budget's limit and/or period
    pub fn update(&self, id: BudgetId, limit: Option<Money>, period: Option<BudgetPeriod>) -> FinanceResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;

        if let Some(limit) = limit {
            budget.limit = limit;
        }
        if let Some(period) = period {
            budget.period = period;
        }

        budget
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> FinanceResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FinanceError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        Ok(budget)
    }

    /// Every budget with spending derived for `window`
    pub fn with_spending(&self, window: &DateRange) -> FinanceResult<Vec<BudgetStatus>> {
        let budgets = self.storage.budgets.get_all()?;
        let categories = self.storage.categories.get_all()?;
        let transactions = self
            .storage
            .transactions
            .query(&TransactionFilter::in_range(*window))?
            .data;

        Ok(derive_statuses(&budgets, &categories, &transactions, window))
    }

    /// Combined totals for `window`
    pub fn summary(&self, window: &DateRange) -> FinanceResult<BudgetSummary> {
        Ok(BudgetSummary::from_statuses(&self.with_spending(window)?))
    }
}
