//! Budget repository
//!
//! Only limits are persisted. Legacy files may still carry cached
//! `spent`/`remaining` values; those are handed back from `load` for drift
//! reporting and then dropped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::ingest::{normalize_budgets, IngestedBudget, RawBudget};
use crate::models::{Budget, BudgetId, Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::table::Table;

#[derive(Debug, Default, Deserialize)]
struct RawBudgetData {
    #[serde(default)]
    budgets: Vec<RawBudget>,
}

#[derive(Debug, Serialize)]
struct BudgetData<'a> {
    budgets: &'a [Budget],
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: Option<PathBuf>,
    table: Table<BudgetId, Budget>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            table: Table::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            table: Table::new(),
        }
    }

    /// Load budgets; `categories` decides each budget's kind
    pub fn load(&self, categories: &[Category]) -> Result<Vec<IngestedBudget>, FinanceError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let file_data: RawBudgetData = read_json(path)?;
        let ingested = normalize_budgets(file_data.budgets, categories);
        self.table.replace_all(
            ingested
                .iter()
                .map(|item| (item.budget.id, item.budget.clone())),
        )?;
        Ok(ingested)
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let budgets = self.table.all()?;
        write_json_atomic(path, &BudgetData { budgets: &budgets })
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FinanceError> {
        self.table.get(id)
    }

    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Option<Budget>, FinanceError> {
        Ok(self
            .table
            .all()?
            .into_iter()
            .find(|b| b.category_id == category_id))
    }

    pub fn get_all(&self) -> Result<Vec<Budget>, FinanceError> {
        self.table.all()
    }

    pub fn ids(&self) -> Result<Vec<BudgetId>, FinanceError> {
        self.table.ids()
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), FinanceError> {
        self.table.upsert(budget.id, budget)
    }

    pub fn delete(&self, id: BudgetId) -> Result<bool, FinanceError> {
        Ok(self.table.remove(id)?.is_some())
    }
}
