//! Storage layer for fintrack
//!
//! In-memory repositories standing in for the finance backend, optionally
//! backed by JSON files written atomically. Reports never read the
//! repositories directly; they go through the `DataSource` trait.

pub mod budgets;
pub mod categories;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod query;
pub mod table;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::{initialize_storage, seed_demo_data};
pub use query::{Page, TransactionFilter, DEFAULT_PER_PAGE};
pub use transactions::TransactionRepository;

use chrono::Local;

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;
use crate::ingest::report_spending_drift;
use crate::models::{Budget, Category, FinancialGoal, Transaction};

/// Where record sets come from before aggregation
///
/// All record sets a report needs must be fetched before any aggregation
/// runs. Implementations report unavailability as `FinanceError::Fetch`.
pub trait DataSource {
    fn fetch_transactions(&self, filter: &TransactionFilter) -> Result<Page<Transaction>, FinanceError>;

    fn fetch_categories(&self) -> Result<Vec<Category>, FinanceError>;

    fn fetch_budgets(&self) -> Result<Vec<Budget>, FinanceError>;

    fn fetch_goals(&self) -> Result<Vec<FinancialGoal>, FinanceError>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<FinancePaths>,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub goals: GoalRepository,
}

impl Storage {
    /// Create a file-backed Storage instance
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            goals: GoalRepository::new(paths.goals_file()),
            paths: Some(paths),
        })
    }

    /// Storage that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            paths: None,
            transactions: TransactionRepository::in_memory(),
            categories: CategoryRepository::in_memory(),
            budgets: BudgetRepository::in_memory(),
            goals: GoalRepository::in_memory(),
        }
    }

    /// Get the paths configuration, if file-backed
    pub fn paths(&self) -> Option<&FinancePaths> {
        self.paths.as_ref()
    }

    /// Load all data from disk
    ///
    /// Categories load before budgets since a budget's kind follows its
    /// category.
    pub fn load_all(&self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.categories.load()?;
        let categories = self.categories.get_all()?;
        let ingested = self.budgets.load(&categories)?;
        self.goals.load()?;

        report_spending_drift(
            &ingested,
            &self.transactions.get_all()?,
            Local::now().date_naive(),
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths
            .as_ref()
            .is_some_and(|paths| paths.is_initialized())
    }
}

fn fetch_failed(what: &str) -> impl FnOnce(FinanceError) -> FinanceError + '_ {
    move |e| FinanceError::Fetch(format!("could not fetch {}: {}", what, e))
}

impl DataSource for Storage {
    fn fetch_transactions(&self, filter: &TransactionFilter) -> Result<Page<Transaction>, FinanceError> {
        self.transactions
            .query(filter)
            .map_err(fetch_failed("transactions"))
    }

    fn fetch_categories(&self) -> Result<Vec<Category>, FinanceError> {
        self.categories.get_all().map_err(fetch_failed("categories"))
    }

    fn fetch_budgets(&self) -> Result<Vec<Budget>, FinanceError> {
        self.budgets.get_all().map_err(fetch_failed("budgets"))
    }

    fn fetch_goals(&self) -> Result<Vec<FinancialGoal>, FinanceError> {
        self.goals.get_all().map_err(fetch_failed("goals"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, EntryKind};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_reload_everything() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        seed_demo_data(&storage).unwrap();
        storage.save_all().unwrap();

        let reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.transactions.count().unwrap(), 5);
        assert_eq!(reloaded.budgets.get_all().unwrap(), storage.budgets.get_all().unwrap());
        assert_eq!(reloaded.goals.get_all().unwrap().len(), 2);
    }

    #[test]
    fn test_fetch_transactions_filters_and_pages() {
        let storage = Storage::in_memory();
        seed_demo_data(&storage).unwrap();

        let expenses = storage
            .fetch_transactions(&TransactionFilter::all().with_kind(EntryKind::Expense))
            .unwrap();
        assert_eq!(expenses.total, 4);

        let page = storage
            .fetch_transactions(&TransactionFilter::all().with_page(2, 2))
            .unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.data.len(), 2);

        let food = storage
            .fetch_transactions(&TransactionFilter::all().with_category(CategoryId::new(1)))
            .unwrap();
        assert_eq!(food.data[0].description, "Grocery shopping");
    }

    #[test]
    fn test_fetches_return_copies() {
        let storage = Storage::in_memory();
        seed_demo_data(&storage).unwrap();

        let mut categories = storage.fetch_categories().unwrap();
        categories[0].name = "Changed".into();
        assert_eq!(
            storage.fetch_categories().unwrap()[0].name,
            "Food & Dining"
        );
    }
}
