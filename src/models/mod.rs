//! Core data models for fintrack
//!
//! Strictly-typed records: transactions, categories, budgets, goals, and the
//! money/period value types they are built from. Loosely-shaped input is
//! converted into these types by the `ingest` module before any
//! aggregation runs.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetStatus};
pub use category::{Category, DEFAULT_CATEGORY_COLOR, UNCATEGORIZED};
pub use goal::{FinancialGoal, GoalCategory, GoalPriority, GoalStatus};
pub use ids::{next_id, BudgetId, CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use period::{BudgetPeriod, DateRange};
pub use transaction::{EntryKind, Transaction};
