//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, id assignment, and derived spending.

pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use budget::{derive_statuses, BudgetService, BudgetSummary};
pub use category::CategoryService;
pub use goal::{CreateGoalInput, GoalService};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
