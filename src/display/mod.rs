//! Display formatting for terminal output
//!
//! Tables and detail views for each record type, the dashboard overview,
//! and the shared currency/date/percentage formatters.

pub mod budget;
pub mod category;
pub mod format;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_list, format_budget_summary};
pub use category::format_category_list;
pub use goal::{format_goal_details, format_goal_list};
pub use report::format_overview;
pub use transaction::{format_transaction_details, format_transaction_table};
