//! Configuration module for fintrack
//!
//! - Path resolution for data, exports, and settings
//! - User settings persistence (currency, report row limits, page geometry)

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::{PageGeometry, ReportSettings, Settings};
