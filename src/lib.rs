//! fintrack - personal finance tracking with paginated reports
//!
//! Transactions, categories, budgets and savings goals, plus a report
//! pipeline that turns them into terminal summaries, CSV files and
//! multi-page PDF documents.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Custom error types
//! - `models`: Strictly-typed records and value types
//! - `ingest`: Normalization of loosely-shaped stored records
//! - `storage`: Repositories and the `DataSource` seam
//! - `services`: CRUD with validation, derived budget spending
//! - `reports`: Aggregation, budget evaluation, documents and layout
//! - `export`: CSV, PDF, JSON and YAML writers
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::reports::{build_report, ReportInputs};
//! use fintrack::export::export_document;
//!
//! let inputs = ReportInputs::fetch(&storage, range)?;
//! let doc = build_report(&inputs.transactions, &inputs.budgets, &inputs.categories, &range, &settings);
//! let pdf = export_document(&doc, &settings.report.page)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
