//! Export functionality for fintrack
//!
//! - CSV: transaction rows for a report window
//! - PDF: encoded report documents
//! - JSON/YAML: full data snapshots

pub mod csv;
pub mod json;
pub mod pdf;
pub mod yaml;

pub use self::csv::{export_transactions_csv, parse_csv, transactions_csv_string, CsvRow, CSV_HEADER};
pub use self::json::{export_snapshot_json, BudgetSnapshot, Snapshot, SnapshotMetadata, SNAPSHOT_SCHEMA_VERSION};
pub use self::pdf::{encode_pdf, export_document};
pub use self::yaml::export_snapshot_yaml;
