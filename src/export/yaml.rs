//! YAML Export functionality
//!
//! The same snapshot as the JSON export, in a human-readable form.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::export::json::Snapshot;
use crate::storage::DataSource;

/// Export a snapshot to YAML with a short comment header
pub fn export_snapshot_yaml<W: Write>(
    source: &dyn DataSource,
    as_of: NaiveDate,
    writer: &mut W,
) -> FinanceResult<()> {
    let snapshot = Snapshot::from_source(source, as_of)?;
    let export_err = |e: std::io::Error| FinanceError::Export(e.to_string());

    writeln!(writer, "# fintrack data snapshot").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", snapshot.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", snapshot.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}
