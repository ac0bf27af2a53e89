//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::path::Path;

use chrono::Local;
use clap::Subcommand;

use crate::error::FinanceResult;
use crate::export::{export_snapshot_json, export_snapshot_yaml, export_transactions_csv};
use crate::storage::{DataSource, Storage, TransactionFilter};

use super::args::{OutputArgs, WindowArgs};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the window's transactions to CSV
    Csv {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Export a full data snapshot as JSON
    Json {
        #[command(flatten)]
        output: OutputArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Export a full data snapshot as YAML
    Yaml {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, export_dir: &Path, cmd: ExportCommands) -> FinanceResult<()> {
    let today = Local::now().date_naive();
    let snapshot_name = |ext: &str| format!("snapshot-{}.{}", today.format("%Y-%m-%d"), ext);

    match cmd {
        ExportCommands::Csv { window, output } => {
            let range = window.resolve(today)?;
            let transactions = storage
                .fetch_transactions(&TransactionFilter::in_range(range))?
                .data;
            let categories = storage.fetch_categories()?;

            let mut buffer = Vec::new();
            export_transactions_csv(&transactions, &categories, &mut buffer)?;
            let path = output.write(export_dir, &range.file_name("transactions", "csv"), &buffer)?;

            println!("Exported {} transactions to: {}", transactions.len(), path.display());
        }

        ExportCommands::Json { output, pretty } => {
            let mut buffer = Vec::new();
            export_snapshot_json(storage, today, &mut buffer, pretty)?;
            let path = output.write(export_dir, &snapshot_name("json"), &buffer)?;
            println!("Snapshot exported to: {}", path.display());
        }

        ExportCommands::Yaml { output } => {
            let mut buffer = Vec::new();
            export_snapshot_yaml(storage, today, &mut buffer)?;
            let path = output.write(export_dir, &snapshot_name("yaml"), &buffer)?;
            println!("Snapshot exported to: {}", path.display());
        }
    }

    Ok(())
}
