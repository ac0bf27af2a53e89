//! CLI commands for reports
//!
//! The terminal overview plus the two PDF documents. Every command fetches
//! all of its record sets before anything is aggregated.

use std::path::Path;

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::format_overview;
use crate::error::FinanceResult;
use crate::export::pdf::export_document;
use crate::reports::{build_budget_report, build_report, Overview, ReportDocument, ReportInputs};
use crate::storage::{DataSource, Storage, TransactionFilter};

use super::args::{OutputArgs, WindowArgs};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show totals, breakdown, monthly trend and insights
    Summary {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Write the financial report PDF
    Financial {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the budget analysis PDF
    Budget {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    export_dir: &Path,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Summary { window } => {
            let inputs = ReportInputs::fetch(storage, window.resolve(today)?)?;
            let history = storage.fetch_transactions(&TransactionFilter::all())?.data;
            let overview = Overview::build(&inputs, &history, settings.report.monthly_series_months);
            print!("{}", format_overview(&overview, &settings.currency_symbol));
        }

        ReportCommands::Financial { window, output } => {
            let inputs = ReportInputs::fetch(storage, window.resolve(today)?)?;
            let document = build_report(
                &inputs.transactions,
                &inputs.budgets,
                &inputs.categories,
                &inputs.range,
                settings,
            );
            write_document(&document, settings, export_dir, &output)?;
        }

        ReportCommands::Budget { window, output } => {
            let inputs = ReportInputs::fetch(storage, window.resolve(today)?)?;
            let document = build_budget_report(&inputs.budget_statuses(), &inputs.range, settings);
            write_document(&document, settings, export_dir, &output)?;
        }
    }

    Ok(())
}

fn write_document(
    document: &ReportDocument,
    settings: &Settings,
    export_dir: &Path,
    output: &OutputArgs,
) -> FinanceResult<()> {
    let bytes = export_document(document, &settings.report.page)?;
    let path = output.write(export_dir, &document.file_name(), &bytes)?;
    println!("{} written to: {}", document.kind.title(), path.display());
    Ok(())
}
