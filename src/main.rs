use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use fintrack::cli::{
    handle_budget_command, handle_category_command, handle_export_command, handle_goal_command,
    handle_report_command, handle_transaction_command, BudgetCommands, CategoryCommands,
    ExportCommands, GoalCommands, ReportCommands, TransactionCommands,
};
use fintrack::config::{paths::FinancePaths, settings::Settings};
use fintrack::display::format::{format_currency, format_period};
use fintrack::models::DateRange;
use fintrack::services::BudgetService;
use fintrack::storage::{initialize_storage, seed_demo_data, Storage};

/// Environment variable holding the log filter
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracking with budgets, goals and PDF/CSV reports",
    long_about = "fintrack records income and expenses by category, tracks budget \
                  limits and savings goals, and produces paginated PDF reports and \
                  CSV exports for any date window."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and demo data
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Summaries and PDF reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// CSV, JSON and YAML exports
    #[command(subcommand)]
    Export(ExportCommands),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let export_dir = paths.export_dir();

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;

            if seed_demo_data(&storage)? {
                storage.save_all()?;
                println!("Demo data created: 10 categories, 5 transactions, 3 budgets, 2 goals.");
            } else {
                println!("Existing data found; demo data was not added.");
            }
            println!();
            println!("Run 'fintrack report summary --from 2024-01-01 --to 2024-01-31' to see the demo month.");
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", export_dir.display());
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Breakdown rows:    {}", settings.report.breakdown_rows);
            println!("  Budget rows:       {}", settings.report.budget_rows);
            println!("  Ledger rows:       {}", settings.report.ledger_rows);
            println!("  Monthly series:    {} months", settings.report.monthly_series_months);
        }
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, &export_dir, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &export_dir, cmd)?,
        None => {
            let range = DateRange::month_to_date(Local::now().date_naive());
            let summary = BudgetService::new(&storage).summary(&range)?;

            println!("fintrack - personal finance tracking");
            println!();
            println!(
                "{}: {} spent of {} budgeted",
                format_period(&range),
                format_currency(summary.total_spent, &settings.currency_symbol),
                format_currency(summary.total_budget, &settings.currency_symbol)
            );
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
