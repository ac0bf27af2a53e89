//! Budget CLI commands
//!
//! Implements CLI commands for budget limits and the spending view.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::budget::{format_budget_list, format_budget_summary};
use crate::display::format::{format_currency, format_period};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, BudgetPeriod};
use crate::services::{BudgetService, BudgetSummary, CategoryService};
use crate::storage::Storage;

use super::args::{parse_money, WindowArgs};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets with spending for a window
    List {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Create a budget for a category
    Add {
        /// Category name or ID
        category: String,
        /// Limit (e.g., "500" or "500.00")
        limit: String,
        /// weekly, monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Change a budget's limit
    #[command(name = "set-limit")]
    SetLimit {
        /// Category name or budget ID
        budget: String,
        /// New limit
        limit: String,
        /// New period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Category name or budget ID
        budget: String,
    },
}

fn parse_period(s: &str) -> FinanceResult<BudgetPeriod> {
    s.parse().map_err(FinanceError::Validation)
}

fn find_budget(service: &BudgetService<'_>, identifier: &str) -> FinanceResult<Budget> {
    service
        .find(identifier)?
        .ok_or_else(|| FinanceError::budget_not_found(identifier))
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, settings: &Settings, cmd: BudgetCommands) -> FinanceResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List { window } => {
            let range = window.resolve(Local::now().date_naive())?;
            let statuses = service.with_spending(&range)?;

            println!("Budgets for {}", format_period(&range));
            print!("{}", format_budget_list(&statuses, symbol));
            if !statuses.is_empty() {
                println!();
                print!("{}", format_budget_summary(&BudgetSummary::from_statuses(&statuses), symbol));
            }
        }

        BudgetCommands::Add {
            category,
            limit,
            period,
        } => {
            let category = CategoryService::new(storage)
                .find(&category)?
                .ok_or_else(|| FinanceError::category_not_found(&category))?;
            let budget = service.create(category.id, parse_money(&limit)?, parse_period(&period)?)?;

            println!(
                "Created {} budget for {}: {}",
                budget.period,
                category.name,
                format_currency(budget.limit, symbol)
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::SetLimit {
            budget,
            limit,
            period,
        } => {
            let existing = find_budget(&service, &budget)?;
            let period = period.as_deref().map(parse_period).transpose()?;
            let updated = service.update(existing.id, Some(parse_money(&limit)?), period)?;

            println!(
                "Budget {} limit set to {} ({})",
                updated.id,
                format_currency(updated.limit, symbol),
                updated.period
            );
        }

        BudgetCommands::Delete { budget } => {
            let existing = find_budget(&service, &budget)?;
            service.delete(existing.id)?;
            println!("Deleted budget {}", existing.id);
        }
    }

    Ok(())
}
