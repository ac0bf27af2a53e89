//! Goal CLI commands
//!
//! Implements CLI commands for savings goals.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format::{format_currency, format_percentage};
use crate::display::goal::{format_goal_details, format_goal_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{FinancialGoal, GoalStatus, Money};
use crate::services::{CreateGoalInput, GoalService};
use crate::storage::Storage;

use super::args::{parse_date, parse_money};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals
    List {
        /// Only goals still in progress
        #[arg(long, conflicts_with = "completed")]
        active: bool,
        /// Only completed goals
        #[arg(long)]
        completed: bool,
    },

    /// Create a goal
    Add {
        /// Goal title
        title: String,
        /// Target amount
        target: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// emergency, housing, vehicle, travel, education or other
        #[arg(short, long, default_value = "other")]
        category: String,
        /// high, medium or low
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        by: Option<String>,
        /// Amount already saved
        #[arg(long)]
        saved: Option<String>,
    },

    /// Show goal details
    Show {
        /// Goal title or ID
        goal: String,
    },

    /// Add money to a goal
    Fund {
        /// Goal title or ID
        goal: String,
        /// Amount to add
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal title or ID
        goal: String,
    },
}

fn find_goal(service: &GoalService<'_>, identifier: &str) -> FinanceResult<FinancialGoal> {
    service
        .find(identifier)?
        .ok_or_else(|| FinanceError::goal_not_found(identifier))
}

/// Handle a goal command
pub fn handle_goal_command(storage: &Storage, settings: &Settings, cmd: GoalCommands) -> FinanceResult<()> {
    let service = GoalService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::List { active, completed } => {
            let status = if active {
                Some(GoalStatus::InProgress)
            } else if completed {
                Some(GoalStatus::Completed)
            } else {
                None
            };
            print!("{}", format_goal_list(&service.list(status)?, symbol));
        }

        GoalCommands::Add {
            title,
            target,
            description,
            category,
            priority,
            by,
            saved,
        } => {
            let mut input = CreateGoalInput::new(title, parse_money(&target)?);
            input.description = description.unwrap_or_default();
            input.category = category.parse().map_err(FinanceError::Validation)?;
            input.priority = priority.parse().map_err(FinanceError::Validation)?;
            input.target_date = by.as_deref().map(parse_date).transpose()?;
            input.current_amount = match saved {
                Some(s) => parse_money(&s)?,
                None => Money::zero(),
            };

            let goal = service.create(input)?;
            println!(
                "Created goal: {} (target {})",
                goal.title,
                format_currency(goal.target_amount, symbol)
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::Show { goal } => {
            let goal = find_goal(&service, &goal)?;
            print!("{}", format_goal_details(&goal, symbol));
        }

        GoalCommands::Fund { goal, amount } => {
            let existing = find_goal(&service, &goal)?;
            let updated = service.add_funds(existing.id, parse_money(&amount)?)?;

            println!(
                "{}: {} of {} ({})",
                updated.title,
                format_currency(updated.current_amount, symbol),
                format_currency(updated.target_amount, symbol),
                format_percentage(updated.progress())
            );
            if updated.status == GoalStatus::Completed && existing.status != GoalStatus::Completed {
                println!("Goal reached!");
            }
        }

        GoalCommands::Delete { goal } => {
            let existing = find_goal(&service, &goal)?;
            service.delete(existing.id)?;
            println!("Deleted goal: {}", existing.title);
        }
    }

    Ok(())
}
