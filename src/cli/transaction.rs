//! Transaction CLI commands
//!
//! Implements CLI commands for recording, listing and editing transactions.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_table};
use crate::display::format::format_currency;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, TransactionId};
use crate::services::{CategoryService, CreateTransactionInput, TransactionService, UpdateTransactionInput};
use crate::storage::{Storage, TransactionFilter, DEFAULT_PER_PAGE};

use super::args::{parse_date, parse_kind, parse_money, WindowArgs};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount (e.g., "85.50")
        amount: String,
        /// Description
        description: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// income or expense (defaults to the category's type)
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Search descriptions
        #[arg(short, long)]
        search: Option<String>,
        #[command(flatten)]
        window: WindowArgs,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Transactions per page
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_id(id: &str) -> FinanceResult<TransactionId> {
    id.parse()
        .map_err(|_| FinanceError::Validation(format!("Invalid transaction ID: {}", id)))
}

fn find_category(storage: &Storage, identifier: &str) -> FinanceResult<Category> {
    CategoryService::new(storage)
        .find(identifier)?
        .ok_or_else(|| FinanceError::category_not_found(identifier))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();

    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let category = find_category(storage, &category)?;
            let kind = match kind {
                Some(k) => parse_kind(&k)?,
                None => category.kind,
            };
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => today,
            };

            let txn = service.create(CreateTransactionInput {
                kind,
                amount: parse_money(&amount)?,
                category_id: category.id,
                description,
                date,
            })?;

            println!(
                "Recorded {} {} in {} on {}",
                txn.kind,
                format_currency(txn.amount, symbol),
                category.name,
                txn.transaction_date
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            kind,
            category,
            search,
            window,
            page,
            per_page,
        } => {
            let mut filter = TransactionFilter::all().with_page(page, per_page);
            if let Some(k) = kind {
                filter = filter.with_kind(parse_kind(&k)?);
            }
            if let Some(c) = category {
                filter = filter.with_category(find_category(storage, &c)?.id);
            }
            if let Some(s) = search {
                filter = filter.with_search(s);
            }
            filter.date_range = window.resolve_if_set(today)?;

            let results = service.list(&filter)?;
            let categories = storage.categories.get_all()?;
            print!("{}", format_transaction_table(&results, &categories, symbol));
        }

        TransactionCommands::Show { id } => {
            let id = parse_id(&id)?;
            let txn = service
                .get(id)?
                .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;
            let categories = storage.categories.get_all()?;
            print!("{}", format_transaction_details(&txn, &categories, symbol));
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            category,
            kind,
            date,
        } => {
            let input = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
                category_id: match category {
                    Some(c) => Some(find_category(storage, &c)?.id),
                    None => None,
                },
                description,
                date: date.as_deref().map(parse_date).transpose()?,
            };

            let txn = service.update(parse_id(&id)?, input)?;
            println!("Updated transaction {}", txn.id);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(parse_id(&id)?)?;
            println!("Deleted transaction {} ({})", txn.id, txn.description);
        }
    }

    Ok(())
}
