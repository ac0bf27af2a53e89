//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::display::category::format_category_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::EntryKind;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::args::parse_kind;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or only expense categories
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Hex color, e.g. "#ef4444"
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinanceResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kind: Option<EntryKind> = kind.as_deref().map(parse_kind).transpose()?;
            let categories = service.list(kind)?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add { name, kind, color } => {
            let category = service.create(&name, parse_kind(&kind)?, color.as_deref())?;
            println!("Created category: {}", category.name);
            println!("  Type: {}", category.kind);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            color,
        } => {
            let existing = service
                .find(&category)?
                .ok_or_else(|| FinanceError::category_not_found(&category))?;
            let updated = service.update(existing.id, name.as_deref(), color.as_deref())?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let existing = service
                .find(&category)?
                .ok_or_else(|| FinanceError::category_not_found(&category))?;
            service.delete(existing.id)?;
            println!("Deleted category: {}", existing.name);
        }
    }

    Ok(())
}
