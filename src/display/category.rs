//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, EntryKind};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: EntryKind,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format categories as a table, expense categories first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'fintrack init' to create the default categories.\n".to_string();
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| (c.kind == EntryKind::Income, c.id));

    let rows = sorted.into_iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        kind: c.kind,
        color: c.color.clone(),
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}
