//! Category model
//!
//! Categories label transactions and back budgets. A category's kind
//! constrains which transactions and budgets may reference it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::EntryKind;

/// Label used wherever a category reference cannot be resolved
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Display color used when a category has none
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Display token, e.g. "#ef4444"
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, name: impl Into<String>, kind: EntryKind, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            color: color.into(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let cat = Category::new(CategoryId::new(1), "Food & Dining", EntryKind::Expense, "#ef4444");
        assert!(cat.validate().is_ok());

        let empty = Category::new(CategoryId::new(2), " ", EntryKind::Expense, "#000000");
        assert_eq!(empty.validate(), Err(CategoryValidationError::EmptyName));

        let long = Category::new(CategoryId::new(3), "x".repeat(51), EntryKind::Income, "#000000");
        assert_eq!(long.validate(), Err(CategoryValidationError::NameTooLong(51)));
    }

    #[test]
    fn test_missing_color_defaults() {
        let cat: Category =
            serde_json::from_str(r#"{"id":8,"name":"Salary","type":"income"}"#).unwrap();
        assert_eq!(cat.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(cat.kind, EntryKind::Income);
    }
}
