//! Category repository
//!
//! Manages loading and saving categories to categories.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::ingest::{normalize_categories, RawCategory};
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::table::Table;

#[derive(Debug, Default, Deserialize)]
struct RawCategoryData {
    #[serde(default)]
    categories: Vec<RawCategory>,
}

#[derive(Debug, Serialize)]
struct CategoryData<'a> {
    categories: &'a [Category],
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: Option<PathBuf>,
    table: Table<CategoryId, Category>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            table: Table::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            table: Table::new(),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: RawCategoryData = read_json(path)?;
        let categories = normalize_categories(file_data.categories);
        self.table.replace_all(categories.into_iter().map(|c| (c.id, c)))
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let categories = self.table.all()?;
        write_json_atomic(
            path,
            &CategoryData {
                categories: &categories,
            },
        )
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinanceError> {
        self.table.get(id)
    }

    /// Find a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinanceError> {
        let name = name.trim().to_lowercase();
        Ok(self
            .table
            .all()?
            .into_iter()
            .find(|c| c.name.to_lowercase() == name))
    }

    pub fn get_all(&self) -> Result<Vec<Category>, FinanceError> {
        self.table.all()
    }

    pub fn ids(&self) -> Result<Vec<CategoryId>, FinanceError> {
        self.table.ids()
    }

    pub fn upsert(&self, category: Category) -> Result<(), FinanceError> {
        self.table.upsert(category.id, category)
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, FinanceError> {
        Ok(self.table.remove(id)?.is_some())
    }
}
