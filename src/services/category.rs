//! Category service
//!
//! Provides business logic for category management: CRUD with name
//! validation and uniqueness.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{next_id, Category, CategoryId, EntryKind, DEFAULT_CATEGORY_COLOR};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str, kind: EntryKind, color: Option<&str>) -> FinanceResult<Category> {
        let name = name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(FinanceError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let id = next_id(self.storage.categories.ids()?);
        let category = Category::new(id, name, kind, color.unwrap_or(DEFAULT_CATEGORY_COLOR));
        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> FinanceResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// List all categories, optionally only one kind
    pub fn list(&self, kind: Option<EntryKind>) -> FinanceResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        if let Some(kind) = kind {
            categories.retain(|c| c.kind == kind);
        }
        Ok(categories)
    }

    /// Rename or recolor a category
    pub fn update(&self, id: CategoryId, name: Option<&str>, color: Option<&str>) -> FinanceResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
                if existing.id != id {
                    return Err(FinanceError::Duplicate {
                        entity_type: "Category",
                        identifier: new_name.to_string(),
                    });
                }
            }
            category.name = new_name.to_string();
        }

        if let Some(color) = color {
            category.color = color.to_string();
        }

        category
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// A category backing a budget cannot be deleted. Transactions that
    /// still reference it are reported as "Uncategorized".
    pub fn delete(&self, id: CategoryId) -> FinanceResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinanceError::category_not_found(id.to_string()))?;

        if self.storage.budgets.get_by_category(id)?.is_some() {
            return Err(FinanceError::Validation(format!(
                "Cannot delete category '{}' - a budget still uses it. Delete the budget first.",
                category.name
            )));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        Ok(category)
    }
}
