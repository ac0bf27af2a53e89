//! Transaction service
//!
//! Provides business logic for transaction management: CRUD with
//! validation, and filtered listings.

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{next_id, CategoryId, EntryKind, Money, Transaction, TransactionId};
use crate::storage::{Page, Storage, TransactionFilter};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: EntryKind,
    pub amount: Money,
    pub category_id: CategoryId,
    pub description: String,
    pub date: NaiveDate,
}

/// Fields that may change on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<EntryKind>,
    pub amount: Option<Money>,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinanceResult<Transaction> {
        let id = next_id(self.storage.transactions.ids()?);
        let txn = Transaction::new(
            id,
            input.kind,
            input.amount,
            input.category_id,
            input.description.trim(),
            input.date,
        );

        self.check(&txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::debug!(id = %txn.id, amount = %txn.amount, "created transaction");
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Query transactions, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FinanceResult<Page<Transaction>> {
        self.storage.transactions.query(filter)
    }

    /// Update an existing transaction
    pub fn update(&self, id: TransactionId, input: UpdateTransactionInput) -> FinanceResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        if let Some(kind) = input.kind {
            txn.kind = kind;
        }
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(category_id) = input.category_id {
            txn.category_id = category_id;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(date) = input.date {
            txn.transaction_date = date;
        }

        self.check(&txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> FinanceResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Model validation plus the category pairing rule: when the category
    /// exists its kind must match the transaction's.
    fn check(&self, txn: &Transaction) -> FinanceResult<()> {
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        if let Some(category) = self.storage.categories.get(txn.category_id)? {
            if category.kind != txn.kind {
                return Err(FinanceError::Validation(format!(
                    "Category '{}' is an {} category and cannot hold an {} transaction",
                    category.name, category.kind, txn.kind
                )));
            }
        }

        Ok(())
    }
}
