//! Transaction repository
//!
//! Keeps transactions in memory and persists them to transactions.json.
//! Records are read back through the normalization boundary, so legacy
//! files with string amounts or nested categories load cleanly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::ingest::{normalize_transactions, RawTransaction};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::query::{Page, TransactionFilter};
use super::table::Table;

#[derive(Debug, Default, Deserialize)]
struct RawTransactionData {
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

#[derive(Debug, Serialize)]
struct TransactionData<'a> {
    transactions: &'a [Transaction],
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: Option<PathBuf>,
    table: Table<TransactionId, Transaction>,
}

impl TransactionRepository {
    /// Create a repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            table: Table::new(),
        }
    }

    /// Create a repository that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            table: Table::new(),
        }
    }

    /// Load transactions from disk, normalizing every record
    pub fn load(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: RawTransactionData = read_json(path)?;
        let transactions = normalize_transactions(file_data.transactions);
        tracing::debug!(count = transactions.len(), "loaded transactions");
        self.table
            .replace_all(transactions.into_iter().map(|t| (t.id, t)))
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let page = TransactionFilter::all().apply(self.table.all()?);
        write_json_atomic(
            path,
            &TransactionData {
                transactions: &page.data,
            },
        )
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        self.table.get(id)
    }

    /// All transactions in id order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        self.table.all()
    }

    /// Filtered, newest-first, optionally paginated query
    pub fn query(&self, filter: &TransactionFilter) -> Result<Page<Transaction>, FinanceError> {
        Ok(filter.apply(self.table.all()?))
    }

    pub fn ids(&self) -> Result<Vec<TransactionId>, FinanceError> {
        self.table.ids()
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        self.table.len()
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinanceError> {
        self.table.upsert(txn.id, txn)
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, FinanceError> {
        Ok(self.table.remove(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, EntryKind, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn txn(id: u64, day: u32) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            EntryKind::Expense,
            Money::from_cents(1234),
            CategoryId::new(1),
            "Coffee",
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");

        let repo = TransactionRepository::new(path.clone());
        repo.upsert(txn(1, 5)).unwrap();
        repo.upsert(txn(2, 9)).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_all().unwrap(), vec![txn(1, 5), txn(2, 9)]);
    }

    #[test]
    fn test_loads_legacy_shapes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        std::fs::write(
            &path,
            r#"{"transactions": [
                {"id": 7, "type": "expense", "amount": "85.50",
                 "category": {"id": 2, "name": "Transportation"},
                 "description": "Gas station", "transaction_date": "2024-01-12"}
            ]}"#,
        )
        .unwrap();

        let repo = TransactionRepository::new(path);
        repo.load().unwrap();
        let loaded = repo.get(TransactionId::new(7)).unwrap().unwrap();
        assert_eq!(loaded.amount.cents(), 8550);
        assert_eq!(loaded.category_id, CategoryId::new(2));
    }

    #[test]
    fn test_delete() {
        let repo = TransactionRepository::in_memory();
        repo.upsert(txn(1, 5)).unwrap();
        assert!(repo.delete(TransactionId::new(1)).unwrap());
        assert!(!repo.delete(TransactionId::new(1)).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
