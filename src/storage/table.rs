//! Lock-guarded in-memory record table shared by the repositories
//!
//! Every read hands out clones, so callers never observe a collection while
//! another writer is halfway through changing it.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinanceError;

/// Ordered map of records keyed by id
pub struct Table<K, V> {
    rows: RwLock<BTreeMap<K, V>>,
}

impl<K: Ord + Copy, V: Clone> Table<K, V> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<K, V>>, FinanceError> {
        self.rows
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<K, V>>, FinanceError> {
        self.rows
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn get(&self, id: K) -> Result<Option<V>, FinanceError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in id order
    pub fn all(&self) -> Result<Vec<V>, FinanceError> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub fn ids(&self) -> Result<Vec<K>, FinanceError> {
        Ok(self.read()?.keys().copied().collect())
    }

    pub fn len(&self) -> Result<usize, FinanceError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, FinanceError> {
        Ok(self.read()?.is_empty())
    }

    /// Insert or replace a record
    pub fn upsert(&self, id: K, value: V) -> Result<(), FinanceError> {
        self.write()?.insert(id, value);
        Ok(())
    }

    /// Remove a record, returning it if it existed
    pub fn remove(&self, id: K) -> Result<Option<V>, FinanceError> {
        Ok(self.write()?.remove(&id))
    }

    /// Swap the whole contents in one write
    pub fn replace_all(&self, rows: impl IntoIterator<Item = (K, V)>) -> Result<(), FinanceError> {
        let mut guard = self.write()?;
        guard.clear();
        guard.extend(rows);
        Ok(())
    }
}

impl<K: Ord + Copy, V: Clone> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_copies() {
        let table: Table<u64, String> = Table::new();
        table.upsert(1, "a".into()).unwrap();

        let mut snapshot = table.all().unwrap();
        snapshot[0].push('!');

        assert_eq!(table.get(1).unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_replace_and_remove() {
        let table: Table<u64, u32> = Table::new();
        table.replace_all(vec![(2, 20), (1, 10)]).unwrap();
        assert_eq!(table.all().unwrap(), vec![10, 20]);
        assert_eq!(table.remove(1).unwrap(), Some(10));
        assert_eq!(table.remove(1).unwrap(), None);
        assert_eq!(table.ids().unwrap(), vec![2]);
    }
}
