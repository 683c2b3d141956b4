//! In-process store used by the `memory` backend and by tests.

use std::sync::RwLock;

use async_trait::async_trait;
use indexmap::IndexMap;

use super::store::{LocalStore, StoredRecord};
use crate::error::{AppError, AppResult};

/// Insertion-ordered store. Replacing a record keeps its original position.
pub struct MemoryStore<R: StoredRecord> {
    records: RwLock<IndexMap<R::Key, R>>,
}

impl<R: StoredRecord> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    /// Builds a store pre-filled with `records`, later duplicates winning.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let map = records.into_iter().map(|r| (r.key(), r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    fn poisoned() -> AppError {
        AppError::Internal {
            source: anyhow::anyhow!("memory store lock poisoned"),
        }
    }
}

impl<R: StoredRecord> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: StoredRecord> LocalStore<R> for MemoryStore<R> {
    async fn get(&self, key: &R::Key) -> AppResult<Option<R>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.get(key).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<R>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn put(&self, record: R) -> AppResult<R> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        records.insert(record.key(), record.clone());
        Ok(record)
    }

    async fn delete(&self, key: &R::Key) -> AppResult<bool> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        Ok(records.shift_remove(key).is_some())
    }
}
