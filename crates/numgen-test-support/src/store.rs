//! In-memory and failing `HistoryStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use numgen_core::error::DomainError;
use numgen_core::store::{HistoryStore, StoredEntry};

/// A history store held in memory. Returns whatever was last saved (or the
/// initial entries) and counts `save` calls.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<StoredEntry>>,
    saves: Mutex<usize>,
}

impl InMemoryHistoryStore {
    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn new(entries: Vec<StoredEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: Mutex::new(0),
        }
    }

    /// Returns a snapshot of the currently stored entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn entries(&self) -> Vec<StoredEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Returns how many times `save` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> Result<Vec<StoredEntry>, DomainError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn save(&self, entries: &[StoredEntry]) -> Result<(), DomainError> {
        *self.entries.lock().unwrap() = entries.to_vec();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A history store that always returns an infrastructure error. Useful for
/// testing that persistence stays best-effort.
#[derive(Debug)]
pub struct FailingHistoryStore;

#[async_trait]
impl HistoryStore for FailingHistoryStore {
    async fn load(&self) -> Result<Vec<StoredEntry>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save(&self, _entries: &[StoredEntry]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
