//! In-process message store

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use relay_core::{MessageStore, PrivateMessageRecord, StoreError, StoreResult};

/// Keeps records in a vector; can be switched into a failing mode
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    records: Mutex<Vec<PrivateMessageRecord>>,
    failing: AtomicBool,
}

impl MemoryMessageStore {
    /// Create an empty store that accepts every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every record
    #[must_use]
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    /// Toggle the failing mode
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<PrivateMessageRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of records stored
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn record(&self, record: &PrivateMessageRecord) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }

        self.records
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".to_string()))?
            .push(record.clone());

        Ok(())
    }
}
