use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
};
use tokio::sync::Mutex;

use super::DocumentStore;
use crate::error::StoreError;

/// Process-local store used by `--ephemeral` runs and by tests.
///
/// Reads and writes can be switched to fail so callers can exercise the
/// degraded paths of the sync engine.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, Value>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls seen so far, failed ones included.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `set` calls seen so far, failed ones included.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Peek at a stored document without counting as a read.
    pub async fn raw(&self, key: &str) -> Option<Value> {
        self.docs.lock().await.get(key).cloned()
    }

    /// Put a document in place without counting as a write.
    pub async fn insert_raw(&self, key: &str, document: Value) {
        self.docs.lock().await.insert(key.to_string(), document);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Read {
                key: key.to_string(),
                reason: "memory store configured to fail reads".to_string(),
            });
        }
        Ok(self.docs.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "memory store configured to fail writes".to_string(),
            });
        }
        self.docs
            .lock()
            .await
            .insert(key.to_string(), document.clone());
        Ok(())
    }
}
