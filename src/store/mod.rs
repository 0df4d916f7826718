//! Durable document storage.
//!
//! The site keeps every content collection as one JSON document addressed by
//! `(COLLECTION, key)`. Backends only need whole-document get and set: no
//! queries, transactions or partial updates.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Name of the single document collection the portfolio lives in.
pub const COLLECTION: &str = "portfolio";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in log lines.
    fn backend_tag(&self) -> &'static str;

    /// Fetch a document. `Ok(None)` means it does not exist.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace a document wholesale, creating it if needed.
    async fn set(&self, key: &str, document: &Value) -> Result<(), StoreError>;
}
