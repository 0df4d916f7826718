//! Document sync engine.
//!
//! Every content collection of the site is a [`SyncedDoc`]: one JSON document
//! in the store, mirrored by an in-memory value that is the single source of
//! truth for rendering once hydrated. Reads happen once per process; writes
//! are optimistic and go through the shared [`WriteQueue`].

mod confirm;
mod list;
mod writer;

pub use confirm::{Decision, DeleteFlow};
pub use list::{IdMinter, Item, MergePolicy, SyncedList, insert, remove, replace};
pub use writer::{WriteOutcome, WriteQueue, WriteTicket};

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::store::DocumentStore;

/// Whether a missing document gets the default written back on hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    OnMiss,
    Never,
}

/// Where the local state came from after a hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateSource {
    /// The stored document carried a usable value.
    Stored,
    /// Nothing (or a blank value) was stored; the default is in use.
    Default,
    /// The read failed or the stored value was unreadable; the default is in use.
    Fallback,
}

/// Factory for synced collections sharing one store and one write queue.
#[derive(Clone)]
pub struct SyncEngine {
    store: Arc<dyn DocumentStore>,
    writes: WriteQueue,
    ids: Arc<IdMinter>,
}

impl SyncEngine {
    /// Must be called from inside a tokio runtime: the write queue task is
    /// spawned here.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let writes = WriteQueue::spawn(store.clone());
        Self {
            store,
            writes,
            ids: Arc::new(IdMinter::default()),
        }
    }

    pub fn document<V>(
        &self,
        key: impl Into<String>,
        field: &'static str,
        default: V,
        seed: SeedPolicy,
    ) -> SyncedDoc<V>
    where
        V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        SyncedDoc {
            key: key.into(),
            field,
            state: RwLock::new(default.clone()),
            default,
            seed,
            store: self.store.clone(),
            writes: self.writes.clone(),
            mounted: OnceCell::new(),
        }
    }

    /// A list collection stored under the `data` field, seeded on miss.
    pub fn list<T: Item>(
        &self,
        key: impl Into<String>,
        default: Vec<T>,
        policy: MergePolicy,
    ) -> SyncedList<T> {
        let doc = self.document(key, "data", default, SeedPolicy::OnMiss);
        SyncedList::new(doc, policy, self.ids.clone())
    }

    /// Wait for every write queued so far to reach the store.
    pub async fn flush(&self) {
        self.writes.flush().await;
    }
}

pub struct SyncedDoc<V> {
    key: String,
    field: &'static str,
    default: V,
    seed: SeedPolicy,
    store: Arc<dyn DocumentStore>,
    writes: WriteQueue,
    state: RwLock<V>,
    mounted: OnceCell<HydrateSource>,
}

impl<V> SyncedDoc<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the document once and replace the local state with what was
    /// found, or with the default.
    pub async fn hydrate(&self) -> HydrateSource {
        let found = match self.store.get(&self.key).await {
            Ok(Some(doc)) => match doc.get(self.field).filter(|v| !is_blank(v)) {
                Some(raw) => match serde_json::from_value::<V>(raw.clone()) {
                    Ok(value) => Some(Ok(value)),
                    Err(e) => {
                        tracing::error!(key = %self.key, "stored value is unreadable: {}", e);
                        Some(Err(()))
                    }
                },
                None => None,
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!(key = %self.key, "{}", e);
                Some(Err(()))
            }
        };

        let mut state = self.state.write();
        match found {
            Some(Ok(value)) => {
                *state = value;
                HydrateSource::Stored
            }
            None => {
                *state = self.default.clone();
                if self.seed == SeedPolicy::OnMiss {
                    tracing::info!(key = %self.key, "seeding store with default content");
                    drop(self.submit(&state));
                }
                HydrateSource::Default
            }
            Some(Err(())) => {
                *state = self.default.clone();
                HydrateSource::Fallback
            }
        }
    }

    /// Hydrate on first use only. Later calls never touch the store.
    pub async fn mount(&self) -> HydrateSource {
        *self.mounted.get_or_init(|| self.hydrate()).await
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.initialized()
    }

    pub fn snapshot(&self) -> V {
        self.state.read().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.state.read())
    }

    /// Replace the local state, then queue the write of the new value.
    ///
    /// The local change is visible as soon as this returns, whatever the
    /// store later says. A failed write is not rolled back.
    pub fn mutate(&self, value: V) -> WriteTicket {
        let mut state = self.state.write();
        *state = value;
        self.submit(&state)
    }

    /// Like [`mutate`](Self::mutate), computing the new value from the
    /// current one under the same lock.
    pub fn update(&self, f: impl FnOnce(&V) -> V) -> WriteTicket {
        let mut state = self.state.write();
        *state = f(&state);
        self.submit(&state)
    }

    // Called with the state lock held so queue order matches state order.
    fn submit(&self, value: &V) -> WriteTicket {
        match serde_json::to_value(value) {
            Ok(encoded) => {
                let mut doc = Map::new();
                doc.insert(self.field.to_string(), encoded);
                self.writes.submit(&self.key, Value::Object(doc))
            }
            Err(e) => {
                tracing::error!(key = %self.key, "cannot encode document: {}", e);
                WriteTicket::rejected(&self.key, e.to_string())
            }
        }
    }
}

/// Values that count as "nothing stored": null, false, zero and "".
/// An empty list is a real value (every item was deleted).
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
