use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use super::{DeleteFlow, HydrateSource, SyncedDoc, WriteTicket};

/// A record in a list collection, addressed by a per-collection id.
pub trait Item: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Where new items land in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    Prepend,
    Append,
}

/// Mints item ids from the current millisecond timestamp.
///
/// Ids are strictly increasing within one process, so two items created in
/// the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdMinter {
    last: AtomicI64,
}

impl IdMinter {
    pub fn mint(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        now.max(prev + 1).to_string()
    }
}

pub fn insert<T: Item>(items: &[T], item: T, policy: MergePolicy) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    match policy {
        MergePolicy::Prepend => {
            out.push(item);
            out.extend_from_slice(items);
        }
        MergePolicy::Append => {
            out.extend_from_slice(items);
            out.push(item);
        }
    }
    out
}

/// Swap the item with `id` for `item`, keeping `id`. Unknown ids change nothing.
pub fn replace<T: Item>(items: &[T], id: &str, item: T) -> Vec<T> {
    items
        .iter()
        .map(|existing| {
            if existing.id() == id {
                let mut patched = item.clone();
                patched.set_id(id.to_string());
                patched
            } else {
                existing.clone()
            }
        })
        .collect()
}

pub fn remove<T: Item>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|i| i.id() != id).cloned().collect()
}

/// A synced list collection with item-level operations.
pub struct SyncedList<T> {
    doc: SyncedDoc<Vec<T>>,
    policy: MergePolicy,
    ids: Arc<IdMinter>,
}

impl<T: Item> SyncedList<T> {
    pub(super) fn new(doc: SyncedDoc<Vec<T>>, policy: MergePolicy, ids: Arc<IdMinter>) -> Self {
        Self { doc, policy, ids }
    }

    pub fn doc(&self) -> &SyncedDoc<Vec<T>> {
        &self.doc
    }

    pub fn key(&self) -> &str {
        self.doc.key()
    }

    pub async fn mount(&self) -> HydrateSource {
        self.doc.mount().await
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.doc.snapshot()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.doc.read(|items| items.iter().find(|i| i.id() == id).cloned())
    }

    /// Give `item` a fresh id and insert it by this list's merge policy.
    pub fn add_item(&self, mut item: T) -> (String, WriteTicket) {
        let id = self.ids.mint();
        item.set_id(id.clone());
        let policy = self.policy;
        let ticket = self.doc.update(|items| insert(items, item, policy));
        (id, ticket)
    }

    /// Replace the item with `id`. The whole list is written even when the
    /// id is unknown and nothing changed locally.
    pub fn edit_item(&self, id: &str, item: T) -> WriteTicket {
        self.doc.update(|items| replace(items, id, item))
    }

    /// Remove the item named by an applied delete flow.
    pub fn remove_item(&self, flow: &DeleteFlow) -> Option<WriteTicket> {
        let id = flow.applied_id()?;
        Some(self.doc.update(|items| remove(items, id)))
    }
}
