use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::{error::StoreError, store::DocumentStore};

enum Job {
    Put {
        key: String,
        document: Value,
        done: oneshot::Sender<Result<(), StoreError>>,
    },
    Barrier(oneshot::Sender<()>),
}

/// Sequential writer in front of a `DocumentStore`.
///
/// Jobs are applied one at a time in submission order, so two mutations of
/// the same collection can never land in the store out of order.
#[derive(Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl WriteQueue {
    /// Spawn the writer task on the current tokio runtime.
    pub fn spawn(store: Arc<dyn DocumentStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, rx));
        Self { tx }
    }

    /// Queue a whole-document write. Never blocks.
    pub fn submit(&self, key: &str, document: Value) -> WriteTicket {
        let (done, rx) = oneshot::channel();
        let job = Job::Put {
            key: key.to_string(),
            document,
            done,
        };
        if self.tx.send(job).is_err() {
            tracing::error!(key, "write queue is closed; write dropped");
        }
        WriteTicket {
            key: key.to_string(),
            rx,
        }
    }

    /// Wait until every write submitted before this call has been applied.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(Job::Barrier(tx)).is_ok() {
            rx.await.ok();
        }
    }
}

async fn run(store: Arc<dyn DocumentStore>, mut rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        match job {
            Job::Put {
                key,
                document,
                done,
            } => {
                let result = store.set(&key, &document).await;
                match &result {
                    Ok(()) => tracing::debug!(
                        key = %key,
                        backend = store.backend_tag(),
                        "document written"
                    ),
                    Err(e) => tracing::error!(key = %key, backend = store.backend_tag(), "{}", e),
                }
                // Nobody waiting is the fire-and-forget case.
                done.send(result).ok();
            }
            Job::Barrier(ack) => {
                ack.send(()).ok();
            }
        }
    }
    tracing::debug!("write queue drained");
}

/// Handle on one queued write. Drop it to fire and forget.
#[must_use = "drop the ticket explicitly if the write outcome does not matter"]
pub struct WriteTicket {
    key: String,
    rx: oneshot::Receiver<Result<(), StoreError>>,
}

#[derive(Debug)]
pub enum WriteOutcome {
    Persisted,
    Failed(StoreError),
    /// The writer went away before reporting.
    Dropped,
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted)
    }
}

impl WriteTicket {
    /// A ticket for a write that never made it into the queue.
    pub(crate) fn rejected(key: &str, reason: String) -> Self {
        let (tx, rx) = oneshot::channel();
        tx.send(Err(StoreError::Write {
            key: key.to_string(),
            reason,
        }))
        .ok();
        Self {
            key: key.to_string(),
            rx,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Wait for the store to acknowledge (or reject) this write.
    pub async fn outcome(self) -> WriteOutcome {
        match self.rx.await {
            Ok(Ok(())) => WriteOutcome::Persisted,
            Ok(Err(e)) => WriteOutcome::Failed(e),
            Err(_) => WriteOutcome::Dropped,
        }
    }
}
