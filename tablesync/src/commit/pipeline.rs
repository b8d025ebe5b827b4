//! Serialized, throttled store writer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::store::{QueryParamStore, WriteOptions};

/// One logical unit of key updates, applied in order.
///
/// `None` removes the key. Coupled updates (a filter value plus its page
/// reset) travel in the same batch so throttling cannot tear them apart.
pub type CommitBatch = Vec<(String, Option<String>)>;

/// Cheap handle for queueing batches into a [`CommitPipeline`].
#[derive(Clone)]
pub struct CommitHandle {
    tx: mpsc::UnboundedSender<CommitBatch>,
}

impl CommitHandle {
    /// Queue a batch. Batches queued on one pipeline apply in order.
    pub fn commit(&self, batch: CommitBatch) {
        if batch.is_empty() {
            return;
        }
        let _ = self.tx.send(batch);
    }
}

/// Applies commit batches to the store in scheduling order.
///
/// A single worker task drains the queue, so commits for a given key land
/// in the order they were scheduled. Consecutive writes are spaced at
/// least one throttle window apart; batches arriving while the pipeline
/// waits out the window coalesce key-by-key, last writer wins.
pub struct CommitPipeline {
    handle: CommitHandle,
    cancel: CancellationToken,
}

impl CommitPipeline {
    /// Spawns the writer task. Must be called inside a tokio runtime.
    pub fn spawn(
        store: Arc<dyn QueryParamStore>,
        throttle: Duration,
        options: WriteOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(run_writer(store, rx, throttle, options, cancel.clone()));
        Self {
            handle: CommitHandle { tx },
            cancel,
        }
    }

    /// Queue a batch for writing.
    pub fn commit(&self, batch: CommitBatch) {
        self.handle.commit(batch);
    }

    /// Handle for queueing from owned tasks and callbacks.
    pub fn handle(&self) -> CommitHandle {
        self.handle.clone()
    }

    /// Stop the writer, discarding anything not yet applied.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether the writer has been shut down.
    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

async fn run_writer(
    store: Arc<dyn QueryParamStore>,
    mut rx: mpsc::UnboundedReceiver<CommitBatch>,
    throttle: Duration,
    options: WriteOptions,
    cancel: CancellationToken,
) {
    let mut last_write: Option<Instant> = None;
    loop {
        let mut batch = tokio::select! {
            _ = cancel.cancelled() => break,
            batch = rx.recv() => match batch {
                Some(batch) => batch,
                None => break,
            },
        };

        // Wait out the throttle window, folding in anything that arrives
        // meanwhile. Last writer wins per key.
        if let Some(last) = last_write {
            let due = last + throttle;
            while Instant::now() < due {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = sleep_until(due) => break,
                    more = rx.recv() => match more {
                        Some(more) => merge_batch(&mut batch, more),
                        None => break,
                    },
                }
            }
        }
        while let Ok(more) = rx.try_recv() {
            merge_batch(&mut batch, more);
        }

        for (key, value) in &batch {
            if let Err(err) = store.write(key, value.as_deref(), &options).await {
                log::warn!("query param write failed for '{}': {}", key, err);
            }
        }
        last_write = Some(Instant::now());
    }
}

fn merge_batch(batch: &mut CommitBatch, incoming: CommitBatch) {
    for (key, value) in incoming {
        if let Some(existing) = batch.iter_mut().find(|(existing, _)| *existing == key) {
            existing.1 = value;
        } else {
            batch.push((key, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_batch_last_writer_wins() {
        let mut batch = vec![("a".to_string(), Some("1".to_string()))];
        merge_batch(
            &mut batch,
            vec![
                ("a".to_string(), Some("2".to_string())),
                ("b".to_string(), None),
            ],
        );
        assert_eq!(
            batch,
            vec![
                ("a".to_string(), Some("2".to_string())),
                ("b".to_string(), None),
            ]
        );
    }
}
