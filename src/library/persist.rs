//! Write-behind persistence queue.
//!
//! One worker task per queue. Submitting a document replaces whatever is still
//! pending, so bursts of edits collapse into a single write of the latest value.
//! At most one write is in flight at any time, which keeps writes in submission
//! order at the store. Failed writes are logged and counted, never retried.

use crate::store::LibraryStore;
use crate::types::RepoLibrary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Clone, Default)]
struct Pending {
    revision: u64,
    library: Option<Arc<RepoLibrary>>,
}

pub struct PersistQueue {
    pending: watch::Sender<Pending>,
    settled: watch::Receiver<u64>,
    next_revision: AtomicU64,
    failures: Arc<AtomicU64>,
}

impl PersistQueue {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn LibraryStore>, debounce: Duration) -> Self {
        let (pending_tx, pending_rx) = watch::channel(Pending::default());
        let (settled_tx, settled_rx) = watch::channel(0u64);
        let failures = Arc::new(AtomicU64::new(0));

        // The worker exits once the queue (and with it the sender) is dropped,
        // after writing whatever was still pending.
        tokio::spawn(Self::worker_loop(
            store,
            pending_rx,
            settled_tx,
            debounce,
            Arc::clone(&failures),
        ));

        Self {
            pending: pending_tx,
            settled: settled_rx,
            next_revision: AtomicU64::new(0),
            failures,
        }
    }

    /// Queue `library` for writing, replacing any document not yet written.
    /// Returns the revision number assigned to it.
    pub fn submit(&self, library: Arc<RepoLibrary>) -> u64 {
        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        self.pending.send_replace(Pending {
            revision,
            library: Some(library),
        });
        debug!(revision, "Queued library write");
        revision
    }

    /// Wait until every submitted revision has been written (or has failed).
    pub async fn flush(&self) {
        let target = self.pending.borrow().revision;
        if target == 0 {
            return;
        }
        let mut settled = self.settled.clone();
        if settled.wait_for(|done| *done >= target).await.is_err() {
            warn!(target, "Persistence worker stopped before flush completed");
        }
    }

    /// Number of writes that failed since the queue started.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Highest revision handed to the store so far.
    pub fn settled_revision(&self) -> u64 {
        *self.settled.borrow()
    }

    async fn worker_loop(
        store: Arc<dyn LibraryStore>,
        mut pending: watch::Receiver<Pending>,
        settled: watch::Sender<u64>,
        debounce: Duration,
        failures: Arc<AtomicU64>,
    ) {
        while pending.changed().await.is_ok() {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            let Pending { revision, library } = pending.borrow_and_update().clone();
            let Some(library) = library else {
                continue;
            };

            match store.save_current(&library).await {
                Ok(()) => debug!(revision, store = %store.describe(), "Library persisted"),
                Err(e) => {
                    failures.fetch_add(1, Ordering::SeqCst);
                    warn!(revision, store = %store.describe(), error = %e, "Failed to persist library");
                }
            }
            settled.send_replace(revision);
        }
        debug!("Persistence worker exiting");
    }
}
