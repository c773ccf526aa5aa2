//! In-process library store for tests and embedders.

use crate::error::StoreError;
use crate::store::LibraryStore;
use crate::types::RepoLibrary;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Default)]
pub struct MemoryLibraryStore {
    current: Mutex<Option<RepoLibrary>>,
    seed: Mutex<Option<RepoLibrary>>,
    writes: Mutex<Vec<RepoLibrary>>,
    fail_writes: AtomicBool,
    load_gate: Mutex<Option<Arc<Notify>>>,
    seed_gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: RepoLibrary) -> Self {
        let store = Self::default();
        *store.seed.lock() = Some(seed);
        store
    }

    pub fn with_current(self, current: RepoLibrary) -> Self {
        *self.current.lock() = Some(current);
        self
    }

    pub fn set_seed(&self, seed: Option<RepoLibrary>) {
        *self.seed.lock() = seed;
    }

    pub fn current(&self) -> Option<RepoLibrary> {
        self.current.lock().clone()
    }

    /// Every document written so far, oldest first.
    pub fn writes(&self) -> Vec<RepoLibrary> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    /// Make subsequent `save_current` calls fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Hold `load_current` until the returned handle is notified.
    pub fn gate_loads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.load_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Hold `load_seed` until the returned handle is notified.
    pub fn gate_seed_loads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.seed_gate.lock() = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn load_current(&self) -> Result<Option<RepoLibrary>, StoreError> {
        let gate = self.load_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.current.lock().clone())
    }

    async fn load_seed(&self) -> Result<Option<RepoLibrary>, StoreError> {
        let gate = self.seed_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.seed.lock().clone())
    }

    async fn save_current(&self, library: &RepoLibrary) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected write failure",
            )));
        }
        *self.current.lock() = Some(library.clone());
        self.writes.lock().push(library.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
