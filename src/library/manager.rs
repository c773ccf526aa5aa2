//! Library manager: the single owner of the current document.
//!
//! State machine: `Loading -> Ready` or `Loading -> Failed`; `Ready` re-enters
//! `Loading` on reset. Every load and reset takes a fresh epoch, and import
//! bumps it too, so a result that resolves after something newer has replaced
//! the document is discarded instead of clobbering it.

use crate::config::PersistConfig;
use crate::error::{LibraryError, StoreError};
use crate::library::persist::PersistQueue;
use crate::store::LibraryStore;
use crate::tree::{self, Intent, LibraryStats, SelectionKey};
use crate::types::{RepoLibrary, ROOT_ID};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Why the manager could not produce a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Neither a current document nor a seed document exists
    NoData,
    /// The store could not be read
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Loading,
    Ready,
    Failed(FailureKind),
}

/// What a load found in the store
enum Fetched {
    Current(RepoLibrary),
    /// No current document; the seed, stamped `version = 1`
    Seed(RepoLibrary),
}

struct ManagerState {
    lifecycle: LifecycleState,
    library: Option<Arc<RepoLibrary>>,
    epoch: u64,
}

pub struct LibraryManager {
    store: Arc<dyn LibraryStore>,
    state: RwLock<ManagerState>,
    persist: PersistQueue,
}

impl LibraryManager {
    /// Create a manager in the `Loading` state. Must be called inside a tokio runtime.
    pub fn new(store: Arc<dyn LibraryStore>, config: &PersistConfig) -> Self {
        let persist = PersistQueue::spawn(
            Arc::clone(&store),
            Duration::from_millis(config.debounce_ms),
        );
        Self {
            store,
            state: RwLock::new(ManagerState {
                lifecycle: LifecycleState::Loading,
                library: None,
                epoch: 0,
            }),
            persist,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state.read().lifecycle.clone()
    }

    /// The current document, if one has been loaded.
    pub fn library(&self) -> Option<Arc<RepoLibrary>> {
        self.state.read().library.clone()
    }

    pub fn store(&self) -> &Arc<dyn LibraryStore> {
        &self.store
    }

    /// Load the current document, bootstrapping from the seed on first run.
    #[instrument(skip(self), fields(store = %self.store.describe()))]
    pub async fn load(&self) -> Result<Arc<RepoLibrary>, LibraryError> {
        let epoch = self.begin_loading();
        let outcome = self.fetch_current_or_seed().await;
        let (library, bootstrapped) = self.finish_load(epoch, outcome)?;
        if bootstrapped {
            // A bootstrapped seed is in the store before load returns.
            self.persist.flush().await;
        }
        Ok(library)
    }

    /// Replace the current document with a fresh copy of the seed.
    ///
    /// If no seed can be fetched the previous document stays current.
    #[instrument(skip(self), fields(store = %self.store.describe()))]
    pub async fn reset_to_seed(&self) -> Result<Arc<RepoLibrary>, LibraryError> {
        let epoch = self.begin_loading();
        let outcome = match self.store.load_seed().await {
            Ok(Some(seed)) => Ok(seed),
            Ok(None) => Err(LibraryError::NoData),
            Err(e) => Err(LibraryError::Store(e)),
        };
        self.finish_reset(epoch, outcome)
    }

    /// Replace the current document with one parsed from JSON text.
    ///
    /// Only the document shape is checked. On a parse failure the current
    /// document is left untouched.
    pub fn import_from_json(&self, json: &str) -> Result<Arc<RepoLibrary>, LibraryError> {
        let imported = RepoLibrary::from_json(json).map_err(|e| {
            warn!(error = %e, "Rejected library import");
            LibraryError::Import(e.to_string())
        })?;

        if imported.root.id != ROOT_ID {
            warn!(root_id = %imported.root.id, "Imported library root has an unexpected id");
        }
        let stats = LibraryStats::collect(&imported.root);
        if !stats.ids_unique() {
            warn!(
                duplicate_folders = stats.duplicate_folder_ids.len(),
                duplicate_repos = stats.duplicate_repo_ids.len(),
                "Imported library contains duplicate ids"
            );
        }

        let imported = Arc::new(imported);
        let mut state = self.state.write();
        state.epoch += 1;
        state.lifecycle = LifecycleState::Ready;
        state.library = Some(Arc::clone(&imported));
        self.persist.submit(Arc::clone(&imported));
        info!(version = imported.version, "Imported library");
        Ok(imported)
    }

    /// Pretty-printed JSON of the current document.
    pub fn export_json(&self) -> Result<String, LibraryError> {
        let library = self.library().ok_or(LibraryError::NotReady)?;
        library
            .to_json_pretty()
            .map_err(|e| LibraryError::Store(StoreError::Serialization(e)))
    }

    /// Apply a mutation intent to the current document.
    ///
    /// Returns the new current document; when the target no longer exists the
    /// unchanged document is returned and nothing is persisted.
    pub fn apply(&self, intent: Intent) -> Result<Arc<RepoLibrary>, LibraryError> {
        let mut state = self.state.write();
        if state.lifecycle != LifecycleState::Ready {
            return Err(LibraryError::NotReady);
        }
        let current = state.library.clone().ok_or(LibraryError::NotReady)?;

        match tree::apply(&current, &intent)? {
            Some(next) => {
                let next = Arc::new(next);
                state.library = Some(Arc::clone(&next));
                let revision = self.persist.submit(Arc::clone(&next));
                info!(intent = intent.label(), revision, "Library updated");
                Ok(next)
            }
            None => {
                debug!(intent = intent.label(), "Intent matched nothing; library unchanged");
                Ok(current)
            }
        }
    }

    pub fn create_folder(&self, parent_id: &str, name: &str) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::CreateFolder {
            parent_id: parent_id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn rename_folder(&self, folder_id: &str, name: &str) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::RenameFolder {
            folder_id: folder_id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn delete_folder(&self, folder_id: &str) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::DeleteFolder {
            folder_id: folder_id.to_string(),
        })
    }

    pub fn create_repo(
        &self,
        folder_id: &str,
        name: &str,
        url: &str,
    ) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::CreateRepo {
            folder_id: folder_id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    pub fn update_repo(
        &self,
        folder_id: &str,
        repo_id: &str,
        name: &str,
        url: &str,
    ) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::UpdateRepo {
            folder_id: folder_id.to_string(),
            repo_id: repo_id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    pub fn delete_repo(&self, folder_id: &str, repo_id: &str) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::DeleteRepo {
            folder_id: folder_id.to_string(),
            repo_id: repo_id.to_string(),
        })
    }

    pub fn bulk_delete(&self, keys: Vec<SelectionKey>) -> Result<Arc<RepoLibrary>, LibraryError> {
        self.apply(Intent::BulkDelete { keys })
    }

    /// Wait for queued writes to reach the store.
    pub async fn flush(&self) {
        self.persist.flush().await;
    }

    /// Number of failed background writes.
    pub fn persist_failures(&self) -> u64 {
        self.persist.failure_count()
    }

    fn begin_loading(&self) -> u64 {
        let mut state = self.state.write();
        state.epoch += 1;
        state.lifecycle = LifecycleState::Loading;
        state.epoch
    }

    async fn fetch_current_or_seed(&self) -> Result<Fetched, LibraryError> {
        if let Some(current) = self.store.load_current().await? {
            debug!(version = current.version, "Loaded current library");
            return Ok(Fetched::Current(current));
        }

        let mut seed = self.store.load_seed().await?.ok_or(LibraryError::NoData)?;
        seed.version = 1;
        Ok(Fetched::Seed(seed))
    }

    /// Install a load result unless a newer load, reset, or import has
    /// replaced the document meanwhile. A bootstrapped seed is queued for
    /// writing only when it is installed. The flag reports that write.
    fn finish_load(
        &self,
        epoch: u64,
        outcome: Result<Fetched, LibraryError>,
    ) -> Result<(Arc<RepoLibrary>, bool), LibraryError> {
        let mut state = self.state.write();
        if state.epoch != epoch {
            debug!(epoch, current_epoch = state.epoch, "Discarding superseded load result");
            let library = state.library.clone().ok_or(LibraryError::NotReady)?;
            return Ok((library, false));
        }

        match outcome {
            Ok(fetched) => {
                let (library, bootstrapped) = match fetched {
                    Fetched::Current(library) => (Arc::new(library), false),
                    Fetched::Seed(seed) => (Arc::new(seed), true),
                };
                state.library = Some(Arc::clone(&library));
                state.lifecycle = LifecycleState::Ready;
                if bootstrapped {
                    let revision = self.persist.submit(Arc::clone(&library));
                    info!(revision, "No current library; bootstrapped from seed");
                }
                info!(version = library.version, "Library ready");
                Ok((library, bootstrapped))
            }
            Err(e) => {
                state.lifecycle = LifecycleState::Failed(failure_kind(&e));
                warn!(error = %e, "Library load failed");
                Err(e)
            }
        }
    }

    fn finish_reset(
        &self,
        epoch: u64,
        outcome: Result<RepoLibrary, LibraryError>,
    ) -> Result<Arc<RepoLibrary>, LibraryError> {
        let mut state = self.state.write();
        if state.epoch != epoch {
            debug!(epoch, current_epoch = state.epoch, "Discarding superseded reset result");
            return state.library.clone().ok_or(LibraryError::NotReady);
        }

        match outcome {
            Ok(seed) => {
                let seed = Arc::new(seed);
                state.library = Some(Arc::clone(&seed));
                state.lifecycle = LifecycleState::Ready;
                self.persist.submit(Arc::clone(&seed));
                info!(version = seed.version, "Library reset to seed");
                Ok(seed)
            }
            Err(e) => {
                state.lifecycle = if state.library.is_some() {
                    LifecycleState::Ready
                } else {
                    LifecycleState::Failed(failure_kind(&e))
                };
                warn!(error = %e, "Reset to seed failed; keeping previous library");
                Err(e)
            }
        }
    }
}

fn failure_kind(error: &LibraryError) -> FailureKind {
    match error {
        LibraryError::NoData => FailureKind::NoData,
        other => FailureKind::Unavailable(other.to_string()),
    }
}
