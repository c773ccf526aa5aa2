//! Library Store
//!
//! The persistence collaborator behind the library manager. A store holds two
//! whole documents, the current library and the seed library, and only ever
//! reads or overwrites them as a unit.

pub mod http;
pub mod memory;
pub mod persistence;

pub use http::HttpLibraryStore;
pub use memory::MemoryLibraryStore;
pub use persistence::FileLibraryStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StoreError;
use crate::types::RepoLibrary;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Library Store interface
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Fetch the current document, or `None` if nothing has been stored yet.
    async fn load_current(&self) -> Result<Option<RepoLibrary>, StoreError>;

    /// Fetch the seed document used for first-run bootstrap and reset.
    async fn load_seed(&self) -> Result<Option<RepoLibrary>, StoreError>;

    /// Overwrite the current document.
    async fn save_current(&self, library: &RepoLibrary) -> Result<(), StoreError>;

    /// Short description for logs and status output.
    fn describe(&self) -> String;
}

/// Build the store selected by configuration. Relative data directories are
/// resolved against `workspace_root`.
pub fn open_store(
    config: &StorageConfig,
    workspace_root: &Path,
) -> Result<Arc<dyn LibraryStore>, StoreError> {
    match config.backend {
        StorageBackend::File => {
            let data_dir = config.resolve_data_dir(workspace_root);
            Ok(Arc::new(FileLibraryStore::new(
                data_dir.join(&config.library_file),
                data_dir.join(&config.seed_file),
            )))
        }
        StorageBackend::Http => {
            let http = config.http.as_ref().ok_or_else(|| {
                StoreError::NotConfigured("storage.http section is required for the http backend".to_string())
            })?;
            Ok(Arc::new(HttpLibraryStore::from_config(http)?))
        }
    }
}
