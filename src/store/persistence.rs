//! File-backed library store

use crate::error::StoreError;
use crate::store::LibraryStore;
use crate::types::RepoLibrary;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores the current library and the seed library as JSON files.
///
/// A missing file reads as "absent". Writes go to a sibling temp file first and
/// are renamed into place so readers never observe a half-written document.
pub struct FileLibraryStore {
    library_path: PathBuf,
    seed_path: PathBuf,
}

impl FileLibraryStore {
    pub fn new(library_path: impl Into<PathBuf>, seed_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            seed_path: seed_path.into(),
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    /// Write the seed document. Used by `init`.
    pub async fn save_seed(&self, seed: &RepoLibrary) -> Result<(), StoreError> {
        write_document(&self.seed_path, seed).await
    }
}

#[async_trait]
impl LibraryStore for FileLibraryStore {
    async fn load_current(&self) -> Result<Option<RepoLibrary>, StoreError> {
        read_document(&self.library_path).await
    }

    async fn load_seed(&self) -> Result<Option<RepoLibrary>, StoreError> {
        read_document(&self.seed_path).await
    }

    async fn save_current(&self, library: &RepoLibrary) -> Result<(), StoreError> {
        write_document(&self.library_path, library).await
    }

    fn describe(&self) -> String {
        format!("file:{}", self.library_path.display())
    }
}

async fn read_document(path: &Path) -> Result<Option<RepoLibrary>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => {
            let library = RepoLibrary::from_json(&text)?;
            debug!(path = %path.display(), "Read library document");
            Ok(Some(library))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e)),
    }
}

async fn write_document(path: &Path, library: &RepoLibrary) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = library.to_json_pretty()?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    info!(path = %path.display(), version = library.version, "Wrote library document");
    Ok(())
}
