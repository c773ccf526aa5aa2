//! Initialization of a workspace: starter seed document and default config.
//!
//! The starter seed is embedded in the binary at build time and written to the
//! configured data directory by `reponest init`.

use crate::config::{ReponestConfig, StorageBackend};
use crate::error::{ApiError, StoreError};
use crate::store::FileLibraryStore;
use crate::types::RepoLibrary;
use std::path::{Path, PathBuf};
use tracing::info;

/// Starter seed document embedded in the binary
pub const STARTER_SEED: &str = include_str!("../seeds/repos.seed.json");

/// Parse the embedded starter seed.
pub fn starter_seed() -> Result<RepoLibrary, StoreError> {
    Ok(RepoLibrary::from_json(STARTER_SEED)?)
}

/// Result of initialization operation
#[derive(Debug, Clone, Default)]
pub struct InitSummary {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Files `initialize` would write
#[derive(Debug, Clone, Default)]
pub struct InitPreview {
    pub seed: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

fn seed_path(workspace_root: &Path, config: &ReponestConfig) -> PathBuf {
    config
        .storage
        .resolve_data_dir(workspace_root)
        .join(&config.storage.seed_file)
}

fn config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join("config").join("config.toml")
}

fn require_file_backend(config: &ReponestConfig) -> Result<(), ApiError> {
    if config.storage.backend != StorageBackend::File {
        return Err(ApiError::ConfigError(
            "init only applies to the file storage backend".to_string(),
        ));
    }
    Ok(())
}

/// List what `initialize` would create without touching the filesystem.
pub fn preview(workspace_root: &Path, config: &ReponestConfig, force: bool) -> Result<InitPreview, ApiError> {
    require_file_backend(config)?;
    let seed = seed_path(workspace_root, config);
    let cfg = config_path(workspace_root);
    Ok(InitPreview {
        seed: (force || !seed.exists()).then_some(seed),
        config: (!cfg.exists()).then_some(cfg),
    })
}

/// Write the starter seed (and a default workspace config if none exists).
///
/// An existing seed is only replaced with `force`. The workspace config is
/// never overwritten.
pub async fn initialize(
    workspace_root: &Path,
    config: &ReponestConfig,
    force: bool,
) -> Result<InitSummary, ApiError> {
    require_file_backend(config)?;
    let mut summary = InitSummary::default();

    let seed_file = seed_path(workspace_root, config);
    if seed_file.exists() && !force {
        summary.skipped.push(seed_file);
    } else {
        let data_dir = config.storage.resolve_data_dir(workspace_root);
        let store = FileLibraryStore::new(data_dir.join(&config.storage.library_file), &seed_file);
        store.save_seed(&starter_seed()?).await?;
        info!(path = %seed_file.display(), "Wrote starter seed");
        summary.created.push(seed_file);
    }

    let config_file = config_path(workspace_root);
    if config_file.exists() {
        summary.skipped.push(config_file);
    } else {
        let text = toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))?;
        if let Some(parent) = config_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&config_file, text).await?;
        info!(path = %config_file.display(), "Wrote workspace config");
        summary.created.push(config_file);
    }

    Ok(summary)
}
