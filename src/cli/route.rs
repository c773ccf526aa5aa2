//! CLI route: single route table and run context. Dispatches to the library
//! manager and presentation.

use crate::config::{ConfigLoader, ReponestConfig};
use crate::error::{ApiError, LibraryError};
use crate::library::LibraryManager;
use crate::store::{open_store, LibraryStore};
use crate::tree::{find_folder, find_repo, LibraryStats, SelectionKey};
use crate::types::{RepoLibrary, ROOT_ID};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

use crate::cli::help::needs_library;
use crate::cli::parse::{Commands, FolderCommands, RepoCommands};
use crate::cli::presentation::{
    collect_repo_rows, format_init_preview, format_init_summary, format_repo_list_json,
    format_repo_list_text, format_stats_json, format_stats_text, format_tree_text,
};
use crate::cli::command_name;

/// Runtime context for CLI execution: workspace, loaded config, and the store.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ReponestConfig,
    store: Arc<dyn LibraryStore>,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::from_config(workspace_root, config)
    }

    /// Create run context from an already-loaded configuration.
    pub fn from_config(workspace_root: PathBuf, config: ReponestConfig) -> Result<Self, ApiError> {
        if let Err(errors) = config.validate() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::ConfigError(joined));
        }
        let store = open_store(&config.storage, &workspace_root)?;
        Ok(Self {
            workspace_root,
            config,
            store,
            color: false,
        })
    }

    /// Replace the configured store.
    pub fn with_store(mut self, store: Arc<dyn LibraryStore>) -> Self {
        self.store = store;
        self
    }

    /// Enable ANSI styling in text output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &ReponestConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let span = info_span!("command", name = %command_name(command));
        runtime.block_on(self.execute_async(command).instrument(span))
    }

    /// Execute a command on the caller's runtime.
    pub async fn execute_async(&self, command: &Commands) -> Result<String, ApiError> {
        if let Commands::Init { force, list } = command {
            return self.handle_init(*force, *list).await;
        }

        let manager = LibraryManager::new(Arc::clone(&self.store), &self.config.persist);
        if needs_library(command) {
            manager.load().await?;
        }

        let result = self.execute_inner(&manager, command).await;
        manager.flush().await;

        let failures = manager.persist_failures();
        if failures > 0 {
            return Err(ApiError::PersistFailed(failures));
        }
        result
    }

    async fn execute_inner(
        &self,
        manager: &LibraryManager,
        command: &Commands,
    ) -> Result<String, ApiError> {
        match command {
            Commands::Init { force, list } => self.handle_init(*force, *list).await,
            Commands::Show { format } => {
                let library = current(manager)?;
                if format == "json" {
                    Ok(manager.export_json()?)
                } else {
                    Ok(format_tree_text(&library.root, self.color))
                }
            }
            Commands::List { format } => {
                let library = current(manager)?;
                let rows = collect_repo_rows(&library.root);
                if format == "json" {
                    format_repo_list_json(&rows)
                } else {
                    Ok(format_repo_list_text(&rows))
                }
            }
            Commands::Folder { command } => self.handle_folder_command(manager, command),
            Commands::Repo { command } => self.handle_repo_command(manager, command),
            Commands::Delete { keys } => self.handle_bulk_delete(manager, keys),
            Commands::Import { file } => self.handle_import(manager, file),
            Commands::Export { output } => self.handle_export(manager, output.as_deref()).await,
            Commands::Reset { yes } => self.handle_reset(manager, *yes).await,
            Commands::Stats { format } => {
                let library = current(manager)?;
                let stats = LibraryStats::collect(&library.root);
                if format == "json" {
                    format_stats_json(&stats, library.version)
                } else {
                    Ok(format_stats_text(&stats, library.version, self.color))
                }
            }
        }
    }

    fn handle_folder_command(
        &self,
        manager: &LibraryManager,
        command: &FolderCommands,
    ) -> Result<String, ApiError> {
        let before = current(manager)?;
        match command {
            FolderCommands::Create { name, parent } => {
                let after = manager.create_folder(parent, name)?;
                if Arc::ptr_eq(&before, &after) {
                    return Err(ApiError::NotFound(format!("folder '{}'", parent)));
                }
                let id = find_folder(parent, &after.root)
                    .and_then(|f| f.folders.last())
                    .map(|f| f.id.clone())
                    .unwrap_or_default();
                Ok(format!("Created folder {}", id))
            }
            FolderCommands::Rename { id, name } => {
                if id == ROOT_ID {
                    return Err(ApiError::Refused(
                        "the root folder cannot be renamed".to_string(),
                    ));
                }
                let after = manager.rename_folder(id, name)?;
                if Arc::ptr_eq(&before, &after) {
                    return Err(ApiError::NotFound(format!("folder '{}'", id)));
                }
                Ok(format!("Renamed folder {}", id))
            }
            FolderCommands::Delete { id } => {
                if id == ROOT_ID {
                    return Err(ApiError::Refused(
                        "the root folder cannot be deleted".to_string(),
                    ));
                }
                let after = manager.delete_folder(id)?;
                if Arc::ptr_eq(&before, &after) {
                    return Err(ApiError::NotFound(format!("folder '{}'", id)));
                }
                Ok(format!("Deleted folder {}", id))
            }
        }
    }

    fn handle_repo_command(
        &self,
        manager: &LibraryManager,
        command: &RepoCommands,
    ) -> Result<String, ApiError> {
        let before = current(manager)?;
        match command {
            RepoCommands::Add { name, url, folder } => {
                let after = manager.create_repo(folder, name, url)?;
                if Arc::ptr_eq(&before, &after) {
                    return Err(ApiError::NotFound(format!("folder '{}'", folder)));
                }
                let id = find_folder(folder, &after.root)
                    .and_then(|f| f.repos.last())
                    .map(|r| r.id.clone())
                    .unwrap_or_default();
                Ok(format!("Added repository {}", id))
            }
            RepoCommands::Update {
                folder,
                id,
                name,
                url,
            } => {
                let existing = find_folder(folder, &before.root)
                    .and_then(|f| f.repos.iter().find(|r| &r.id == id))
                    .ok_or_else(|| {
                        ApiError::NotFound(format!("repository '{}' in folder '{}'", id, folder))
                    })?;
                let name = name.as_deref().unwrap_or(&existing.name);
                let url = url.as_deref().unwrap_or(&existing.url);
                manager.update_repo(folder, id, name, url)?;
                Ok(format!("Updated repository {}", id))
            }
            RepoCommands::Delete { folder, id } => {
                let after = manager.delete_repo(folder, id)?;
                if Arc::ptr_eq(&before, &after) {
                    return Err(ApiError::NotFound(format!(
                        "repository '{}' in folder '{}'",
                        id, folder
                    )));
                }
                Ok(format!("Deleted repository {}", id))
            }
            RepoCommands::Open { id } => {
                let (_, repo) = find_repo(id, &before.root)
                    .ok_or_else(|| ApiError::NotFound(format!("repository '{}'", id)))?;
                open::that(&repo.url)?;
                info!(url = %repo.url, "Opened repository");
                Ok(format!("Opened {}", repo.url))
            }
        }
    }

    fn handle_bulk_delete(
        &self,
        manager: &LibraryManager,
        keys: &[String],
    ) -> Result<String, ApiError> {
        let keys = keys
            .iter()
            .map(|k| k.parse::<SelectionKey>())
            .collect::<Result<Vec<_>, LibraryError>>()?;
        let count = keys.len();
        let before = current(manager)?;
        let after = manager.bulk_delete(keys)?;
        if Arc::ptr_eq(&before, &after) {
            return Err(ApiError::NotFound(format!(
                "nothing matched {} selection(s)",
                count
            )));
        }
        Ok(format!("Deleted {} selection(s)", count))
    }

    fn handle_import(&self, manager: &LibraryManager, file: &Path) -> Result<String, ApiError> {
        let text = if file == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(file)?
        };
        let library = manager.import_from_json(&text)?;
        let stats = LibraryStats::collect(&library.root);
        Ok(format!(
            "Imported library: {} folder(s), {} repository(ies)",
            stats.folders, stats.repos
        ))
    }

    async fn handle_export(
        &self,
        manager: &LibraryManager,
        output: Option<&Path>,
    ) -> Result<String, ApiError> {
        let json = manager.export_json()?;
        match output {
            Some(path) => {
                tokio::fs::write(path, format!("{}\n", json)).await?;
                Ok(format!("Exported library to {}", path.display()))
            }
            None => Ok(json),
        }
    }

    async fn handle_reset(&self, manager: &LibraryManager, yes: bool) -> Result<String, ApiError> {
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt("Replace the library with the seed? All edits will be lost")
                .default(false)
                .interact()
                .map_err(|e| ApiError::Prompt(e.to_string()))?;

            if !confirmed {
                return Ok("Reset cancelled".to_string());
            }
        }

        let library = manager.reset_to_seed().await?;
        let stats = LibraryStats::collect(&library.root);
        Ok(format!(
            "Library reset to seed: {} folder(s), {} repository(ies)",
            stats.folders, stats.repos
        ))
    }

    async fn handle_init(&self, force: bool, list: bool) -> Result<String, ApiError> {
        if list {
            let preview = crate::init::preview(&self.workspace_root, &self.config, force)?;
            Ok(format_init_preview(&preview))
        } else {
            let summary = crate::init::initialize(&self.workspace_root, &self.config, force).await?;
            Ok(format_init_summary(&summary, force))
        }
    }
}

fn current(manager: &LibraryManager) -> Result<Arc<RepoLibrary>, ApiError> {
    manager
        .library()
        .ok_or(ApiError::Library(LibraryError::NotReady))
}
