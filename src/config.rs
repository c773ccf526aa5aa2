//! Configuration System
//!
//! Layered configuration: built-in defaults, the global user file, the workspace
//! files, then `REPONEST__*` environment variables. Tests included.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReponestConfig {
    /// Where the library document lives
    #[serde(default)]
    pub storage: StorageConfig,

    /// Write-behind persistence settings
    #[serde(default)]
    pub persist: PersistConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Http,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the library and seed files (file backend)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Current document file name
    #[serde(default = "default_library_file")]
    pub library_file: String,

    /// Seed document file name
    #[serde(default = "default_seed_file")]
    pub seed_file: String,

    /// Remote endpoints (http backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpStoreConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_library_file() -> String {
    "library.json".to_string()
}

fn default_seed_file() -> String {
    "repos.seed.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            library_file: default_library_file(),
            seed_file: default_seed_file(),
            http: None,
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory against the workspace root.
    pub fn resolve_data_dir(&self, workspace_root: &Path) -> PathBuf {
        if self.data_dir.is_absolute() {
            self.data_dir.clone()
        } else {
            workspace_root.join(&self.data_dir)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.library_file.trim().is_empty() {
            return Err("library_file cannot be empty".to_string());
        }
        if self.seed_file.trim().is_empty() {
            return Err("seed_file cannot be empty".to_string());
        }
        if self.library_file == self.seed_file {
            return Err("library_file and seed_file must differ".to_string());
        }
        if self.backend == StorageBackend::Http {
            let http = self
                .http
                .as_ref()
                .ok_or_else(|| "http backend requires a [storage.http] section".to_string())?;
            http.validate()?;
        }
        Ok(())
    }
}

/// Remote store endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpStoreConfig {
    /// URL serving the current document (GET) and accepting overwrites (PUT)
    pub current_url: String,

    /// URL serving the seed document
    #[serde(default)]
    pub seed_url: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl HttpStoreConfig {
    pub fn validate(&self) -> Result<(), String> {
        let is_http = |url: &str| url.starts_with("http://") || url.starts_with("https://");
        if !is_http(&self.current_url) {
            return Err(format!("invalid current_url: {}", self.current_url));
        }
        if let Some(seed_url) = &self.seed_url {
            if !is_http(seed_url) {
                return Err(format!("invalid seed_url: {}", seed_url));
            }
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Write-behind persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistConfig {
    /// Quiet period before a pending document is written; edits inside the
    /// window coalesce into one write
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    100
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ConfigValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl ReponestConfig {
    /// Validate the entire configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.storage.validate() {
            errors.push(ConfigValidationError::Storage(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ConfigValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
