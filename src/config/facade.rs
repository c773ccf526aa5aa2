//! Config loader facade: assembles sources in precedence order.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::ReponestConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};

/// Loads `ReponestConfig` from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace files,
    /// `REPONEST__<SECTION>__<KEY>` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ReponestConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a single explicit file (plus environment overrides).
    pub fn load_from_file(path: &Path) -> Result<ReponestConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Path of the global config file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Configuration with built-in defaults only.
    pub fn default() -> ReponestConfig {
        ReponestConfig::default()
    }

    fn environment() -> Environment {
        Environment::with_prefix("REPONEST")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }
}
