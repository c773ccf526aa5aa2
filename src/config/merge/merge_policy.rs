//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("storage.backend", "file")?
        .set_default("storage.data_dir", "data")?
        .set_default("storage.library_file", "library.json")?
        .set_default("storage.seed_file", "repos.seed.json")?
        .set_default("persist.debounce_ms", 100)
}
