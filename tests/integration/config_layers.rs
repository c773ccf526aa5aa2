//! Layered configuration: workspace files and environment overrides

use reponest::config::{ConfigLoader, StorageBackend};
use std::fs;
use tempfile::TempDir;

use crate::integration::with_isolated_env;

#[test]
fn test_workspace_file_and_env_override() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(workspace.join("config")).unwrap();
        fs::write(
            workspace.join("config").join("config.toml"),
            "[storage]\ndata_dir = \"lib\"\n\n[persist]\ndebounce_ms = 250\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.storage.data_dir, std::path::PathBuf::from("lib"));
        assert_eq!(config.persist.debounce_ms, 250);

        std::env::set_var("REPONEST__PERSIST__DEBOUNCE_MS", "5");
        let config = ConfigLoader::load(&workspace);
        std::env::remove_var("REPONEST__PERSIST__DEBOUNCE_MS");
        assert_eq!(config.unwrap().persist.debounce_ms, 5);
    });
}

#[test]
fn test_http_backend_from_file() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("remote.toml");
    fs::write(
        &path,
        r#"
[storage]
backend = "http"

[storage.http]
current_url = "https://example.test/library"
seed_url = "https://example.test/seed"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Http);
    let http = config.storage.http.as_ref().unwrap();
    assert_eq!(http.current_url, "https://example.test/library");
    assert_eq!(http.timeout_ms, 10_000);
    assert!(config.validate().is_ok());
}
