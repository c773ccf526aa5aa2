//! Shared test utilities for integration tests
//!
//! Provides centralized setup/teardown for the config environment and a few
//! document builders used across test modules.

use reponest::types::{FolderNode, RepoItem, RepoLibrary, ROOT_ID};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "REPONEST_ENV"];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir` and no
/// REPONEST_ENV, so no user-level config leaks into the test.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("xdg");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_config_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    std::env::remove_var("REPONEST_ENV");

    let result = f();

    env_state.restore();

    result
}

pub fn repo(id: &str, name: &str) -> RepoItem {
    RepoItem {
        id: id.to_string(),
        name: name.to_string(),
        url: format!("https://github.com/acme/{}", name),
    }
}

/// The empty starting document.
pub fn empty_library() -> RepoLibrary {
    RepoLibrary {
        version: 1,
        root: FolderNode::new(ROOT_ID, "Root"),
    }
}

/// root
/// ├── work (api, web)
/// │   └── infra (deploy)
/// └── play
pub fn sample_library() -> RepoLibrary {
    let mut infra = FolderNode::new("infra", "Infra");
    infra.repos.push(repo("deploy", "deploy"));

    let mut work = FolderNode::new("work", "Work");
    work.repos.push(repo("api", "api"));
    work.repos.push(repo("web", "web"));
    work.folders.push(infra);

    let mut root = FolderNode::new(ROOT_ID, "Root");
    root.folders.push(work);
    root.folders.push(FolderNode::new("play", "Play"));

    RepoLibrary { version: 3, root }
}

/// Write `library` as JSON to `path`, creating parent directories.
pub fn write_library(path: &Path, library: &RepoLibrary) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, library.to_json_pretty().unwrap()).unwrap();
}

pub fn read_library(path: &Path) -> RepoLibrary {
    RepoLibrary::from_json(&std::fs::read_to_string(path).unwrap()).unwrap()
}
