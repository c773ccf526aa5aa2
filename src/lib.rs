//! RepoNest: a nested folder library of repository links
//!
//! Keeps a single JSON document of folders and GitHub/GitLab repository links,
//! edits it through validated immutable transformations, and persists every
//! change behind a write-behind queue to a file or HTTP store.

pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod library;
pub mod logging;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{ApiError, LibraryError, StoreError, ValidationError};
pub use library::{FailureKind, LibraryManager, LifecycleState};
pub use store::LibraryStore;
pub use tree::{Intent, SelectionKey};
pub use types::{FolderNode, RepoItem, RepoLibrary, ROOT_ID};
