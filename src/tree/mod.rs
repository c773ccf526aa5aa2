//! Folder Tree Engine
//!
//! Validation, lookup, and structural edits over a `RepoLibrary`. Edits never
//! touch the caller's document: each one works on a clone and hands back the
//! new value, or `None` when the target no longer exists.

pub mod id;
pub mod mutation;
pub mod query;
pub mod selection;
pub mod validate;
pub mod walker;

pub use mutation::{apply, Intent};
pub use query::{find_folder, find_parent_folder, find_repo, folder_path};
pub use selection::SelectionKey;
pub use validate::{validate_name, validate_repo_url};
pub use walker::{walk, LibraryStats};
