//! Core data model: repository entries, folders, and the library document.
//!
//! The serialized shape of these types is the persisted/exchanged JSON contract:
//! `{ "version": n, "root": { "id": "root", "name": .., "folders": [..], "repos": [..] } }`.

use serde::{Deserialize, Serialize};

/// Identifier of the distinguished root folder.
pub const ROOT_ID: &str = "root";

/// Display name given to the root of a freshly created library.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// A link to an external repository. Owned by exactly one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoItem {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// A named container of child folders and repository entries.
///
/// Children are kept in insertion order, which is also display and persist order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: String,
    pub name: String,
    pub folders: Vec<FolderNode>,
    pub repos: Vec<RepoItem>,
}

impl FolderNode {
    /// Create an empty folder.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            folders: Vec::new(),
            repos: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.repos.is_empty()
    }
}

/// The whole persisted document: a version tag plus the root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLibrary {
    pub version: i64,
    pub root: FolderNode,
}

impl RepoLibrary {
    /// An empty library at version 1.
    pub fn empty() -> Self {
        Self {
            version: 1,
            root: FolderNode::new(ROOT_ID, DEFAULT_ROOT_NAME),
        }
    }

    /// Parse a library from JSON text. Only the shape is checked.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RepoLibrary {
    fn default() -> Self {
        Self::empty()
    }
}
