//! Selection keys: encoded references to a folder or a (folder, repo) pair,
//! used by multi-select deletion.
//!
//! Encodings are `folder:<folderId>` and `repo:<folderId>:<repoId>`. Inside an
//! id, `%` is written as `%25` and `:` as `%3A`, so every key parses back to the
//! ids it was built from. A raw `:` inside an id segment is rejected.

use crate::error::LibraryError;
use std::fmt;
use std::str::FromStr;

const FOLDER_PREFIX: &str = "folder:";
const REPO_PREFIX: &str = "repo:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionKey {
    Folder(String),
    Repo { folder_id: String, repo_id: String },
}

impl SelectionKey {
    pub fn folder(id: impl Into<String>) -> Self {
        SelectionKey::Folder(id.into())
    }

    pub fn repo(folder_id: impl Into<String>, repo_id: impl Into<String>) -> Self {
        SelectionKey::Repo {
            folder_id: folder_id.into(),
            repo_id: repo_id.into(),
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKey::Folder(id) => write!(f, "{}{}", FOLDER_PREFIX, escape(id)),
            SelectionKey::Repo { folder_id, repo_id } => write!(
                f,
                "{}{}:{}",
                REPO_PREFIX,
                escape(folder_id),
                escape(repo_id)
            ),
        }
    }
}

impl FromStr for SelectionKey {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LibraryError::InvalidSelectionKey(s.to_string());
        if let Some(id) = s.strip_prefix(FOLDER_PREFIX) {
            return Ok(SelectionKey::Folder(unescape(id).ok_or_else(invalid)?));
        }
        let rest = s.strip_prefix(REPO_PREFIX).ok_or_else(invalid)?;
        let (folder_id, repo_id) = rest.split_once(':').ok_or_else(invalid)?;
        Ok(SelectionKey::Repo {
            folder_id: unescape(folder_id).ok_or_else(invalid)?,
            repo_id: unescape(repo_id).ok_or_else(invalid)?,
        })
    }
}

fn escape(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            c => out.push(c),
        }
    }
    out
}

/// Decode one id segment. `None` for an empty segment, a raw `:`, or a `%`
/// not followed by `25` or `3A` (hex digits in either case).
fn unescape(segment: &str) -> Option<String> {
    if segment.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        match c {
            ':' => return None,
            '%' => {
                let hi = chars.next()?;
                let lo = chars.next()?;
                match (hi, lo.to_ascii_uppercase()) {
                    ('2', '5') => out.push('%'),
                    ('3', 'A') => out.push(':'),
                    _ => return None,
                }
            }
            c => out.push(c),
        }
    }
    Some(out)
}
