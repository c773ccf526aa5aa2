//! Identifier generation for new folders and repository entries.
//!
//! Ids look like `<unix-millis>-<7 hex chars>`. They are opaque to the rest of
//! the crate and never contain `:`, so they are safe inside selection keys.

use crate::types::RepoLibrary;
use crate::tree::walker;
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Generate a new candidate id.
pub fn generate_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..7])
}

/// Generate an id not already used by any folder or repository in `library`.
pub fn fresh_id(library: &RepoLibrary) -> String {
    let taken = used_ids(library);
    loop {
        let candidate = generate_id();
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
}

fn used_ids(library: &RepoLibrary) -> HashSet<String> {
    let mut ids = HashSet::new();
    for folder in walker::walk(&library.root) {
        ids.insert(folder.id.clone());
        ids.extend(folder.repos.iter().map(|r| r.id.clone()));
    }
    ids
}
