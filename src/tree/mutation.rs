//! Structural edits over a library document.
//!
//! Every edit validates its input first, then clones the document, locates the
//! target on the clone, and edits the clone. `Ok(None)` means the target was not
//! found (or the edit is not allowed on it) and the caller keeps its current
//! document; `Ok(Some(next))` is the complete replacement document.

use crate::error::ValidationError;
use crate::tree::id::fresh_id;
use crate::tree::query::{find_folder_mut, find_parent_folder_mut};
use crate::tree::selection::SelectionKey;
use crate::tree::validate::{validate_name, validate_repo_url};
use crate::types::{FolderNode, RepoItem, RepoLibrary, ROOT_ID};
use std::collections::BTreeSet;
use tracing::debug;

/// A mutation request against the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateFolder {
        parent_id: String,
        name: String,
    },
    RenameFolder {
        folder_id: String,
        name: String,
    },
    DeleteFolder {
        folder_id: String,
    },
    CreateRepo {
        folder_id: String,
        name: String,
        url: String,
    },
    UpdateRepo {
        folder_id: String,
        repo_id: String,
        name: String,
        url: String,
    },
    DeleteRepo {
        folder_id: String,
        repo_id: String,
    },
    BulkDelete {
        keys: Vec<SelectionKey>,
    },
}

impl Intent {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::CreateFolder { .. } => "create_folder",
            Intent::RenameFolder { .. } => "rename_folder",
            Intent::DeleteFolder { .. } => "delete_folder",
            Intent::CreateRepo { .. } => "create_repo",
            Intent::UpdateRepo { .. } => "update_repo",
            Intent::DeleteRepo { .. } => "delete_repo",
            Intent::BulkDelete { .. } => "bulk_delete",
        }
    }
}

/// Dispatch an intent to the matching edit.
pub fn apply(library: &RepoLibrary, intent: &Intent) -> Result<Option<RepoLibrary>, ValidationError> {
    match intent {
        Intent::CreateFolder { parent_id, name } => create_folder(library, parent_id, name),
        Intent::RenameFolder { folder_id, name } => rename_folder(library, folder_id, name),
        Intent::DeleteFolder { folder_id } => Ok(delete_folder(library, folder_id)),
        Intent::CreateRepo {
            folder_id,
            name,
            url,
        } => create_repo(library, folder_id, name, url),
        Intent::UpdateRepo {
            folder_id,
            repo_id,
            name,
            url,
        } => update_repo(library, folder_id, repo_id, name, url),
        Intent::DeleteRepo { folder_id, repo_id } => Ok(delete_repo(library, folder_id, repo_id)),
        Intent::BulkDelete { keys } => Ok(bulk_delete(library, keys)),
    }
}

/// Append a new empty folder to `parent_id`'s children.
pub fn create_folder(
    library: &RepoLibrary,
    parent_id: &str,
    name: &str,
) -> Result<Option<RepoLibrary>, ValidationError> {
    let name = validate_name(name)?;
    let mut next = library.clone();
    let id = fresh_id(&next);
    let Some(parent) = find_folder_mut(parent_id, &mut next.root) else {
        debug!(parent_id, "create_folder: parent not found");
        return Ok(None);
    };
    parent.folders.push(FolderNode::new(id, name));
    Ok(Some(next))
}

/// Rename a folder. The root keeps its name.
pub fn rename_folder(
    library: &RepoLibrary,
    folder_id: &str,
    name: &str,
) -> Result<Option<RepoLibrary>, ValidationError> {
    if folder_id == ROOT_ID {
        debug!("rename_folder: root cannot be renamed");
        return Ok(None);
    }
    let name = validate_name(name)?;
    let mut next = library.clone();
    let Some(folder) = find_folder_mut(folder_id, &mut next.root) else {
        debug!(folder_id, "rename_folder: folder not found");
        return Ok(None);
    };
    folder.name = name;
    Ok(Some(next))
}

/// Remove a folder and its whole subtree. The root cannot be deleted.
pub fn delete_folder(library: &RepoLibrary, folder_id: &str) -> Option<RepoLibrary> {
    if folder_id == ROOT_ID {
        debug!("delete_folder: root cannot be deleted");
        return None;
    }
    let mut next = library.clone();
    if !remove_folder(&mut next.root, folder_id) {
        debug!(folder_id, "delete_folder: folder not found");
        return None;
    }
    Some(next)
}

/// Append a new repository entry to a folder.
pub fn create_repo(
    library: &RepoLibrary,
    folder_id: &str,
    name: &str,
    url: &str,
) -> Result<Option<RepoLibrary>, ValidationError> {
    let name = validate_name(name)?;
    let url = validate_repo_url(url)?;
    let mut next = library.clone();
    let id = fresh_id(&next);
    let Some(folder) = find_folder_mut(folder_id, &mut next.root) else {
        debug!(folder_id, "create_repo: folder not found");
        return Ok(None);
    };
    folder.repos.push(RepoItem { id, name, url });
    Ok(Some(next))
}

/// Replace the name and URL of a repository inside a given folder.
pub fn update_repo(
    library: &RepoLibrary,
    folder_id: &str,
    repo_id: &str,
    name: &str,
    url: &str,
) -> Result<Option<RepoLibrary>, ValidationError> {
    let name = validate_name(name)?;
    let url = validate_repo_url(url)?;
    let mut next = library.clone();
    let Some(repo) = find_folder_mut(folder_id, &mut next.root)
        .and_then(|folder| folder.repos.iter_mut().find(|r| r.id == repo_id))
    else {
        debug!(folder_id, repo_id, "update_repo: repository not found");
        return Ok(None);
    };
    repo.name = name;
    repo.url = url;
    Ok(Some(next))
}

/// Remove a repository from a folder.
pub fn delete_repo(library: &RepoLibrary, folder_id: &str, repo_id: &str) -> Option<RepoLibrary> {
    let mut next = library.clone();
    if !remove_repo(&mut next.root, folder_id, repo_id) {
        debug!(folder_id, repo_id, "delete_repo: repository not found");
        return None;
    }
    Some(next)
}

/// Delete every selected folder and repository in one edit.
///
/// Folder keys are applied first (the root is always skipped), then repository
/// keys. A repository inside an already removed folder is therefore a no-op.
/// Duplicate keys collapse to one.
pub fn bulk_delete(library: &RepoLibrary, keys: &[SelectionKey]) -> Option<RepoLibrary> {
    let keys: BTreeSet<&SelectionKey> = keys.iter().collect();
    let mut next = library.clone();
    let mut changed = false;

    for key in &keys {
        if let SelectionKey::Folder(folder_id) = key {
            if folder_id != ROOT_ID {
                changed |= remove_folder(&mut next.root, folder_id);
            }
        }
    }
    for key in &keys {
        if let SelectionKey::Repo { folder_id, repo_id } = key {
            changed |= remove_repo(&mut next.root, folder_id, repo_id);
        }
    }

    if !changed {
        debug!(keys = keys.len(), "bulk_delete: nothing matched");
        return None;
    }
    Some(next)
}

fn remove_folder(root: &mut FolderNode, folder_id: &str) -> bool {
    match find_parent_folder_mut(folder_id, root) {
        Some(parent) => {
            let before = parent.folders.len();
            parent.folders.retain(|f| f.id != folder_id);
            parent.folders.len() != before
        }
        None => false,
    }
}

fn remove_repo(root: &mut FolderNode, folder_id: &str, repo_id: &str) -> bool {
    match find_folder_mut(folder_id, root) {
        Some(folder) => {
            let before = folder.repos.len();
            folder.repos.retain(|r| r.id != repo_id);
            folder.repos.len() != before
        }
        None => false,
    }
}
