//! Recursive lookup over the folder tree.
//!
//! All searches are depth-first: a node first, then each child's subtree from
//! left to right. The first match wins. A miss is not an error; callers treat
//! it as a target that has already gone away.

use crate::types::{FolderNode, RepoItem};

/// Find the folder with the given id, starting at (and including) `node`.
pub fn find_folder<'a>(id: &str, node: &'a FolderNode) -> Option<&'a FolderNode> {
    if node.id == id {
        return Some(node);
    }
    node.folders.iter().find_map(|child| find_folder(id, child))
}

/// Find the folder whose `folders` list directly contains a folder with the given id.
///
/// `node` itself is never a match target, so the root has no parent.
pub fn find_parent_folder<'a>(id: &str, node: &'a FolderNode) -> Option<&'a FolderNode> {
    for child in &node.folders {
        if child.id == id {
            return Some(node);
        }
        if let Some(found) = find_parent_folder(id, child) {
            return Some(found);
        }
    }
    None
}

/// Mutable counterpart of [`find_folder`].
pub fn find_folder_mut<'a>(id: &str, root: &'a mut FolderNode) -> Option<&'a mut FolderNode> {
    let path = folder_index_path(id, root)?;
    node_at_mut(root, &path)
}

/// Mutable counterpart of [`find_parent_folder`].
pub fn find_parent_folder_mut<'a>(
    id: &str,
    root: &'a mut FolderNode,
) -> Option<&'a mut FolderNode> {
    let path = parent_index_path(id, root)?;
    node_at_mut(root, &path)
}

/// Locate a repository anywhere in the tree, returning it with its owning folder.
pub fn find_repo<'a>(repo_id: &str, node: &'a FolderNode) -> Option<(&'a FolderNode, &'a RepoItem)> {
    if let Some(repo) = node.repos.iter().find(|r| r.id == repo_id) {
        return Some((node, repo));
    }
    node.folders.iter().find_map(|child| find_repo(repo_id, child))
}

/// Names of the folders from the root down to (and including) the folder `id`.
pub fn folder_path<'a>(id: &str, root: &'a FolderNode) -> Option<Vec<&'a str>> {
    let path = folder_index_path(id, root)?;
    let mut names = vec![root.name.as_str()];
    let mut node = root;
    for index in path {
        node = &node.folders[index];
        names.push(node.name.as_str());
    }
    Some(names)
}

/// Child indices leading from `node` to the folder `id` (empty when `node` matches).
fn folder_index_path(id: &str, node: &FolderNode) -> Option<Vec<usize>> {
    if node.id == id {
        return Some(Vec::new());
    }
    for (index, child) in node.folders.iter().enumerate() {
        if let Some(mut rest) = folder_index_path(id, child) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

/// Child indices leading from `node` to the parent of folder `id`.
fn parent_index_path(id: &str, node: &FolderNode) -> Option<Vec<usize>> {
    for (index, child) in node.folders.iter().enumerate() {
        if child.id == id {
            return Some(Vec::new());
        }
        if let Some(mut rest) = parent_index_path(id, child) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

fn node_at_mut<'a>(root: &'a mut FolderNode, path: &[usize]) -> Option<&'a mut FolderNode> {
    let mut node = root;
    for &index in path {
        node = node.folders.get_mut(index)?;
    }
    Some(node)
}
