//! Depth-first traversal over the folder tree

use crate::types::FolderNode;
use serde::Serialize;
use std::collections::HashSet;

/// Depth-first, pre-order iterator over folders (a folder, then each child's
/// subtree left to right).
pub struct Walk<'a> {
    stack: Vec<&'a FolderNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FolderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.folders.iter().rev());
        Some(node)
    }
}

/// Walk `root` and all of its descendant folders.
pub fn walk(root: &FolderNode) -> Walk<'_> {
    Walk { stack: vec![root] }
}

/// Aggregate counts and integrity facts about a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    /// Folder count, root excluded
    pub folders: usize,
    pub repos: usize,
    /// Depth of the deepest folder (root = 0)
    pub max_depth: usize,
    /// Folder ids seen more than once
    pub duplicate_folder_ids: Vec<String>,
    /// Repository ids seen more than once
    pub duplicate_repo_ids: Vec<String>,
}

impl LibraryStats {
    pub fn collect(root: &FolderNode) -> Self {
        let mut stats = LibraryStats::default();
        let mut folder_ids = HashSet::new();
        let mut repo_ids = HashSet::new();
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            if depth > 0 {
                stats.folders += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            if !folder_ids.insert(node.id.as_str()) {
                stats.duplicate_folder_ids.push(node.id.clone());
            }
            for repo in &node.repos {
                stats.repos += 1;
                if !repo_ids.insert(repo.id.as_str()) {
                    stats.duplicate_repo_ids.push(repo.id.clone());
                }
            }
            stack.extend(node.folders.iter().rev().map(|f| (f, depth + 1)));
        }

        stats
    }

    /// True when every folder id and every repository id is unique.
    pub fn ids_unique(&self) -> bool {
        self.duplicate_folder_ids.is_empty() && self.duplicate_repo_ids.is_empty()
    }
}
