//! Repository list presentation: one row per repository.

use crate::error::ApiError;
use crate::tree::SelectionKey;
use crate::types::FolderNode;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

/// A repository together with where it lives.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepoRow {
    pub path: String,
    pub name: String,
    pub url: String,
    pub key: String,
}

/// Rows in depth-first order: a folder's repositories before its subfolders'.
pub fn collect_repo_rows(root: &FolderNode) -> Vec<RepoRow> {
    let mut rows = Vec::new();
    collect_into(root, root.name.clone(), &mut rows);
    rows
}

fn collect_into(node: &FolderNode, path: String, rows: &mut Vec<RepoRow>) {
    for repo in &node.repos {
        rows.push(RepoRow {
            path: path.clone(),
            name: repo.name.clone(),
            url: repo.url.clone(),
            key: SelectionKey::repo(&node.id, &repo.id).to_string(),
        });
    }
    for folder in &node.folders {
        collect_into(folder, format!("{}/{}", path, folder.name), rows);
    }
}

pub fn format_repo_list_text(rows: &[RepoRow]) -> String {
    if rows.is_empty() {
        return "No repositories.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Folder", "Repository", "URL", "Key"]);
    for row in rows {
        table.add_row(vec![&row.path, &row.name, &row.url, &row.key]);
    }
    table.to_string()
}

pub fn format_repo_list_json(rows: &[RepoRow]) -> Result<String, ApiError> {
    super::to_json_output(&rows)
}
