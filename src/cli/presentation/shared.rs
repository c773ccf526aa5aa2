//! Shared presentation: json helper and stats formatters.

use crate::error::{ApiError, StoreError};
use crate::tree::LibraryStats;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn to_json_output<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Store(StoreError::Serialization(e)))
}

pub fn format_stats_text(stats: &LibraryStats, version: i64, color: bool) -> String {
    let title = "Library";
    let mut out = if color {
        format!("{}\n", title.bold().underline())
    } else {
        format!("{}\n", title)
    };
    out.push_str(&format!("  Version:      {}\n", version));
    out.push_str(&format!("  Folders:      {}\n", stats.folders));
    out.push_str(&format!("  Repositories: {}\n", stats.repos));
    out.push_str(&format!("  Max depth:    {}", stats.max_depth));

    if !stats.ids_unique() {
        let warning = format!(
            "Duplicate ids: {} folder, {} repository",
            stats.duplicate_folder_ids.len(),
            stats.duplicate_repo_ids.len()
        );
        out.push('\n');
        if color {
            out.push_str(&format!("  {}", warning.yellow()));
        } else {
            out.push_str(&format!("  {}", warning));
        }
    }
    out
}

pub fn format_stats_json(stats: &LibraryStats, version: i64) -> Result<String, ApiError> {
    to_json_output(&serde_json::json!({
        "version": version,
        "folders": stats.folders,
        "repos": stats.repos,
        "max_depth": stats.max_depth,
        "duplicate_folder_ids": stats.duplicate_folder_ids,
        "duplicate_repo_ids": stats.duplicate_repo_ids,
    }))
}
