//! CLI presentation: text and json formatters per command family.

mod init;
mod shared;
mod table;
mod tree;

pub use init::{format_init_preview, format_init_summary};
pub use shared::{format_stats_json, format_stats_text, to_json_output};
pub use table::{collect_repo_rows, format_repo_list_json, format_repo_list_text, RepoRow};
pub use tree::format_tree_text;
