//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the library manager.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, needs_library};
pub use output::map_error;
pub use parse::{Cli, Commands, FolderCommands, RepoCommands};
pub use presentation::{
    collect_repo_rows, format_init_preview, format_init_summary, format_repo_list_json,
    format_repo_list_text, format_stats_json, format_stats_text, format_tree_text, RepoRow,
};
pub use route::RunContext;
