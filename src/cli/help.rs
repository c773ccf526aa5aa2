//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{Commands, FolderCommands, RepoCommands};

/// Command name string for log spans (e.g. "folder.create", "repo.open").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Init { .. } => "init".to_string(),
        Commands::Show { .. } => "show".to_string(),
        Commands::List { .. } => "list".to_string(),
        Commands::Folder { command } => format!("folder.{}", folder_command_name(command)),
        Commands::Repo { command } => format!("repo.{}", repo_command_name(command)),
        Commands::Delete { .. } => "delete".to_string(),
        Commands::Import { .. } => "import".to_string(),
        Commands::Export { .. } => "export".to_string(),
        Commands::Reset { .. } => "reset".to_string(),
        Commands::Stats { .. } => "stats".to_string(),
    }
}

pub fn folder_command_name(command: &FolderCommands) -> &'static str {
    match command {
        FolderCommands::Create { .. } => "create",
        FolderCommands::Rename { .. } => "rename",
        FolderCommands::Delete { .. } => "delete",
    }
}

pub fn repo_command_name(command: &RepoCommands) -> &'static str {
    match command {
        RepoCommands::Add { .. } => "add",
        RepoCommands::Update { .. } => "update",
        RepoCommands::Delete { .. } => "delete",
        RepoCommands::Open { .. } => "open",
    }
}

/// Whether the command needs the library loaded before it runs.
pub fn needs_library(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::Init { .. } | Commands::Import { .. } | Commands::Reset { .. }
    )
}
