//! CLI parse: clap types for reponest. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// reponest - organize repository links in a tree of folders
#[derive(Parser)]
#[command(name = "reponest")]
#[command(about = "Organize GitHub and GitLab repository links in nested folders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the starter seed and a default workspace config
    Init {
        /// Overwrite an existing seed document
        #[arg(long)]
        force: bool,

        /// List what would be initialized without creating
        #[arg(long)]
        list: bool,
    },
    /// Print the folder tree
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every repository with its folder path and selection key
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Folder operations
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Repository operations
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Delete several folders and repositories at once by selection key
    Delete {
        /// Keys of the form folder:<id> or repo:<folderId>:<repoId>
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Replace the library with a JSON document
    Import {
        /// Path to the document, or - for stdin
        file: PathBuf,
    },
    /// Write the library as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the library with a fresh copy of the seed
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show folder and repository counts
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create a folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder id
        #[arg(long, default_value = "root")]
        parent: String,
    },
    /// Rename a folder
    Rename {
        /// Folder id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a folder and everything inside it
    Delete {
        /// Folder id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RepoCommands {
    /// Add a repository to a folder
    Add {
        /// Display name
        name: String,
        /// Repository URL (https://github.com/... or https://gitlab.com/...)
        url: String,
        /// Owning folder id
        #[arg(long, default_value = "root")]
        folder: String,
    },
    /// Update a repository's name and URL
    Update {
        /// Owning folder id
        folder: String,
        /// Repository id
        id: String,
        /// New display name (default: unchanged)
        #[arg(long)]
        name: Option<String>,
        /// New URL (default: unchanged)
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove a repository from a folder
    Delete {
        /// Owning folder id
        folder: String,
        /// Repository id
        id: String,
    },
    /// Open a repository URL in the browser
    Open {
        /// Repository id
        id: String,
    },
}
