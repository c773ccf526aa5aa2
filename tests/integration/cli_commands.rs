//! CLI commands run through RunContext against a temporary workspace

use clap::Parser;
use reponest::cli::{Cli, RunContext};
use reponest::error::{ApiError, LibraryError};
use reponest::types::RepoLibrary;
use std::path::Path;
use tempfile::TempDir;

use crate::integration::{read_library, sample_library, with_isolated_env, write_library};

fn run(workspace: &Path, args: &[&str]) -> Result<String, ApiError> {
    let ws = workspace.to_string_lossy().to_string();
    let mut argv = vec!["reponest", "--workspace", ws.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let context = RunContext::new(cli.workspace.clone(), cli.config.clone())?;
    context.execute(&cli.command)
}

fn library_file(workspace: &Path) -> std::path::PathBuf {
    workspace.join("data").join("library.json")
}

#[test]
fn test_commands_before_init_report_no_data() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        std::fs::create_dir_all(&workspace).unwrap();

        let err = run(&workspace, &["show"]).unwrap_err();
        assert!(matches!(err, ApiError::Library(LibraryError::NoData)));
        assert!(reponest::cli::map_error(&err).contains("reponest init"));
    });
}

#[test]
fn test_init_then_edit_flow() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        std::fs::create_dir_all(&workspace).unwrap();

        let preview = run(&workspace, &["init", "--list"]).unwrap();
        assert!(preview.contains("Would write seed"));

        let summary = run(&workspace, &["init"]).unwrap();
        assert!(summary.contains("repos.seed.json"));
        assert!(workspace.join("config").join("config.toml").exists());

        let tree = run(&workspace, &["show"]).unwrap();
        assert!(tree.starts_with("Root/ [root]"));
        assert!(library_file(&workspace).exists());

        let created = run(&workspace, &["folder", "create", "Work"]).unwrap();
        let folder_id = created.strip_prefix("Created folder ").unwrap().to_string();

        let added = run(
            &workspace,
            &["repo", "add", "app", "https://github.com/u/app", "--folder", &folder_id],
        )
        .unwrap();
        let repo_id = added.strip_prefix("Added repository ").unwrap().to_string();

        run(
            &workspace,
            &["repo", "update", &folder_id, &repo_id, "--name", "App"],
        )
        .unwrap();

        let library = read_library(&library_file(&workspace));
        let work = library.root.folders.last().unwrap();
        assert_eq!(work.name, "Work");
        assert_eq!(work.repos[0].name, "App");
        assert_eq!(work.repos[0].url, "https://github.com/u/app");

        let list = run(&workspace, &["list"]).unwrap();
        assert!(list.contains(&format!("repo:{}:{}", folder_id, repo_id)));

        run(&workspace, &["folder", "delete", &folder_id]).unwrap();
        let library = read_library(&library_file(&workspace));
        assert!(library.root.folders.iter().all(|f| f.id != folder_id));
    });
}

#[test]
fn test_invalid_edits_are_rejected() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        write_library(&library_file(&workspace), &sample_library());

        let err = run(&workspace, &["repo", "add", "x", "http://evil.com"]).unwrap_err();
        assert!(err.to_string().contains("bad-scheme"));

        let err = run(&workspace, &["folder", "rename", "missing", "X"]).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = run(&workspace, &["folder", "delete", "root"]).unwrap_err();
        assert!(matches!(err, ApiError::Refused(_)));
        assert!(err.to_string().contains("cannot be deleted"));

        let err = run(&workspace, &["folder", "rename", "root", "Top"]).unwrap_err();
        assert!(matches!(err, ApiError::Refused(_)));

        let err = run(&workspace, &["delete", "folder:missing", "repo:root:nope"]).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = run(&workspace, &["delete", "bogus"]).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Library(LibraryError::InvalidSelectionKey(_))
        ));

        assert_eq!(read_library(&library_file(&workspace)), sample_library());
    });
}

#[test]
fn test_bulk_delete_export_import_reset() {
    let test_dir = TempDir::new().unwrap();
    with_isolated_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        write_library(&library_file(&workspace), &sample_library());
        write_library(&workspace.join("data").join("repos.seed.json"), &sample_library());

        let msg = run(&workspace, &["delete", "folder:infra", "repo:work:api"]).unwrap();
        assert!(msg.contains("Deleted 2"));

        let export_path = test_dir.path().join("export.json");
        run(&workspace, &["export", "--output", export_path.to_str().unwrap()]).unwrap();
        let exported = read_library(&export_path);
        assert_eq!(exported.root.folders[0].folders.len(), 0);
        assert_eq!(exported.root.folders[0].repos.len(), 1);

        let stdout = run(&workspace, &["export"]).unwrap();
        assert_eq!(RepoLibrary::from_json(&stdout).unwrap(), exported);

        let import_path = test_dir.path().join("import.json");
        std::fs::write(
            &import_path,
            r#"{"version":7,"root":{"id":"root","name":"Imported","folders":[],"repos":[]}}"#,
        )
        .unwrap();
        run(&workspace, &["import", import_path.to_str().unwrap()]).unwrap();
        assert_eq!(read_library(&library_file(&workspace)).version, 7);

        std::fs::write(&import_path, "not json").unwrap();
        assert!(run(&workspace, &["import", import_path.to_str().unwrap()]).is_err());
        assert_eq!(read_library(&library_file(&workspace)).version, 7);

        run(&workspace, &["reset", "--yes"]).unwrap();
        assert_eq!(read_library(&library_file(&workspace)), sample_library());

        let stats = run(&workspace, &["stats", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&stats).unwrap();
        assert_eq!(value["folders"], 3);
        assert_eq!(value["repos"], 3);
    });
}
