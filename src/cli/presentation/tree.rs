//! Tree presentation: indented folder outline with repositories as leaves.

use crate::types::FolderNode;
use owo_colors::OwoColorize;

/// Render the folder tree. Folder and repository ids are shown so they can be
/// passed back to `folder`/`repo` commands.
pub fn format_tree_text(root: &FolderNode, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&folder_label(root, color));
    out.push('\n');
    render_children(root, "", color, &mut out);
    out
}

fn render_children(node: &FolderNode, prefix: &str, color: bool, out: &mut String) {
    let total = node.folders.len() + node.repos.len();
    let mut index = 0;

    for folder in &node.folders {
        index += 1;
        let last = index == total;
        out.push_str(&format!("{}{}{}\n", prefix, branch(last), folder_label(folder, color)));
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(folder, &child_prefix, color, out);
    }

    for repo in &node.repos {
        index += 1;
        let last = index == total;
        let id = format!("[{}]", repo.id);
        let line = if color {
            format!("{} {} {}", repo.name, repo.url.cyan(), id.dimmed())
        } else {
            format!("{} {} {}", repo.name, repo.url, id)
        };
        out.push_str(&format!("{}{}{}\n", prefix, branch(last), line));
    }
}

fn branch(last: bool) -> &'static str {
    if last {
        "└── "
    } else {
        "├── "
    }
}

fn folder_label(folder: &FolderNode, color: bool) -> String {
    let id = format!("[{}]", folder.id);
    if color {
        format!("{}/ {}", folder.name.bold(), id.dimmed())
    } else {
        format!("{}/ {}", folder.name, id)
    }
}
