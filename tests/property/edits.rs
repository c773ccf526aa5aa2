//! Random edit sequences: id uniqueness and root protection

use proptest::prelude::*;
use reponest::tree::{self, walk, Intent, LibraryStats, SelectionKey};
use reponest::types::{FolderNode, RepoLibrary, ROOT_ID};

/// An edit whose targets are picked by index into the ids present when it runs.
#[derive(Debug, Clone)]
enum Op {
    CreateFolder(usize, String),
    RenameFolder(usize, String),
    DeleteFolder(usize),
    CreateRepo(usize, String),
    UpdateRepo(usize, String),
    DeleteRepo(usize),
    BulkDelete(Vec<usize>),
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("  ".to_string()), "[A-Za-z ]{1,10}"]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), arb_name()).prop_map(|(i, n)| Op::CreateFolder(i, n)),
        1 => (any::<usize>(), arb_name()).prop_map(|(i, n)| Op::RenameFolder(i, n)),
        1 => any::<usize>().prop_map(Op::DeleteFolder),
        3 => (any::<usize>(), arb_name()).prop_map(|(i, n)| Op::CreateRepo(i, n)),
        1 => (any::<usize>(), arb_name()).prop_map(|(i, n)| Op::UpdateRepo(i, n)),
        1 => any::<usize>().prop_map(Op::DeleteRepo),
        1 => prop::collection::vec(any::<usize>(), 0..4).prop_map(Op::BulkDelete),
    ]
}

fn folder_ids(library: &RepoLibrary) -> Vec<String> {
    walk(&library.root).map(|f| f.id.clone()).collect()
}

fn repo_keys(library: &RepoLibrary) -> Vec<(String, String)> {
    walk(&library.root)
        .flat_map(|f| f.repos.iter().map(move |r| (f.id.clone(), r.id.clone())))
        .collect()
}

fn pick<T: Clone>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].clone())
    }
}

fn to_intent(library: &RepoLibrary, op: &Op) -> Option<Intent> {
    let folders = folder_ids(library);
    let repos = repo_keys(library);
    let url = "https://github.com/acme/tool".to_string();
    Some(match op {
        Op::CreateFolder(i, name) => Intent::CreateFolder {
            parent_id: pick(&folders, *i)?,
            name: name.clone(),
        },
        Op::RenameFolder(i, name) => Intent::RenameFolder {
            folder_id: pick(&folders, *i)?,
            name: name.clone(),
        },
        Op::DeleteFolder(i) => Intent::DeleteFolder {
            folder_id: pick(&folders, *i)?,
        },
        Op::CreateRepo(i, name) => Intent::CreateRepo {
            folder_id: pick(&folders, *i)?,
            name: name.clone(),
            url,
        },
        Op::UpdateRepo(i, name) => {
            let (folder_id, repo_id) = pick(&repos, *i)?;
            Intent::UpdateRepo {
                folder_id,
                repo_id,
                name: name.clone(),
                url,
            }
        }
        Op::DeleteRepo(i) => {
            let (folder_id, repo_id) = pick(&repos, *i)?;
            Intent::DeleteRepo { folder_id, repo_id }
        }
        Op::BulkDelete(indices) => Intent::BulkDelete {
            keys: indices
                .iter()
                .enumerate()
                .filter_map(|(n, i)| {
                    if n % 2 == 0 {
                        pick(&folders, *i).map(SelectionKey::folder)
                    } else {
                        pick(&repos, *i).map(|(f, r)| SelectionKey::repo(f, r))
                    }
                })
                .collect(),
        },
    })
}

fn start() -> RepoLibrary {
    RepoLibrary {
        version: 1,
        root: FolderNode::new(ROOT_ID, "Root"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_ids_stay_unique_across_edit_sequences(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut library = start();
        for op in &ops {
            let Some(intent) = to_intent(&library, op) else { continue };
            if let Ok(Some(next)) = tree::apply(&library, &intent) {
                library = next;
            }
            let stats = LibraryStats::collect(&library.root);
            prop_assert!(stats.ids_unique(), "duplicate ids after {:?}", intent);
            prop_assert_eq!(library.root.id.as_str(), ROOT_ID);
            prop_assert_eq!(library.root.name.as_str(), "Root");
        }
    }

    #[test]
    fn test_root_edits_never_change_document(ops in prop::collection::vec(arb_op(), 0..20), name in arb_name()) {
        let mut library = start();
        for op in &ops {
            if let Some(intent) = to_intent(&library, op) {
                if let Ok(Some(next)) = tree::apply(&library, &intent) {
                    library = next;
                }
            }
        }

        let rename = Intent::RenameFolder { folder_id: ROOT_ID.to_string(), name };
        prop_assert!(matches!(tree::apply(&library, &rename), Ok(None)));

        let delete = Intent::DeleteFolder { folder_id: ROOT_ID.to_string() };
        prop_assert!(matches!(tree::apply(&library, &delete), Ok(None)));
    }
}
