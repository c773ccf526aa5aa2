//! Serialization round trip over arbitrary trees

use proptest::prelude::*;
use reponest::tree::SelectionKey;
use reponest::types::{FolderNode, RepoItem, RepoLibrary, ROOT_ID};

fn arb_repo() -> impl Strategy<Value = RepoItem> {
    ("[a-z0-9-]{1,12}", "\\PC{0,16}", "https://(github|gitlab)\\.com/[a-z]{1,8}/[a-z]{1,8}")
        .prop_map(|(id, name, url)| RepoItem { id, name, url })
}

fn arb_folder() -> impl Strategy<Value = FolderNode> {
    let leaf = ("[a-z0-9-]{1,12}", "\\PC{0,16}", prop::collection::vec(arb_repo(), 0..4))
        .prop_map(|(id, name, repos)| FolderNode {
            id,
            name,
            folders: Vec::new(),
            repos,
        });
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            "[a-z0-9-]{1,12}",
            "\\PC{0,16}",
            prop::collection::vec(inner, 0..4),
            prop::collection::vec(arb_repo(), 0..4),
        )
            .prop_map(|(id, name, folders, repos)| FolderNode {
                id,
                name,
                folders,
                repos,
            })
    })
}

fn arb_library() -> impl Strategy<Value = RepoLibrary> {
    (any::<i64>(), arb_folder()).prop_map(|(version, mut root)| {
        root.id = ROOT_ID.to_string();
        RepoLibrary { version, root }
    })
}

proptest! {
    #[test]
    fn test_parse_of_serialized_library_is_identical(library in arb_library()) {
        let compact = serde_json::to_string(&library).unwrap();
        prop_assert_eq!(&RepoLibrary::from_json(&compact).unwrap(), &library);

        let pretty = library.to_json_pretty().unwrap();
        prop_assert_eq!(&RepoLibrary::from_json(&pretty).unwrap(), &library);
    }

    #[test]
    fn test_selection_key_parses_back_to_its_ids(
        folder_id in "[a-z0-9:%-]{1,12}",
        repo_id in "\\PC{1,12}",
    ) {
        let folder = SelectionKey::folder(folder_id.clone());
        prop_assert_eq!(folder.to_string().parse::<SelectionKey>().unwrap(), folder);

        let repo = SelectionKey::repo(folder_id, repo_id);
        prop_assert_eq!(repo.to_string().parse::<SelectionKey>().unwrap(), repo);
    }
}
