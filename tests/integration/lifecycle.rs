//! Lifecycle ordering: superseded loads, resets, and imports

use reponest::config::PersistConfig;
use reponest::error::LibraryError;
use reponest::library::{FailureKind, LibraryManager, LifecycleState};
use reponest::store::MemoryLibraryStore;
use std::sync::Arc;

use crate::integration::{empty_library, sample_library};

const V2: &str = r#"{"version":2,"root":{"id":"root","name":"R","folders":[],"repos":[]}}"#;

fn no_debounce() -> PersistConfig {
    PersistConfig { debounce_ms: 0 }
}

#[tokio::test]
async fn test_load_resolving_after_import_is_discarded() {
    let store = Arc::new(MemoryLibraryStore::new().with_current(sample_library()));
    let gate = store.gate_loads();
    let manager = Arc::new(LibraryManager::new(store.clone(), &no_debounce()));

    let loader = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.load().await })
    };
    tokio::task::yield_now().await;
    assert_eq!(manager.state(), LifecycleState::Loading);

    manager.import_from_json(V2).unwrap();
    gate.notify_one();
    let loaded = loader.await.unwrap().unwrap();

    assert_eq!(loaded.version, 2);
    assert_eq!(manager.library().unwrap().root.name, "R");
    assert_eq!(manager.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn test_load_resolving_after_reset_is_discarded() {
    let mut seed = empty_library();
    seed.root.name = "Seed".to_string();
    let store = Arc::new(MemoryLibraryStore::with_seed(seed).with_current(sample_library()));
    let gate = store.gate_loads();
    let manager = Arc::new(LibraryManager::new(store.clone(), &no_debounce()));

    let loader = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.load().await })
    };
    tokio::task::yield_now().await;

    let reset = manager.reset_to_seed().await.unwrap();
    assert_eq!(reset.root.name, "Seed");

    gate.notify_one();
    loader.await.unwrap().unwrap();

    assert_eq!(manager.library().unwrap().root.name, "Seed");
    manager.flush().await;
    assert_eq!(store.current().unwrap().root.name, "Seed");
}

#[tokio::test]
async fn test_bootstrap_resolving_after_import_does_not_overwrite_store() {
    let mut seed = empty_library();
    seed.root.name = "Seed".to_string();
    let store = Arc::new(MemoryLibraryStore::with_seed(seed));
    let gate = store.gate_seed_loads();
    let manager = Arc::new(LibraryManager::new(store.clone(), &no_debounce()));

    let loader = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.load().await })
    };
    tokio::task::yield_now().await;
    assert_eq!(manager.state(), LifecycleState::Loading);

    manager.import_from_json(V2).unwrap();
    manager.flush().await;
    assert_eq!(store.current().unwrap().root.name, "R");

    gate.notify_one();
    let loaded = loader.await.unwrap().unwrap();
    manager.flush().await;

    assert_eq!(loaded.root.name, "R");
    let stored = store.current().unwrap();
    assert_eq!(stored.root.name, "R");
    assert_eq!(stored.version, 2);
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_failed_load_then_import_recovers() {
    let store = Arc::new(MemoryLibraryStore::new());
    let manager = LibraryManager::new(store.clone(), &no_debounce());

    let err = manager.load().await.unwrap_err();
    assert!(matches!(err, LibraryError::NoData));
    assert_eq!(manager.state(), LifecycleState::Failed(FailureKind::NoData));
    assert!(matches!(
        manager.create_folder("root", "X"),
        Err(LibraryError::NotReady)
    ));

    manager.import_from_json(V2).unwrap();
    assert_eq!(manager.state(), LifecycleState::Ready);
    manager.create_folder("root", "X").unwrap();
    manager.flush().await;

    let stored = store.current().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.root.folders[0].name, "X");
}

#[tokio::test]
async fn test_reset_can_follow_failed_load_once_seed_appears() {
    let store = Arc::new(MemoryLibraryStore::new());
    let manager = LibraryManager::new(store.clone(), &no_debounce());
    assert!(manager.load().await.is_err());

    store.set_seed(Some(sample_library()));
    let library = manager.reset_to_seed().await.unwrap();
    assert_eq!(library.root.folders.len(), 2);
    assert_eq!(manager.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn test_rapid_edits_end_with_latest_document_stored() {
    let store = Arc::new(MemoryLibraryStore::new().with_current(empty_library()));
    let manager = LibraryManager::new(store.clone(), &PersistConfig { debounce_ms: 20 });
    manager.load().await.unwrap();

    for i in 0..10 {
        manager.create_folder("root", &format!("F{}", i)).unwrap();
    }
    manager.flush().await;

    let stored = store.current().unwrap();
    assert_eq!(stored.root.folders.len(), 10);
    assert_eq!(stored.root.folders[9].name, "F9");
    assert!(store.write_count() < 10, "burst should coalesce");
    assert_eq!(manager.persist_failures(), 0);
}
