//! Durability and concurrency behavior of the completion checkpoint.

use std::collections::BTreeSet;
use std::sync::Arc;

use corpuscrawl::CheckpointStore;
use tempfile::TempDir;

#[tokio::test]
async fn missing_file_means_nothing_completed() {
    let tmp = TempDir::new().expect("tempdir");
    let store = CheckpointStore::load(tmp.path().join("checkpoint.json"));
    assert!(!store.is_completed("anything").await);
    assert!(store.completed_sites().await.is_empty());
}

#[tokio::test]
async fn corrupt_file_is_treated_as_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("checkpoint.json");
    std::fs::write(&path, "{ not json at all").expect("write corrupt file");

    let store = CheckpointStore::load(&path);
    assert!(store.completed_sites().await.is_empty());

    // The store still functions and repairs the file on the next write.
    store.mark_completed("SiteA").await.expect("mark succeeds");
    let reloaded = CheckpointStore::load(&path);
    assert!(reloaded.is_completed("SiteA").await);
}

#[tokio::test]
async fn completions_survive_reload() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("checkpoint.json");

    let store = CheckpointStore::load(&path);
    store.mark_completed("SiteA").await.expect("mark a");
    store.mark_completed("SiteB").await.expect("mark b");

    let reloaded = CheckpointStore::load(&path);
    assert!(reloaded.is_completed("SiteA").await);
    assert!(reloaded.is_completed("SiteB").await);
    assert!(!reloaded.is_completed("SiteC").await);
}

#[tokio::test]
async fn concurrent_completions_lose_no_update() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("checkpoint.json");
    let store = Arc::new(CheckpointStore::load(&path));

    let names: Vec<String> = (0..8).map(|i| format!("Site{i}")).collect();
    let mut tasks = Vec::new();
    for name in &names {
        let store = Arc::clone(&store);
        let name = name.clone();
        tasks.push(tokio::spawn(async move {
            store.mark_completed(&name).await.expect("mark succeeds");
        }));
    }
    for task in tasks {
        task.await.expect("task joins");
    }

    let expected: BTreeSet<String> = names.into_iter().collect();
    assert_eq!(store.completed_sites().await, expected);

    // The on-disk state matches the in-memory union regardless of ordering.
    let reloaded = CheckpointStore::load(&path);
    assert_eq!(reloaded.completed_sites().await, expected);
}
