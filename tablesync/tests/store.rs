mod common;

use std::sync::Arc;

use tablesync::error::StoreError;
use tablesync::store::{
    HistoryMode, InMemoryStore, LocationStore, QueryParamStore, SharedLocation, WriteOptions,
    query_param_store,
};

fn push() -> WriteOptions {
    WriteOptions {
        history: HistoryMode::Push,
        ..WriteOptions::default()
    }
}

#[test]
fn test_write_options_defaults() {
    let options = WriteOptions::default();
    assert_eq!(options.history, HistoryMode::Replace);
    assert!(!options.scroll);
    assert!(options.shallow);
}

#[tokio::test]
async fn test_memory_store_read_write_remove() {
    common::init_logging();
    let store = InMemoryStore::new();
    assert!(store.is_empty());

    store
        .write("page", Some("2"), &WriteOptions::default())
        .await
        .unwrap();
    assert_eq!(store.read("page"), Some("2".to_string()));
    assert_eq!(store.len(), 1);

    store
        .write("page", None, &WriteOptions::default())
        .await
        .unwrap();
    assert_eq!(store.read("page"), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_factory_falls_back_to_memory() {
    common::init_logging();
    let store = query_param_store(None);
    store
        .write("sort", Some("name.asc"), &WriteOptions::default())
        .await
        .unwrap();
    assert_eq!(store.read("sort"), Some("name.asc".to_string()));
}

#[tokio::test]
async fn test_factory_binds_to_location() {
    let location = SharedLocation::new();
    let store = query_param_store(Some(&location));
    store
        .write("page", Some("3"), &WriteOptions::default())
        .await
        .unwrap();
    assert_eq!(location.query(), "page=3");
}

#[tokio::test]
async fn test_location_store_reads_initial_query() {
    let location = SharedLocation::with_query("page=2&name=al");
    let store = LocationStore::new(&location);
    assert_eq!(store.read("page"), Some("2".to_string()));
    assert_eq!(store.read("name"), Some("al".to_string()));
    assert_eq!(store.read("missing"), None);
}

#[tokio::test]
async fn test_location_store_rewrites_key_in_place() {
    let location = SharedLocation::with_query("page=1&sort=name.asc");
    let store = LocationStore::new(&location);
    store
        .write("page", Some("4"), &WriteOptions::default())
        .await
        .unwrap();
    // Key order is stable so bookmarked URLs stay byte-for-byte comparable.
    assert_eq!(location.query(), "page=4&sort=name.asc");
    assert_eq!(location.history_len(), 1);
}

#[tokio::test]
async fn test_location_push_and_back_reflect_navigation() {
    let location = SharedLocation::with_query("page=1");
    let store = LocationStore::new(&location);

    store.write("page", Some("2"), &push()).await.unwrap();
    assert_eq!(location.history_len(), 2);
    assert_eq!(store.read("page"), Some("2".to_string()));

    // External back navigation shows up on the next read, no plumbing.
    assert!(location.back());
    assert_eq!(store.read("page"), Some("1".to_string()));

    assert!(location.forward());
    assert_eq!(store.read("page"), Some("2".to_string()));
}

#[tokio::test]
async fn test_location_push_truncates_forward_entries() {
    let location = SharedLocation::with_query("page=1");
    let store = LocationStore::new(&location);

    store.write("page", Some("2"), &push()).await.unwrap();
    assert!(location.back());
    store.write("page", Some("9"), &push()).await.unwrap();

    assert_eq!(location.history_len(), 2);
    assert!(!location.forward());
    assert_eq!(store.read("page"), Some("9".to_string()));
}

#[tokio::test]
async fn test_detached_location_degrades() {
    common::init_logging();
    let store = {
        let location = SharedLocation::with_query("page=1");
        LocationStore::new(&location)
    };
    // The host dropped the location: reads go absent, writes error.
    assert_eq!(store.read("page"), None);
    assert!(store.snapshot().is_empty());
    let result = store.write("page", Some("2"), &WriteOptions::default()).await;
    assert!(matches!(result, Err(StoreError::LocationDetached)));
}

#[tokio::test]
async fn test_snapshot_lists_all_pairs() {
    let store = Arc::new(InMemoryStore::new());
    store
        .write("page", Some("1"), &WriteOptions::default())
        .await
        .unwrap();
    store
        .write("name", Some("al"), &WriteOptions::default())
        .await
        .unwrap();
    let mut snapshot = store.snapshot();
    snapshot.sort();
    assert_eq!(
        snapshot,
        vec![
            ("name".to_string(), "al".to_string()),
            ("page".to_string(), "1".to_string()),
        ]
    );
}
