// Persistence Tests - Testing failure handling and round-trips through each backend

use crate::config::{BackendKind, Settings};
use crate::groups::GroupStore;
use crate::identity::Session;
use crate::storage::{Backend, FileStore, KeyValueStore, SqliteStore};
use crate::tests::helpers::{ada, FailingStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_write_failure_leaves_memory_unchanged() {
    let store = GroupStore::new(FailingStore::new(), Session::with_user(ada()));
    store.load().await;
    let before = store.groups();

    store.backend().fail_writes(true);

    assert!(!store.join_group("2").await);
    assert!(!store.leave_group("1").await);
    assert!(store.send_message("1", "lost", None).await.is_none());

    // The group is handed back but never joins the collection
    let group = store
        .create_group("Books", "Reading club")
        .await
        .expect("write failures are not returned as errors");
    assert_eq!(group.name, "Books");
    assert!(store.group(&group.id).is_none());

    assert_eq!(store.groups(), before);

    // Recovers once the store accepts writes again
    store.backend().fail_writes(false);
    assert!(store.send_message("1", "kept", None).await.is_some());
    assert_eq!(store.get_group_messages("1").len(), 2);
}

#[tokio::test]
async fn test_read_failure_finishes_loading_empty() {
    let backend = FailingStore::new();
    backend.fail_reads(true);

    let store = GroupStore::new(backend, Session::with_user(ada()));
    store.load().await;

    assert!(!store.is_loading());
    assert!(store.groups().is_empty());
    assert!(!store.reload().await);
}

#[tokio::test]
async fn test_seed_write_failure_finishes_loading_empty() {
    let backend = FailingStore::new();
    backend.fail_writes(true);

    let store = GroupStore::new(backend, Session::with_user(ada()));
    store.load().await;

    assert!(!store.is_loading());
    assert!(store.groups().is_empty());
}

#[tokio::test]
async fn test_seeding_disabled_persists_empty_collection() {
    let settings = Settings {
        seed_defaults: false,
        ..Settings::default()
    };
    let backend = Backend::open(&settings).expect("Failed to open backend");
    let store = GroupStore::with_settings(backend, Session::with_user(ada()), &settings);
    store.load().await;

    assert!(store.groups().is_empty());
    assert_eq!(
        store.backend().get("groups").await.expect("get failed").as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn test_custom_collection_key() {
    let settings = Settings {
        collection_key: "groups_v2".to_string(),
        ..Settings::default()
    };
    let backend = Backend::open(&settings).expect("Failed to open backend");
    let store = GroupStore::with_settings(backend, Session::with_user(ada()), &settings);
    store.load().await;

    assert_eq!(store.collection_key(), "groups_v2");
    assert!(store.backend().get("groups_v2").await.expect("get failed").is_some());
    assert!(store.backend().get("groups").await.expect("get failed").is_none());
}

#[tokio::test]
async fn test_file_backend_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let first = GroupStore::new(FileStore::new(temp_dir.path()), Session::with_user(ada()));
    first.load().await;
    let group = first.create_group("Books", "Reading club").await.expect("create failed");
    let parent = first.send_message(&group.id, "hello", None).await.expect("send failed");
    first
        .send_message(&group.id, "reply", Some(&parent.id))
        .await
        .expect("send failed");

    let second = GroupStore::new(FileStore::new(temp_dir.path()), Session::with_user(ada()));
    second.load().await;

    assert_eq!(second.groups(), first.groups());
    assert_eq!(second.get_thread_messages(&group.id, &parent.id).len(), 1);
}

#[tokio::test]
async fn test_sqlite_backend_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("groops.db");

    let first = GroupStore::new(
        SqliteStore::open(&db_path).expect("Failed to open database"),
        Session::with_user(ada()),
    );
    first.load().await;
    first.leave_group("2").await;
    first.send_message("1", "hello", Some("1")).await.expect("send failed");
    let expected = first.groups();
    drop(first);

    let second = GroupStore::new(
        SqliteStore::open(&db_path).expect("Failed to reopen database"),
        Session::with_user(ada()),
    );
    second.load().await;

    assert_eq!(second.groups(), expected);
    assert!(!second.is_member("2", "user_ada"));
}

#[tokio::test]
async fn test_reload_picks_up_external_writes() {
    let settings = Settings {
        backend: BackendKind::Memory,
        ..Settings::default()
    };
    let store = GroupStore::with_settings(
        Backend::open(&settings).expect("Failed to open backend"),
        Session::with_user(ada()),
        &settings,
    );
    store.load().await;

    store.backend().set("groups", "[]").await.expect("set failed");
    assert_eq!(store.groups().len(), 2);

    assert!(store.reload().await);
    assert!(store.groups().is_empty());
}
