// SqliteStore Tests

use crate::storage::{KeyValueStore, SqliteStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_sqlite_store_in_memory() {
    let store = SqliteStore::open_in_memory().expect("Failed to open database");

    assert_eq!(store.get("groups").await.expect("get failed"), None);

    store.set("groups", "[]").await.expect("set failed");
    store.set("groups", r#"[{"id":"2"}]"#).await.expect("set failed");

    assert_eq!(
        store.get("groups").await.expect("get failed").as_deref(),
        Some(r#"[{"id":"2"}]"#)
    );
}

#[tokio::test]
async fn test_sqlite_store_persists_across_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("groops.db");

    {
        let store = SqliteStore::open(&db_path).expect("Failed to open database");
        store.set("groups", "persisted").await.expect("set failed");
    }

    let reopened = SqliteStore::open(&db_path).expect("Failed to reopen database");
    assert_eq!(
        reopened.get("groups").await.expect("get failed").as_deref(),
        Some("persisted")
    );
}
