// MemoryStore Tests

use crate::storage::{KeyValueStore, MemoryStore};

#[tokio::test]
async fn test_memory_store_missing_key() {
    let store = MemoryStore::new();

    assert!(store.is_empty().await);
    assert_eq!(store.get("groups").await.expect("get failed"), None);
}

#[tokio::test]
async fn test_memory_store_set_replaces_value() {
    let store = MemoryStore::new();

    store.set("groups", "[]").await.expect("set failed");
    store.set("groups", r#"[{"id":"1"}]"#).await.expect("set failed");

    assert_eq!(store.len().await, 1);
    assert_eq!(
        store.get("groups").await.expect("get failed").as_deref(),
        Some(r#"[{"id":"1"}]"#)
    );
}

#[tokio::test]
async fn test_memory_store_keys_are_independent() {
    let store = MemoryStore::new();

    store.set("a", "1").await.expect("set failed");
    store.set("b", "2").await.expect("set failed");

    assert_eq!(store.get("a").await.expect("get failed").as_deref(), Some("1"));
    assert_eq!(store.get("b").await.expect("get failed").as_deref(), Some("2"));
}

#[test]
fn test_memory_store_blocking_access() {
    let store = MemoryStore::new();

    tokio_test::block_on(async {
        tokio_test::assert_ok!(store.set("groups", "[]").await);
        let value = tokio_test::assert_ok!(store.get("groups").await);
        assert_eq!(value.as_deref(), Some("[]"));
    });
}
