//! Unit tests for the in-memory token store

use crate::errors::RegistryError;
use crate::repositories::token_store::{InMemoryTokenStore, TokenStore};

#[tokio::test]
async fn test_set_get_overwrite() {
    let store = InMemoryTokenStore::new();

    store.set("alice", "tok1").await.unwrap();
    assert_eq!(store.get("alice").await.unwrap(), Some("tok1".to_string()));

    store.set("alice", "tok2").await.unwrap();
    assert_eq!(store.get("alice").await.unwrap(), Some("tok2".to_string()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_reports_presence() {
    let store = InMemoryTokenStore::with_tokens([("bob", "xyz")]);

    assert!(store.delete("bob").await.unwrap());
    assert!(!store.delete("bob").await.unwrap());
    assert_eq!(store.get("bob").await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_keys() {
    let store = InMemoryTokenStore::with_tokens([("alice", "tok1"), ("bob", "tok2")]);

    let mut keys = store.keys().await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["alice".to_string(), "bob".to_string()]);
}

#[tokio::test]
async fn test_injected_failure_and_call_count() {
    let store = InMemoryTokenStore::new();
    store.set_failure(Some("ECONNREFUSED"));

    let err = store.get("alice").await.unwrap_err();
    assert_eq!(err, RegistryError::backend("ECONNREFUSED"));
    assert!(store.ping().await.is_err());
    assert_eq!(store.call_count(), 2);

    store.set_failure(None);
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn test_failing_reads_only_affect_named_key() {
    let store = InMemoryTokenStore::with_tokens([("alice", "tok1"), ("bob", "tok2")]);
    store.fail_reads_for("bob");

    assert!(store.get("alice").await.is_ok());
    assert!(matches!(
        store.get("bob").await,
        Err(RegistryError::Backend { .. })
    ));
}

#[tokio::test]
async fn test_vanish_before_read() {
    let store = InMemoryTokenStore::with_tokens([("alice", "tok1")]);
    store.vanish_before_read("alice");

    assert_eq!(store.keys().await.unwrap(), vec!["alice".to_string()]);
    assert_eq!(store.get("alice").await.unwrap(), None);
    assert!(store.is_empty().await);

    // Only the next read is affected.
    store.set("alice", "tok2").await.unwrap();
    assert_eq!(store.get("alice").await.unwrap(), Some("tok2".to_string()));
}
