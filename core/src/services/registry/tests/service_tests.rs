//! Unit tests for the token registry service

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dt_shared::config::RegistryConfig;

use crate::domain::{DeveloperToken, TokenStatus, DELETED_TOKEN_MARKER, MAX_TOKEN_LENGTH};
use crate::errors::{ErrorKind, RegistryError, MISSING_PARAMETER_MESSAGE};
use crate::repositories::{InMemoryTokenStore, TokenStore};
use crate::services::registry::TokenRegistry;

fn registry_with(store: InMemoryTokenStore) -> (TokenRegistry<InMemoryTokenStore>, Arc<InMemoryTokenStore>) {
    let store = Arc::new(store);
    (TokenRegistry::new(store.clone(), RegistryConfig::default()), store)
}

#[tokio::test]
async fn test_create_then_get() {
    let (registry, _) = registry_with(InMemoryTokenStore::new());

    let created = registry.create("alice", "abc123").await.unwrap();
    assert_eq!(created, DeveloperToken::new("alice", "abc123"));

    let found = registry.get_one("alice", "").await.unwrap();
    assert_eq!(found, DeveloperToken::new("alice", "abc123"));
}

#[tokio::test]
async fn test_create_overwrites() {
    let (registry, _) = registry_with(InMemoryTokenStore::new());

    registry.create("alice", "tok1").await.unwrap();
    registry.create("alice", "tok2").await.unwrap();

    let found = registry.get_one("alice", "").await.unwrap();
    assert_eq!(found.token, "tok2");
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());

    registry.create("alice", "tok1").await.unwrap();
    registry.create("alice", "tok1").await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("alice").await.unwrap(), Some("tok1".to_string()));
}

#[tokio::test]
async fn test_get_with_matching_token() {
    let (registry, _) = registry_with(InMemoryTokenStore::with_tokens([("bob", "xyz")]));

    let found = registry.get_one("bob", "xyz").await.unwrap();
    assert_eq!(found, DeveloperToken::new("bob", "xyz"));
}

#[tokio::test]
async fn test_get_with_wrong_token() {
    let (registry, _) = registry_with(InMemoryTokenStore::with_tokens([("bob", "xyz")]));

    let err = registry.get_one("bob", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        RegistryError::TokenMismatch {
            username: "bob".to_string()
        }
    );
}

#[tokio::test]
async fn test_get_unknown_user() {
    let (registry, _) = registry_with(InMemoryTokenStore::new());

    let err = registry.get_one("ghost", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // A token does not change the outcome for an unknown user
    let err = registry.get_one("ghost", "anything").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_with_empty_username() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());

    let err = registry.get_one("", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_get_backend_failure() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());
    store.set_failure(Some("Connection refused"));

    let err = registry.get_one("alice", "").await.unwrap_err();
    assert_eq!(err, RegistryError::backend("Connection refused"));
}

#[tokio::test]
async fn test_delete_then_get() {
    let (registry, _) = registry_with(InMemoryTokenStore::with_tokens([("bob", "xyz")]));

    let deleted = registry.delete("bob").await.unwrap();
    assert_eq!(deleted.username, "bob");
    assert_eq!(deleted.token, DELETED_TOKEN_MARKER);

    let err = registry.get_one("bob", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_absent_user_succeeds() {
    let (registry, _) = registry_with(InMemoryTokenStore::new());

    let deleted = registry.delete("nobody").await.unwrap();
    assert_eq!(deleted, DeveloperToken::deleted("nobody"));
}

#[tokio::test]
async fn test_delete_empty_username_skips_backend() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());

    let err = registry.delete("").await.unwrap_err();
    assert_eq!(err.to_string(), MISSING_PARAMETER_MESSAGE);
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_delete_backend_failure() {
    let (registry, store) = registry_with(InMemoryTokenStore::with_tokens([("bob", "xyz")]));
    store.set_failure(Some("READONLY You can't write against a read only replica."));

    let err = registry.delete("bob").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
}

#[tokio::test]
async fn test_get_all_returns_exact_set() {
    let (registry, _) = registry_with(InMemoryTokenStore::new());
    registry.create("alice", "tok1").await.unwrap();
    registry.create("bob", "tok2").await.unwrap();

    let records: HashSet<DeveloperToken> = registry.get_all().await.unwrap().into_iter().collect();
    let expected: HashSet<DeveloperToken> = [
        DeveloperToken::new("alice", "tok1"),
        DeveloperToken::new("bob", "tok2"),
    ]
    .into_iter()
    .collect();
    assert_eq!(records, expected);
}

#[tokio::test]
async fn test_get_all_empty_store() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());

    assert!(registry.get_all().await.unwrap().is_empty());
    // Only the enumeration call
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn test_get_all_issues_one_read_per_key() {
    let (registry, store) = registry_with(InMemoryTokenStore::with_tokens([
        ("a", "1"),
        ("b", "2"),
        ("c", "3"),
    ]));

    registry.get_all().await.unwrap();
    assert_eq!(store.call_count(), 1 + 3);
}

#[tokio::test]
async fn test_get_all_fails_on_any_read() {
    let (registry, store) = registry_with(InMemoryTokenStore::with_tokens([
        ("alice", "tok1"),
        ("bob", "tok2"),
    ]));
    store.fail_reads_for("bob");

    let err = registry.get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
}

#[tokio::test]
async fn test_get_all_enumeration_failure() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());
    store.set_failure(Some("ERR unknown command 'KEYS'"));

    let err = registry.get_all().await.unwrap_err();
    assert_eq!(err.to_string(), "ERR unknown command 'KEYS'");
}

#[tokio::test]
async fn test_list_issued_drops_artifacts() {
    let hash = "d41d8cd98f00b204e9800998ecf8427e";
    let (registry, _) = registry_with(InMemoryTokenStore::with_tokens([
        ("alice", "tok1"),
        ("carol", "~"),
        ("upload", hash),
    ]));

    let mut usernames: Vec<String> = registry
        .list_issued()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.username)
        .collect();
    usernames.sort();
    assert_eq!(usernames, vec!["alice".to_string(), "carol".to_string()]);
}

#[tokio::test]
async fn test_issue_mints_active_token() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());

    let issued = registry.issue("dave").await.unwrap();
    assert_eq!(issued.token.len(), MAX_TOKEN_LENGTH);
    assert_eq!(issued.status(), TokenStatus::Active);
    assert_eq!(store.get("dave").await.unwrap(), Some(issued.token.clone()));

    let reissued = registry.issue("dave").await.unwrap();
    assert_ne!(reissued.token, issued.token);
}

#[tokio::test]
async fn test_restrict_and_unrestrict() {
    let (registry, _) = registry_with(InMemoryTokenStore::with_tokens([("erin", "tok")]));

    let restricted = registry.restrict("erin").await.unwrap();
    assert_eq!(restricted.status(), TokenStatus::Restricted);
    assert_eq!(registry.get_one("erin", "").await.unwrap().token, "~");

    let lifted = registry.issue("erin").await.unwrap();
    assert_eq!(lifted.status(), TokenStatus::Active);
}

#[tokio::test]
async fn test_health() {
    let (registry, store) = registry_with(InMemoryTokenStore::new());
    assert!(registry.health().await.is_ok());

    store.set_failure(Some("down"));
    assert!(registry.health().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_slow_backend_times_out() {
    let store = Arc::new(InMemoryTokenStore::with_tokens([("alice", "tok1")]));
    store.set_latency(Some(Duration::from_secs(10)));
    let config = RegistryConfig::default().with_operation_timeout(Duration::from_millis(100));
    let registry = TokenRegistry::new(store, config);

    let err = registry.get_one("alice", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Backend);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn test_get_all_reads_concurrently() {
    let store = Arc::new(InMemoryTokenStore::with_tokens([
        ("alice", "tok1"),
        ("bob", "tok2"),
        ("carol", "tok3"),
        ("dave", "tok4"),
    ]));
    let latency = Duration::from_secs(1);
    store.set_latency(Some(latency));
    let config = RegistryConfig::default().with_operation_timeout(Duration::from_secs(30));
    let registry = TokenRegistry::new(store.clone(), config);

    let started = tokio::time::Instant::now();
    let records = registry.get_all().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(records.len(), 4);
    assert_eq!(store.call_count(), 5);
    // One KEYS call plus one round of reads; sequential reads would take 5s.
    assert!(elapsed < latency * 3, "enumeration took {:?}", elapsed);
}

#[tokio::test]
async fn test_get_all_skips_key_removed_during_enumeration() {
    let (registry, store) = registry_with(InMemoryTokenStore::with_tokens([
        ("alice", "tok1"),
        ("bob", "tok2"),
    ]));
    store.vanish_before_read("bob");

    let records = registry.get_all().await.unwrap();

    assert_eq!(records, vec![DeveloperToken::new("alice", "tok1")]);
    assert_eq!(store.len().await, 1);
}
