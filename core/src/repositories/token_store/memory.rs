//! In-process implementation of `TokenStore`.
//!
//! Backs the registry when `REGISTRY_BACKEND=memory` and in tests. Failures
//! and latency can be injected to exercise the registry's error paths.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::RegistryError;

use super::r#trait::TokenStore;

/// Token store backed by a `HashMap`
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<String, String>>,
    /// When set, every call fails with this backend message
    failure: Mutex<Option<String>>,
    /// Keys whose point reads fail
    failing_reads: Mutex<HashSet<String>>,
    /// Keys removed just before their next point read
    vanishing: Mutex<HashSet<String>>,
    latency: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(username, token)` pairs
    pub fn with_tokens<I, U, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, T)>,
        U: Into<String>,
        T: Into<String>,
    {
        let tokens = entries
            .into_iter()
            .map(|(u, t)| (u.into(), t.into()))
            .collect();
        Self {
            tokens: RwLock::new(tokens),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail with `message`, or clear with `None`
    pub fn set_failure(&self, message: Option<&str>) {
        *lock(&self.failure) = message.map(str::to_string);
    }

    /// Make point reads of `username` fail
    pub fn fail_reads_for(&self, username: &str) {
        lock(&self.failing_reads).insert(username.to_string());
    }

    /// Remove `username` just before its next point read, as if a
    /// concurrent delete landed between enumeration and the read
    pub fn vanish_before_read(&self, username: &str) {
        lock(&self.vanishing).insert(username.to_string());
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Option<Duration>) {
        *lock(&self.latency) = latency;
    }

    /// Number of backend calls made so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    async fn enter(&self) -> Result<(), RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match lock(&self.failure).clone() {
            Some(message) => Err(RegistryError::backend(message)),
            None => Ok(()),
        }
    }
}

// A poisoned lock only means a test panicked mid-update; the data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self, username: &str) -> Result<Option<String>, RegistryError> {
        self.enter().await?;
        if lock(&self.failing_reads).contains(username) {
            return Err(RegistryError::backend(format!("read of '{}' failed", username)));
        }
        if lock(&self.vanishing).remove(username) {
            self.tokens.write().await.remove(username);
        }
        Ok(self.tokens.read().await.get(username).cloned())
    }

    async fn set(&self, username: &str, token: &str) -> Result<(), RegistryError> {
        self.enter().await?;
        self.tokens
            .write()
            .await
            .insert(username.to_string(), token.to_string());
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<bool, RegistryError> {
        self.enter().await?;
        Ok(self.tokens.write().await.remove(username).is_some())
    }

    async fn keys(&self) -> Result<Vec<String>, RegistryError> {
        self.enter().await?;
        Ok(self.tokens.read().await.keys().cloned().collect())
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        self.enter().await
    }
}
