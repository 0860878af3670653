//! Main registry service implementation

use std::future::Future;
use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use futures_util::future::try_join_all;
use tracing::{debug, error, info, warn};

use dt_shared::config::RegistryConfig;

use crate::domain::entities::developer::{
    DeveloperToken, MAX_TOKEN_LENGTH, RESTRICTED_TOKEN,
};
use crate::errors::{RegistryError, RegistryResult};
use crate::repositories::TokenStore;
use crate::services::token_generator::generate_token;

/// Registry of developer tokens over an injected store
///
/// One instance is built at startup and shared by every request handler.
/// Each operation is a single backend round trip, except enumeration, which
/// lists keys and then reads them all concurrently. Nothing is retried and
/// no lock is taken: concurrent writes to one username are last-write-wins
/// at the backend.
pub struct TokenRegistry<S: TokenStore> {
    /// Backend holding the records
    store: Arc<S>,
    /// Registry configuration
    config: RegistryConfig,
}

impl<S: TokenStore> TokenRegistry<S> {
    /// Create a registry over `store`
    pub fn new(store: Arc<S>, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    /// Look up a developer, optionally verifying their token
    ///
    /// An empty `token` means no verification was requested and the stored
    /// token is returned as is. A non-empty `token` must equal the stored one.
    ///
    /// # Errors
    /// * `InvalidRequest` - `username` is empty
    /// * `Backend` - the store failed or timed out
    /// * `NotFound` - no record for `username`
    /// * `TokenMismatch` - `token` is non-empty and differs from the stored one
    pub async fn get_one(&self, username: &str, token: &str) -> RegistryResult<DeveloperToken> {
        if username.is_empty() {
            return Err(RegistryError::missing_parameter());
        }

        let stored = self
            .call("get", self.store.get(username))
            .await?
            .ok_or_else(|| {
                debug!("No token registered for '{}'", username);
                RegistryError::NotFound {
                    username: username.to_string(),
                }
            })?;

        if token.is_empty() || constant_time_eq(token.as_bytes(), stored.as_bytes()) {
            debug!("Lookup for '{}' succeeded (verified: {})", username, !token.is_empty());
            Ok(DeveloperToken::new(username, stored))
        } else {
            warn!("Token verification failed for '{}'", username);
            Err(RegistryError::TokenMismatch {
                username: username.to_string(),
            })
        }
    }

    /// Enumerate every record in the store
    ///
    /// Keys are listed once and then read concurrently. The first failing
    /// read fails the whole call; no partial result is returned. A key that
    /// disappears between listing and reading is left out. Order follows
    /// the backend and is not stable.
    pub async fn get_all(&self) -> RegistryResult<Vec<DeveloperToken>> {
        let keys = self.call("keys", self.store.keys()).await?;
        debug!("Enumerating {} developer records", keys.len());

        let reads = keys.into_iter().map(|username| async move {
            let token = self.call("get", self.store.get(&username)).await?;
            if token.is_none() {
                debug!("Key '{}' vanished during enumeration", username);
            }
            Ok::<_, RegistryError>(token.map(|token| DeveloperToken::new(username, token)))
        });

        let records = try_join_all(reads).await?;
        Ok(records.into_iter().flatten().collect())
    }

    /// Enumerate records that hold developer tokens, dropping stored
    /// artifacts (values longer than the token limit)
    pub async fn list_issued(&self) -> RegistryResult<Vec<DeveloperToken>> {
        let mut records = self.get_all().await?;
        records.retain(|record| !record.is_artifact());
        Ok(records)
    }

    /// Store `token` for `username`, replacing any previous token
    ///
    /// The token is opaque; its shape is not checked. The returned record
    /// echoes the arguments rather than re-reading the store.
    pub async fn create(&self, username: &str, token: &str) -> RegistryResult<DeveloperToken> {
        if username.is_empty() {
            return Err(RegistryError::missing_parameter());
        }

        self.call("set", self.store.set(username, token)).await?;
        info!("Registered token for '{}'", username);
        Ok(DeveloperToken::new(username, token))
    }

    /// Mint a fresh random token for `username` and store it
    ///
    /// Used both to register a new developer and to lift a restriction.
    pub async fn issue(&self, username: &str) -> RegistryResult<DeveloperToken> {
        let token = generate_token(MAX_TOKEN_LENGTH);
        self.create(username, &token).await
    }

    /// Replace the token for `username` with the restricted marker
    pub async fn restrict(&self, username: &str) -> RegistryResult<DeveloperToken> {
        self.create(username, RESTRICTED_TOKEN).await
    }

    /// Remove the record for `username`
    ///
    /// Deleting a username that has no record succeeds. The returned record
    /// carries the deletion marker, never the prior token.
    ///
    /// # Errors
    /// * `InvalidRequest` - `username` is empty; the store is not touched
    /// * `Backend` - the store failed or timed out
    pub async fn delete(&self, username: &str) -> RegistryResult<DeveloperToken> {
        if username.is_empty() {
            return Err(RegistryError::missing_parameter());
        }

        let existed = self.call("delete", self.store.delete(username)).await?;
        if existed {
            info!("Deleted token for '{}'", username);
        } else {
            debug!("Delete for '{}' found no record", username);
        }
        Ok(DeveloperToken::deleted(username))
    }

    /// Check the store is reachable
    pub async fn health(&self) -> RegistryResult<()> {
        self.call("ping", self.store.ping()).await
    }

    /// Run one backend call under the configured deadline
    async fn call<T, F>(&self, operation: &str, fut: F) -> RegistryResult<T>
    where
        F: Future<Output = RegistryResult<T>>,
    {
        let timeout = self.config.operation_timeout();
        match tokio::time::timeout(timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Backend {} failed: {}", operation, e);
                Err(e)
            }
            Err(_) => {
                error!("Backend {} timed out after {}ms", operation, timeout.as_millis());
                Err(RegistryError::backend(format!(
                    "Backend {} timed out after {}ms",
                    operation,
                    timeout.as_millis()
                )))
            }
        }
    }
}
