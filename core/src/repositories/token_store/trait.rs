//! Store trait defining the key-value contract the registry runs on.

use async_trait::async_trait;

use crate::errors::RegistryError;

/// Key-value backend holding `username -> token` pairs
///
/// Each method is exactly one backend round trip. Implementations report
/// every backend failure as [`RegistryError::Backend`] carrying the backend's
/// own error text, and never retry.
///
/// Implementations must be safe to share across concurrent requests; the
/// registry holds one instance for the life of the process.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Fetch the token stored for `username`
    ///
    /// # Returns
    /// * `Ok(Some(token))` - Value present
    /// * `Ok(None)` - No value for the key
    /// * `Err(RegistryError::Backend)` - Backend failure
    async fn get(&self, username: &str) -> Result<Option<String>, RegistryError>;

    /// Store `token` for `username`, replacing any previous value
    async fn set(&self, username: &str, token: &str) -> Result<(), RegistryError>;

    /// Remove the value for `username`
    ///
    /// # Returns
    /// * `Ok(true)` - A value was removed
    /// * `Ok(false)` - The key was already absent
    /// * `Err(RegistryError::Backend)` - Backend failure
    async fn delete(&self, username: &str) -> Result<bool, RegistryError>;

    /// Enumerate every stored username, in backend order
    async fn keys(&self) -> Result<Vec<String>, RegistryError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), RegistryError>;
}
