//! # Infrastructure Layer
//!
//! Concrete backends for the developer token registry. The registry itself
//! lives in `dt_core` and only knows the `TokenStore` trait; this crate
//! provides the Redis implementation of it.
//!
//! ## Architecture
//!
//! - **Cache**: a thin async Redis client (`RedisClient`) and the
//!   `RedisTokenStore` adapter that maps its results and errors onto the
//!   registry's contract

/// Cache module - Redis client and the token store built on it
pub mod cache;

pub use cache::{RedisClient, RedisTokenStore};

use dt_core::errors::RegistryError;
use dt_shared::config::CacheConfig;

/// Connect to Redis and wrap the connection as a token store
///
/// Called once at startup; the returned store is shared by every request.
pub async fn connect_token_store(config: CacheConfig) -> Result<RedisTokenStore, InfrastructureError> {
    tracing::info!("Initializing Redis token store...");
    let client = RedisClient::new(config).await?;
    tracing::info!("Redis token store initialized successfully");
    Ok(RedisTokenStore::new(client))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection could not be established in time
    #[error("Connection timed out: {0}")]
    Timeout(String),
}

impl From<InfrastructureError> for RegistryError {
    /// Registry callers see the backend's own error text, without the
    /// infrastructure prefix.
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(e) => RegistryError::backend(e.to_string()),
            other => RegistryError::backend(other.to_string()),
        }
    }
}
