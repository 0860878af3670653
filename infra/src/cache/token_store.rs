//! `TokenStore` implementation over Redis.
//!
//! Each username is a plain Redis string key holding the token. Enumeration
//! lists every key in the selected database.

use async_trait::async_trait;

use dt_core::errors::RegistryError;
use dt_core::repositories::TokenStore;

use super::redis_client::RedisClient;

/// Pattern used to enumerate every registered username
const ALL_KEYS: &str = "*";

/// Token store persisting records as Redis string keys
#[derive(Clone)]
pub struct RedisTokenStore {
    client: RedisClient,
}

impl RedisTokenStore {
    /// Wrap an established client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn get(&self, username: &str) -> Result<Option<String>, RegistryError> {
        Ok(self.client.get(username).await?)
    }

    async fn set(&self, username: &str, token: &str) -> Result<(), RegistryError> {
        Ok(self.client.set(username, token).await?)
    }

    async fn delete(&self, username: &str) -> Result<bool, RegistryError> {
        Ok(self.client.delete(username).await?)
    }

    async fn keys(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.client.keys(ALL_KEYS).await?)
    }

    async fn ping(&self) -> Result<(), RegistryError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(RegistryError::backend("Redis answered PING with an unexpected reply"))
        }
    }
}
