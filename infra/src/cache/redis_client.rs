//! Redis client implementation
//!
//! This module provides the async Redis client the token store is built on.
//! It holds a single multiplexed connection, created once with retry logic
//! and then shared by all callers, and exposes the handful of commands the
//! registry needs: GET, SET, DEL, KEYS and PING.
//!
//! Individual commands are never retried; a failure is returned to the
//! caller as is.

use redis::{
    aio::MultiplexedConnection,
    AsyncCommands, Client, IntoConnectionInfo,
};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use dt_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Base delay between connection attempts (exponential backoff)
const CONNECT_RETRY_DELAY_MS: u64 = 100;

/// Redis client over one shared multiplexed connection
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    ///
    /// # Example
    /// ```no_run
    /// use dt_shared::config::CacheConfig;
    /// use dt_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_password("secret");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            "Creating Redis client with URL: {} (database {})",
            mask_url(&config.url),
            config.database
        );

        let client = Self::open_client(&config)?;
        let connection = Self::create_connection_with_retry(
            client,
            config.connect_attempts.max(1),
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self { connection })
    }

    /// Parse the URL and apply password and database overrides
    fn open_client(config: &CacheConfig) -> Result<Client, InfrastructureError> {
        let mut info = config.url.as_str().into_connection_info().map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        if let Some(password) = &config.password {
            info.redis.password = Some(password.clone());
        }
        if config.database != 0 {
            info.redis.db = i64::from(config.database);
        }

        Client::open(info).map_err(|e| {
            error!("Failed to create Redis client: {}", e);
            InfrastructureError::Config(format!("Invalid Redis configuration: {}", e))
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_attempts: u32,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout(format!(
                    "no connection within {}s",
                    connect_timeout.as_secs()
                ))),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Get a value
    ///
    /// # Returns
    /// * `Result<Option<String>, InfrastructureError>` - Stored value or None if absent
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);
        let mut conn = self.connection.clone();

        let value: Option<String> = conn.get(key).await.map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })?;

        if value.is_some() {
            debug!("Successfully retrieved key '{}'", key);
        } else {
            debug!("Key '{}' not found", key);
        }
        Ok(value)
    }

    /// Set a value without expiry, replacing any existing value
    pub async fn set(&self, key: &str, value: &str) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}'", key);
        let mut conn = self.connection.clone();

        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })?;

        debug!("Successfully set key '{}'", key);
        Ok(())
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if key was deleted, false if not found
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Deleting key '{}'", key);
        let mut conn = self.connection.clone();

        let deleted_count: u32 = conn.del(key).await.map_err(|e| {
            error!("Failed to delete key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })?;

        let deleted = deleted_count > 0;
        if deleted {
            debug!("Successfully deleted key '{}'", key);
        } else {
            debug!("Key '{}' was not found", key);
        }
        Ok(deleted)
    }

    /// List keys matching `pattern` with a single KEYS call
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, InfrastructureError> {
        debug!("Listing keys matching '{}'", pattern);
        let mut conn = self.connection.clone();

        let keys: Vec<String> = conn.keys(pattern).await.map_err(|e| {
            error!("Failed to list keys matching '{}': {}", pattern, e);
            InfrastructureError::Cache(e)
        })?;

        debug!("Found {} keys matching '{}'", keys.len(), pattern);
        Ok(keys)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if healthy, error otherwise
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");
        let mut conn = self.connection.clone();

        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            if proto_end < at_pos {
                let proto = &url[..proto_end + 3];
                let host_part = &url[at_pos..];
                return format!("{}****{}", proto, host_part);
            }
        }
    }
    url.to_string()
}
