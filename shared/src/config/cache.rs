//! Redis configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis connection configuration for the token backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Password sent on connect, overriding any password embedded in the URL
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            password: None,
            database: 0,
            connection_timeout: 5,
            connect_attempts: default_connect_attempts(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    ///
    /// `REDIS` is still honoured as the password variable for deployments
    /// that predate `REDIS_PASSWORD`.
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let password = std::env::var("REDIS_PASSWORD")
            .or_else(|_| std::env::var("REDIS"))
            .ok()
            .filter(|p| !p.is_empty());

        Self {
            url,
            password,
            database: env_or::<u8>("REDIS_DATABASE", 0).min(15),
            connection_timeout: env_or("REDIS_CONNECTION_TIMEOUT", 5),
            connect_attempts: env_or("REDIS_CONNECT_ATTEMPTS", default_connect_attempts()),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the password used to authenticate
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }
}

fn default_connect_attempts() -> u32 {
    3
}
