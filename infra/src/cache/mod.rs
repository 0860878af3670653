//! Cache module for the Redis-backed token store
//!
//! `RedisClient` wraps the connection; `RedisTokenStore` implements the
//! registry's `TokenStore` contract on top of it.

pub mod redis_client;
pub mod token_store;


pub use redis_client::RedisClient;
pub use token_store::RedisTokenStore;

// Re-export commonly used types
pub use dt_shared::config::CacheConfig;
