//! Shared configuration and response types for the token registry server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error body returned by every failing endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendKind, CacheConfig, Environment, LoggingConfig, RegistryConfig, ServerConfig,
};
pub use errors::ErrorResponse;
