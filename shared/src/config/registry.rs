//! Token registry configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// Which store backs the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Redis over the network (production)
    #[default]
    Redis,
    /// In-process map; contents are lost on restart
    Memory,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" | "in-memory" | "mem" => Ok(BackendKind::Memory),
            _ => Err(format!("Invalid registry backend: {}", s)),
        }
    }
}

/// Registry behaviour settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Backend store selection
    #[serde(default)]
    pub backend: BackendKind,

    /// Deadline for a single backend call, in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }
}

impl RegistryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            backend: env_or("REGISTRY_BACKEND", BackendKind::Redis),
            operation_timeout_ms: env_or(
                "REGISTRY_OPERATION_TIMEOUT_MS",
                default_operation_timeout_ms(),
            ),
        }
    }

    /// Per-call deadline as a `Duration`
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Override the per-call deadline
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout_ms = timeout.as_millis() as u64;
        self
    }
}

fn default_operation_timeout_ms() -> u64 {
    5_000
}
