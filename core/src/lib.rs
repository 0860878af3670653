//! # Token Registry Core
//!
//! Domain layer for the developer token registry: the `username -> token`
//! entity, the store abstraction it is persisted through, the registry
//! service that implements lookup, verification, enumeration, writes and
//! deletes, and the error taxonomy every operation resolves to.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
