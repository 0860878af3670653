//! Token registry service
//!
//! Owns the `username -> token` mapping held in a [`TokenStore`] and
//! implements the registry operations on top of it:
//! - Single lookup with optional token verification
//! - Enumeration of every record (concurrent fan-out, joined)
//! - Create-or-replace, minting and restriction
//! - Delete
//!
//! [`TokenStore`]: crate::repositories::TokenStore

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenRegistry;
