//! Developer token route handlers
//!
//! This module contains the registry endpoints:
//! - Lookup, verification and enumeration (`GET /api/developers`)
//! - Create or replace (`POST /api/developers`)
//! - Delete (`DELETE /api/developers/{username}`)
//! - Minting and restriction (`POST /api/developers/{username}/issue|restrict`)

pub mod admin;
pub mod create;
pub mod delete;
pub mod query;

use std::sync::Arc;

use dt_core::repositories::TokenStore;
use dt_core::services::TokenRegistry;

pub use admin::{issue_token, restrict_developer};
pub use create::create_developer;
pub use delete::{delete_developer, delete_without_username};
pub use query::get_developers;

/// Application state that holds shared services
pub struct AppState<S>
where
    S: TokenStore,
{
    pub registry: Arc<TokenRegistry<S>>,
}

impl<S: TokenStore> AppState<S> {
    pub fn new(registry: Arc<TokenRegistry<S>>) -> Self {
        Self { registry }
    }
}
