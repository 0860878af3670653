use actix_web::{web, HttpResponse};

use crate::dto::DeveloperResponse;
use crate::handlers::error::handle_registry_error;

use dt_core::repositories::TokenStore;

use super::AppState;

/// Handler for POST /api/developers/{username}/issue
///
/// Mints a fresh 30-character token for the developer, creating the record
/// if needed. Also lifts a restriction.
///
/// ## Success (200 OK)
/// ```json
/// { "username": "alice", "token": "Zq3...30 chars" }
/// ```
pub async fn issue_token<S>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    S: TokenStore + 'static,
{
    let username = path.into_inner();

    match state.registry.issue(&username).await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}

/// Handler for POST /api/developers/{username}/restrict
///
/// Replaces the developer's token with the restricted marker `~`.
pub async fn restrict_developer<S>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    S: TokenStore + 'static,
{
    let username = path.into_inner();

    match state.registry.restrict(&username).await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}
