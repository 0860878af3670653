use actix_web::{web, HttpResponse};

use crate::dto::{DeveloperListResponse, DeveloperQuery, DeveloperResponse};
use crate::handlers::error::handle_registry_error;

use dt_core::repositories::TokenStore;

use super::AppState;

/// Handler for GET /api/developers
///
/// Enumerates every record when `queryAll` is set, otherwise looks up one
/// developer and, if `token` is non-empty, verifies it.
///
/// # Query
///
/// ```text
/// ?queryAll=1[&excludeArtifacts=1]
/// ?username=alice[&token=abc123]
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "ret": [{ "username": "alice", "token": "abc123" }] }
/// ```
/// or
/// ```json
/// { "username": "alice", "token": "abc123" }
/// ```
///
/// ## Errors
/// - 404 Not Found: Backend failure
/// - 500 Internal Server Error: Unknown username, token mismatch, or no username given
pub async fn get_developers<S>(
    state: web::Data<AppState<S>>,
    query: web::Query<DeveloperQuery>,
) -> HttpResponse
where
    S: TokenStore + 'static,
{
    let query = query.into_inner();

    if query.wants_all() {
        let result = if query.excludes_artifacts() {
            state.registry.list_issued().await
        } else {
            state.registry.get_all().await
        };

        return match result {
            Ok(records) => HttpResponse::Ok().json(DeveloperListResponse::from(records)),
            Err(error) => handle_registry_error(&error),
        };
    }

    let username = query.username.unwrap_or_default();
    let token = query.token.unwrap_or_default();

    match state.registry.get_one(&username, &token).await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}
