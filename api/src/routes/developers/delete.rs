use actix_web::{web, HttpResponse};

use crate::dto::DeveloperResponse;
use crate::handlers::error::handle_registry_error;

use dt_core::repositories::TokenStore;

use super::AppState;

/// Handler for DELETE /api/developers/{username}
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "username": "bob", "token": "TokenWasDeleted" }
/// ```
/// Deleting a username with no record also succeeds.
///
/// ## Errors
/// - 404 Not Found: Backend failure
pub async fn delete_developer<S>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> HttpResponse
where
    S: TokenStore + 'static,
{
    let username = path.into_inner();

    match state.registry.delete(&username).await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}

/// Handler for DELETE /api/developers
///
/// A delete without a username is rejected with 500 and
/// `{"error": "Request must be in parameters"}`; the backend is not touched.
pub async fn delete_without_username<S>(state: web::Data<AppState<S>>) -> HttpResponse
where
    S: TokenStore + 'static,
{
    match state.registry.delete("").await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}
