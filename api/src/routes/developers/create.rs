use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{CreateDeveloperRequest, DeveloperResponse};
use crate::handlers::error::{handle_registry_error, INVALID_BODY_MESSAGE};

use dt_core::errors::RegistryError;
use dt_core::repositories::TokenStore;

use super::AppState;

/// Handler for POST /api/developers
///
/// Stores the given token for the username, replacing any existing one.
///
/// # Request Body
///
/// ```json
/// { "developer": { "username": "alice", "token": "abc123" } }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Echo of the stored pair:
/// ```json
/// { "username": "alice", "token": "abc123" }
/// ```
///
/// ## Errors
/// - 404 Not Found: Backend failure
/// - 500 Internal Server Error: Missing username or token
pub async fn create_developer<S>(
    state: web::Data<AppState<S>>,
    request: web::Json<CreateDeveloperRequest>,
) -> HttpResponse
where
    S: TokenStore + 'static,
{
    let payload = request.into_inner().developer;

    if let Err(errors) = payload.validate() {
        log::debug!("Invalid developer payload: {}", errors);
        return handle_registry_error(&RegistryError::invalid_request(INVALID_BODY_MESSAGE));
    }

    let username = payload.username.unwrap_or_default();
    let token = payload.token.unwrap_or_default();

    match state.registry.create(&username, &token).await {
        Ok(record) => HttpResponse::Ok().json(DeveloperResponse::from(record)),
        Err(error) => handle_registry_error(&error),
    }
}
