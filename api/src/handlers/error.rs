//! Conversion of registry errors into HTTP responses
//!
//! Status codes follow the registry's published contract: a backend failure
//! is reported as 404, while an unknown user, a token mismatch and a missing
//! argument are reported as 500. Every error body is `{"error": message}`.

use actix_web::{
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};

use dt_core::errors::{ErrorKind, RegistryError};

use crate::dto::ErrorResponse;

/// Message for a create body without `developer.username` and `developer.token`
pub const INVALID_BODY_MESSAGE: &str =
    "Request body must contain developer.username and developer.token";

/// Message for an unparsable query string
pub const INVALID_QUERY_MESSAGE: &str = "Request query parameters could not be parsed";

/// HTTP status for a registry error
pub fn status_for(error: &RegistryError) -> StatusCode {
    match error.kind() {
        ErrorKind::Backend => StatusCode::NOT_FOUND,
        ErrorKind::NotFound | ErrorKind::TokenMismatch | ErrorKind::InvalidRequest => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Handle registry errors and convert them to HTTP responses
pub fn handle_registry_error(error: &RegistryError) -> HttpResponse {
    match error.kind() {
        ErrorKind::Backend => log::error!("Registry backend error: {}", error),
        _ => log::info!("Registry request rejected: {:?}", error),
    }

    HttpResponse::build(status_for(error)).json(ErrorResponse::new(error.to_string()))
}

/// `JsonConfig` error handler: malformed or incomplete bodies are invalid
/// requests rather than actix's default plain-text 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejecting request body: {}", err);
    let response = handle_registry_error(&RegistryError::invalid_request(INVALID_BODY_MESSAGE));
    InternalError::from_response(err, response).into()
}

/// `QueryConfig` error handler
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejecting query string: {}", err);
    let response = handle_registry_error(&RegistryError::invalid_request(INVALID_QUERY_MESSAGE));
    InternalError::from_response(err, response).into()
}
