//! Application factory
//!
//! Builds the Actix-web application around a shared `TokenRegistry`, so the
//! binary and the integration tests serve exactly the same routes.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::middleware::cors::create_cors;
use crate::routes::developers::{
    create_developer, delete_developer, delete_without_username, get_developers, issue_token,
    restrict_developer, AppState,
};

use dt_core::repositories::TokenStore;

/// Create and configure the application with all dependencies
pub fn create_app<S>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: TokenStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Logger::default())
        .wrap(create_cors())
        .route("/health", web::get().to(health_check::<S>))
        .service(web::scope("/api").configure(developer_routes::<S>))
        .default_service(web::route().to(not_found))
}

/// Registry routes under `/api`
fn developer_routes<S>(cfg: &mut web::ServiceConfig)
where
    S: TokenStore + 'static,
{
    for path in ["/developers", "/developers/"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(get_developers::<S>))
                .route(web::post().to(create_developer::<S>))
                .route(web::delete().to(delete_without_username::<S>)),
        );
    }

    cfg.route(
        "/developers/{username}",
        web::delete().to(delete_developer::<S>),
    )
    .route(
        "/developers/{username}/issue",
        web::post().to(issue_token::<S>),
    )
    .route(
        "/developers/{username}/restrict",
        web::post().to(restrict_developer::<S>),
    );
}

/// Health check endpoint handler
///
/// Reports 503 when the token backend does not answer.
async fn health_check<S>(state: web::Data<AppState<S>>) -> HttpResponse
where
    S: TokenStore + 'static,
{
    match state.registry.health().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": "developer-token-registry",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Err(error) => {
            log::warn!("Health check failed: {}", error);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": error.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        }
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "The requested resource was not found"
    }))
}
