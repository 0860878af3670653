use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use dt_api::app::create_app;
use dt_api::routes::developers::AppState;
use dt_core::repositories::{InMemoryTokenStore, TokenStore};
use dt_core::services::TokenRegistry;
use dt_infra::connect_token_store;
use dt_shared::config::{AppConfig, BackendKind};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.default_filter()),
    );

    info!(
        "Starting developer token registry ({} environment)",
        config.environment
    );

    match config.registry.backend {
        BackendKind::Redis => {
            let store = connect_token_store(config.cache.clone())
                .await
                .context("failed to connect to the Redis token backend")?;
            serve(store, &config).await
        }
        BackendKind::Memory => {
            warn!("Using the in-memory token backend; records are lost on restart");
            serve(InMemoryTokenStore::new(), &config).await
        }
    }
}

async fn serve<S>(store: S, config: &AppConfig) -> anyhow::Result<()>
where
    S: TokenStore + 'static,
{
    let registry = Arc::new(TokenRegistry::new(
        Arc::new(store),
        config.registry.clone(),
    ));
    let app_state = web::Data::new(AppState::new(registry));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    Ok(())
}
