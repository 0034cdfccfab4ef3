use meme_gallery::api::{self, app_state::AppState};
use meme_gallery::config::loader::ConfigLoader;
use meme_gallery::error::Result;
use meme_gallery::observability::{self, ObservabilityState, create_observability_router};
use meme_gallery::services::create_gallery_service;
use meme_gallery::storage::ConnectionCache;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::load()?;
    observability::init_tracing(&config.logging)?;
    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    let cache = ConnectionCache::from_config(&config.database);
    if cache.is_configured() {
        info!(
            namespace = %config.database.namespace,
            database = %config.database.database_name(),
            "Meme store configured, connecting on first request"
        );
    } else {
        warn!("No meme store configured, serving default memes only");
    }

    let gallery_service = create_gallery_service(cache.clone());
    let app_state = AppState::new(gallery_service);
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(env!("CARGO_PKG_VERSION"), cache));
    let api_router = api::create_router(app_state, config.server.max_request_size);
    let router = create_observability_router(observability_state).merge(api_router);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
