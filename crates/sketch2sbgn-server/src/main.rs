mod configuration;
mod error;
mod routes;
mod state;

use axum::{extract::DefaultBodyLimit, Router};
use configuration::{ServerSettings, Settings};
use sketch2sbgn::{
    assets::AssetStore, converter::Converter, grounding::GroundingClient,
    providers::openai::OpenAiProvider,
};
use state::AppState;
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

/// The API routes, with the public directory served for everything else
fn build_router(state: AppState, server: &ServerSettings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::configure(state)
        .fallback_service(ServeDir::new(&server.public_dir))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(GlobalConcurrencyLimitLayer::new(
            server.max_concurrent_requests,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration once; it is immutable from here on
    let settings = Settings::new()?;
    let addr = settings.server.socket_addr()?;

    // The reference assets ship with the deployment, refuse to start without them
    let assets = AssetStore::new(&settings.assets.dir);
    assets.verify()?;

    let grounding = GroundingClient::new(settings.grounding.to_config())?;
    let provider = OpenAiProvider::new(settings.provider.into_config())?;
    let converter = Converter::new(assets, Arc::new(provider));

    let state = AppState::new(converter, grounding)
        .with_null_on_grounding_failure(settings.grounding.null_on_failure);
    let app = build_router(state, &settings.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
