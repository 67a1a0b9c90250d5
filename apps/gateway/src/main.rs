use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod client;
mod config;
mod dto;

use client::ServerClient;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!("Forwarding to server at {}", config.upstream_url);
    let client = ServerClient::new(config.upstream_url.clone());

    let api_routes = api::routes(client.clone());

    // create_router adds 404 fallback, CORS and request tracing
    let router = create_router(api_routes);

    // - /health: liveness check with app name/version
    // - /ready: readiness check pinging the server tier
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(client));

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("LendHub gateway shutdown complete");
    Ok(())
}
