use crate::errors::handlers::not_found;
use crate::http::create_permissive_cors_layer;
use super::shutdown::shutdown_signal;
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Starts the server and runs `cleanup` once the graceful shutdown completes.
///
/// The cleanup future is bounded by `shutdown_timeout`; if it does not finish
/// in time, shutdown proceeds anyway with a warning.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    create_app(router, server_config).await?;

    info!("Server stopped, running cleanup");
    if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
        tracing::warn!(
            "Cleanup did not finish within {:?}, shutting down anyway",
            shutdown_timeout
        );
    }

    Ok(())
}

/// Wraps the composed API routes with cross-cutting middleware.
///
/// This adds:
/// - Request tracing (method, path, status, latency)
/// - Permissive CORS
/// - 404 fallback handler with a structured body
///
/// Domain routers should apply their own state before being passed in.
pub fn create_router(apis: Router) -> Router {
    apis.fallback(not_found).layer(create_permissive_cors_layer()).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
