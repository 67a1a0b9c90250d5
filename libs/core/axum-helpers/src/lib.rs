//! # Axum Helpers
//!
//! A collection of utilities and helpers shared by the lendhub HTTP binaries.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS)
//! - **[`errors`]**: Structured error responses
//! - **[`extractors`]**: Custom extractors (validated JSON, sharer identity header)

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, shutdown_signal,
    HealthResponse,
};

// Re-export HTTP middleware
pub use http::create_permissive_cors_layer;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{SharerId, ValidatedJson, SHARER_USER_HEADER};
