//! HTTP middleware helpers.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS for development and internal deployments.
///
/// Allows any origin, method, and header. Credentials are not allowed, which
/// is what permits the wildcard origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
