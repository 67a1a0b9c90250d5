//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with common middleware
//! - Health endpoints
//! - Graceful shutdown coordination

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_app, create_production_app, create_router};
pub use health::{health_router, HealthResponse};
pub use shutdown::shutdown_signal;
