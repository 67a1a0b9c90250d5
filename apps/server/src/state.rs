//! Application state management.
//!
//! The state is cloned for each handler (inexpensive pool clones) and moved
//! into the shutdown cleanup at the end of main.

use database::postgres::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
}
