//! Database library providing the PostgreSQL connector and repository helpers.
//!
//! This library wraps sea-orm connection management (pooling, retry on
//! startup, migrations, health checks) and offers a small `BaseRepository`
//! abstraction the domain repositories build on.

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{retry_with_backoff, RetryConfig};
pub use repository::BaseRepository;
