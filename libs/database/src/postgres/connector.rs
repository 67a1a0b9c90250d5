use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{retry_with_backoff, RetryConfig};

/// Connect to a PostgreSQL database with default pool settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(PostgresConfig::new(database_url)).await
}

/// Connect using a PostgresConfig.
///
/// This is the recommended way to connect when using configuration:
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{connect_from_config, PostgresConfig};
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with custom connection options for fine-grained pool control.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;

    info!("Successfully connected to PostgreSQL database");

    Ok(db)
}

/// Connect with startup retries, for deployments where the database may come
/// up after the application.
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let retry = retry.unwrap_or_default();
    retry_with_backoff("PostgreSQL connection", &retry, || {
        connect_from_config(config.clone())
    })
    .await
}

/// Apply all pending migrations for the given migrator.
pub async fn run_migrations<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running database migrations");
    M::up(db, None).await?;
    info!("Database migrations complete");
    Ok(())
}
