use sea_orm::{DatabaseConnection, DbErr};

/// Ping the database to verify the connection pool is usable.
///
/// Used by readiness endpoints; a failure marks the service not ready.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}
