pub use sea_orm_migration::prelude::*;

mod m20260801_000000_create_users;
mod m20260801_000001_create_requests;
mod m20260801_000002_create_items;
mod m20260801_000003_create_bookings;
mod m20260801_000004_create_comments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000000_create_users::Migration),
            Box::new(m20260801_000001_create_requests::Migration),
            Box::new(m20260801_000002_create_items::Migration),
            Box::new(m20260801_000003_create_bookings::Migration),
            Box::new(m20260801_000004_create_comments::Migration),
        ]
    }
}
