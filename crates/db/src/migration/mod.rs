//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration and written with the
//! schema DSL so they run on both Postgres and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_users;
mod m20260301_000002_transactions;
mod m20260301_000003_sessions;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_users::Migration),
            Box::new(m20260301_000002_transactions::Migration),
            Box::new(m20260301_000003_sessions::Migration),
        ]
    }
}
