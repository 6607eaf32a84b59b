//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The SQL is kept portable
//! between PostgreSQL (production) and SQLite (tests).

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_initial;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000001_initial::Migration)]
    }
}
