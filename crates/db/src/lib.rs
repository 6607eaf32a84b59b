//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the chart, years, entries and balances
//! - Repositories for journal posting, year close, realignment and reports
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    ChartRepository, FiscalRepository, JournalRepository, LedgerSettings, ReportRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tallybook_shared::config::DatabaseConfig;

/// Establishes a connection pool from the database settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    tracing::debug!(
        max_connections = config.max_connections,
        "Connecting to database"
    );
    Database::connect(options).await
}
