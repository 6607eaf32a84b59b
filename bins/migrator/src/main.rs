//! Database migration runner for Tallybook.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database URL comes from the `TALLYBOOK__DATABASE__URL` setting.

use sea_orm_migration::MigratorTrait;
use tallybook_db::migration::Migrator;
use tallybook_shared::AppConfig;
use tallybook_shared::telemetry::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config.logging)?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let db = tallybook_db::connect(&config.database).await?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        "fresh" => Migrator::fresh(&db).await?,
        other => anyhow::bail!("Unknown command '{other}', expected up, down, status or fresh"),
    }

    info!(command = %command, "Migration command finished");
    Ok(())
}
