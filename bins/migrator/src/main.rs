//! Database migration runner for Finboard.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database URL comes from `DATABASE_URL`, falling back to the
//! `database.url` setting of the server configuration.

use anyhow::{Context, bail};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use finboard_db::{connect_with, migration::Migrator};
use finboard_shared::AppConfig;
use finboard_shared::config::DatabaseConfig;

fn database_config() -> anyhow::Result<DatabaseConfig> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(DatabaseConfig::from_url(url));
    }
    let config = AppConfig::load().context("DATABASE_URL is not set and no configuration found")?;
    Ok(config.database)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finboard=info,sea_orm_migration=info".into()),
        )
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let db = connect_with(&database_config()?)
        .await
        .context("Failed to connect to database")?;

    match command.as_str() {
        "up" => {
            Migrator::up(&db, None).await?;
            info!("Migrations applied");
        }
        "down" => {
            Migrator::down(&db, Some(1)).await?;
            info!("Last migration rolled back");
        }
        "status" => Migrator::status(&db).await?,
        "fresh" => {
            Migrator::fresh(&db).await?;
            info!("Schema dropped and migrations re-applied");
        }
        other => bail!("Unknown command `{other}`; expected up, down, status or fresh"),
    }

    Ok(())
}
