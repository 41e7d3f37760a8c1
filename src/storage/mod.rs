mod accounts;
mod transactions;

pub use accounts::*;
pub use transactions::*;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// SQL migration for the initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Connect to a SQLite database, e.g. `sqlite:tally.db?mode=rwc`.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Run database migrations. Safe to call on an already initialized database.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(MIGRATION_001_INITIAL)
        .execute(pool)
        .await
        .context("Failed to run migration 001")?;
    Ok(())
}

/// Connect and migrate.
pub async fn init(database_url: &str) -> Result<SqlitePool> {
    let pool = connect(database_url).await?;
    migrate(&pool).await?;
    Ok(pool)
}
