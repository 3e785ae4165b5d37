//! Postgres pool construction.

use crate::infra::config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Connects a pool using `DATABASE_URL` / `DB_MAX_CONNECTIONS`.
pub async fn connect_from_env() -> anyhow::Result<PgPool> {
    let database_url = config::database_url()?;
    connect(&database_url, config::db_max_connections()).await
}

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Runs `SELECT 1` and logs the outcome; used once at startup.
pub async fn check_connection(pool: &PgPool) -> anyhow::Result<()> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    info!(result = one, "database check: SELECT 1");
    Ok(())
}
