use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates the process-wide PostgreSQL connection pool.
/// Connects eagerly so an unreachable database fails startup.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}...",
        config.db_host, config.db_port, config.db_name
    );

    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .context("Could not connect to PostgreSQL")?;

    info!(
        "PostgreSQL connection pool established (max_connections={})",
        config.db_max_connections
    );
    Ok(pool)
}
