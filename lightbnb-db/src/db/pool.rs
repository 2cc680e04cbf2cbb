//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DbConfig;
use crate::error::Result;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool from resolved configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::load()?).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;
    let max_connections = if config.max_connections == 0 {
        DEFAULT_MAX_CONNECTIONS
    } else {
        config.max_connections
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!(max_connections, "Connected to database");
    Ok(pool)
}

/// Create a PostgreSQL connection pool from a connection string.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_from_url(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the bundled schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    info!("Running LightBnB migrations...");
    crate::MIGRATOR.run(pool).await?;
    Ok(())
}
