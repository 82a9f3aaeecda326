//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and timeouts taken from
//! `DbConfig`.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::DbConfig;
use crate::error::Result;

/// Create a PostgreSQL connection pool from resolved configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the first connection
/// fails.
///
/// # Example
///
/// ```no_run
/// # use lightbnb_db::{db::create_pool, DbConfig};
/// # async fn connect() -> lightbnb_db::Result<()> {
/// let config = DbConfig::load(None)?;
/// let pool = create_pool(&config).await?;
/// # pool.close().await;
/// # Ok(())
/// # }
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    config.validate()?;
    let options = config.connect_options()?;
    create_pool_with_options(options, config).await
}

/// Create a pool from prepared connect options, applying the pool limits in
/// `config`.
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    config: &DbConfig,
) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await?;

    info!(
        max_connections = config.max_connections,
        "database connection pool established"
    );
    Ok(pool)
}
