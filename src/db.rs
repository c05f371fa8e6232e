use std::time::Duration;

use redis::aio::ConnectionManager;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Type alias for the PostgreSQL connection pool
pub type DbPool = PgPool;

/// Creates and configures a PostgreSQL connection pool
pub async fn create_pool(database_url: &str, pool_size: u32) -> Result<DbPool, sqlx::Error> {
    tracing::debug!("Creating database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(pool_size)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Creates a managed Redis connection for the refresh-token revocation store.
/// The manager multiplexes and reconnects; it is cheap to clone per request.
pub async fn create_redis_manager(redis_url: &str) -> Result<ConnectionManager, redis::RedisError> {
    tracing::debug!("Connecting to Redis");

    let client = redis::Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;

    tracing::info!("Redis connection established");
    Ok(manager)
}
