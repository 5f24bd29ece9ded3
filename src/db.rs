//! PostgreSQL bootstrap.
//!
//! Opens a connection pool and verifies it with a round trip before handing
//! it to the caller, so a misconfigured database surfaces at startup.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Connection;
use thiserror::Error;

use crate::ServiceConfig;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DbError {
    #[error("database url is not set")]
    MissingUrl,

    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("failed to open database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to ping database: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub pool_min: u32,
    pub pool_max: u32,
    pub connect_timeout: Duration,
}

impl DbConfig {
    /// Pool of 1..=10 connections with a 30 second acquire timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_min: 1,
            pool_max: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_pool_size(mut self, min: u32, max: u32) -> Self {
        self.pool_min = min;
        self.pool_max = max;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl From<&ServiceConfig> for DbConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self::new(config.database_url.clone())
    }
}

/// Opens a pool and pings the database once.
///
/// Returns an error instead of exiting; the caller decides whether a
/// database failure is fatal.
pub async fn connect(config: &DbConfig) -> Result<PgPool, DbError> {
    if config.url.is_empty() {
        return Err(DbError::MissingUrl);
    }

    let options: PgConnectOptions = config.url.parse().map_err(DbError::InvalidUrl)?;

    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min)
        .max_connections(config.pool_max)
        .acquire_timeout(config.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to open database");
            DbError::Connect(e)
        })?;

    let mut conn = pool.acquire().await.map_err(ping_failed)?;
    conn.ping().await.map_err(ping_failed)?;

    tracing::info!(
        pool_min = config.pool_min,
        pool_max = config.pool_max,
        "database connected"
    );
    Ok(pool)
}

/// Both acquiring the health-check connection and the ping itself report here.
fn ping_failed(e: sqlx::Error) -> DbError {
    tracing::error!(error = %e, "failed to ping database");
    DbError::Ping(e)
}
