//! Connection pool construction and schema migrations.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

use crate::config::{DatabaseConfig, SslMode};
use crate::ports::StoreError;

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

/// Builds connect options from the URL, with the configured TLS mode
/// taking precedence over any `sslmode` query parameter.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, StoreError> {
    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| StoreError::connection(format!("Invalid database URL: {}", e)))?;
    Ok(options.ssl_mode(config.ssl_mode.into()))
}

/// Opens the shared connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let options = connect_options(config)?;

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect_with(options)
        .await
        .map_err(|e| StoreError::connection(format!("Failed to connect to database: {}", e)))?;

    tracing::info!(
        max_connections = config.max_connections,
        ssl_mode = ?config.ssl_mode,
        "Database pool ready"
    );

    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::query(format!("Migration failed: {}", e)))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
