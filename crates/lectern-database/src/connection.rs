//! PostgreSQL pool lifecycle: connect, probe, close.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use lectern_core::config::DatabaseConfig;
use lectern_core::error::{AppError, ErrorKind};
use lectern_core::result::AppResult;

/// Owns the PostgreSQL connection pool for the application's lifetime.
///
/// Cloning is cheap; every clone shares the same underlying pool, and
/// closing any clone closes them all.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool against the configured database.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to connect to database", e)
            })?;

        info!("Database pool ready");
        Ok(Self { pool })
    }

    /// The underlying sqlx pool, for repositories and migrations.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip probe used by the health endpoint.
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))?;
        Ok(())
    }

    /// Drain and close every connection. Called on graceful shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Hides the password portion of a connection URL for logging.
fn mask_password(url: &str) -> String {
    let Some((credentials, host)) = url.split_once('@') else {
        return url.to_string();
    };
    match credentials.rsplit_once(':') {
        Some((user, password)) if !password.contains('/') => format!("{user}:****@{host}"),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked_in_urls() {
        assert_eq!(
            mask_password("postgres://lectern:hunter2@db:5432/lectern"),
            "postgres://lectern:****@db:5432/lectern"
        );
    }

    #[test]
    fn urls_without_credentials_pass_through() {
        assert_eq!(
            mask_password("postgres://localhost:5432/lectern"),
            "postgres://localhost:5432/lectern"
        );
        assert_eq!(
            mask_password("postgres://lectern@db/lectern"),
            "postgres://lectern@db/lectern"
        );
    }
}
