//! PostgreSQL connection handle

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::HealthProbe;
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Owns the connection pool for the lifetime of the server.
///
/// Lifecycle: [`Database::connect`] once at startup, [`Database::migrate`]
/// when the database was reachable, hand clones to the repository, and
/// [`Database::close`] after the HTTP server has drained.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    online: bool,
}

impl Database {
    /// Connect to the configured database.
    ///
    /// An unreachable database is not fatal: a warning is logged and a lazy
    /// pool is returned, so requests fail at call time instead.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match pool_options(config).connect(&config.url).await {
            Ok(pool) => {
                tracing::info!("Connected to database");
                Ok(Self { pool, online: true })
            }
            Err(e) => {
                tracing::warn!(
                    "Database connection failed: {}. Serving without a database; requests touching it will fail",
                    e
                );
                let pool = pool_options(config).connect_lazy(&config.url)?;
                Ok(Self {
                    pool,
                    online: false,
                })
            }
        }
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool, online: true }
    }

    /// Whether the startup connection succeeded
    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to run database migrations: {}", e)))?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
}

#[async_trait]
impl HealthProbe for Database {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
