//! Database connection pool management
//!
//! One `PgPool` per process, built on first use and shared by every request.
//! The provider is constructed explicitly and handed to the repository, so
//! nothing reaches for a global.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config::DatabaseConfig;

/// Lazily-initialized, memoized connection pool.
pub struct PoolProvider {
    config: DatabaseConfig,
    pool: OnceCell<PgPool>,
}

impl PoolProvider {
    /// Create a provider. No connection is opened until `pool()` is called.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    /// Whether a pool has been successfully created.
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Get the shared pool, creating it on the first successful call.
    ///
    /// A failed attempt is not cached; the next caller tries again.
    pub async fn pool(&self) -> Result<&PgPool, sqlx::Error> {
        self.pool
            .get_or_try_init(|| async {
                let options = self.config.connect_options()?;
                tracing::info!(
                    max_connections = self.config.max_connections,
                    "Creating database pool"
                );
                PgPoolOptions::new()
                    .max_connections(self.config.max_connections)
                    .acquire_timeout(self.config.acquire_timeout)
                    .connect_with(options)
                    .await
            })
            .await
    }
}
