//! Database connection handle
//!
//! This module provides database connectivity and pool introspection for
//! the database probe.

use crate::config::DatabaseConfig;
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
#[cfg(feature = "postgres")]
use sea_orm::ConnectionTrait;
use std::time::Duration;
use tracing::{debug, info};

/// Pool occupancy counters surfaced in probe details
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct PoolStats {
    /// Connections currently open
    pub total: u32,
    /// Connections sitting idle in the pool
    pub idle: u32,
    /// Callers waiting for a connection
    pub waiting: u32,
}

/// Pooled relational-database handle
///
/// The probe only needs a trivial read and pool occupancy; keeping the
/// contract this small lets tests stand in a double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabasePool: Send + Sync {
    /// Issue a trivial read to verify connectivity
    async fn ping(&self) -> Result<()>;

    /// Current pool occupancy
    fn stats(&self) -> PoolStats;
}

/// sea-orm backed connection pool
#[derive(Debug, Clone)]
pub struct SeaOrmPool {
    db: DatabaseConnection,
}

impl SeaOrmPool {
    /// Create a pool for the configured connection string
    ///
    /// The connection is lazy: an unreachable database does not fail
    /// startup, it fails the first ping instead.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Creating database connection pool");

        let mut options = ConnectOptions::new(&config.connection_string);
        options
            .max_connections(5)
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .acquire_timeout(Duration::from_millis(config.timeout_ms))
            .idle_timeout(Duration::from_secs(600))
            .connect_lazy(true)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .map_err(HealthError::Database)?;

        debug!("Database connection pool created");
        Ok(Self { db })
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl DatabasePool for SeaOrmPool {
    async fn ping(&self) -> Result<()> {
        debug!("Performing database ping");
        self.db.ping().await.map_err(HealthError::Database)?;
        debug!("Database ping succeeded");
        Ok(())
    }

    fn stats(&self) -> PoolStats {
        #[cfg(feature = "postgres")]
        if self.db.get_database_backend() == sea_orm::DbBackend::Postgres {
            let pool = self.db.get_postgres_connection_pool();
            return PoolStats {
                total: pool.size(),
                idle: pool.num_idle() as u32,
                // sqlx does not expose a waiting-acquires gauge
                waiting: 0,
            };
        }

        PoolStats::default()
    }
}
