//! Cache (Redis) client handle
//!
//! This module provides Redis connectivity for the cache probe.

use crate::config::CacheConfig;
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use tracing::{debug, info};

/// Cache operations needed by the cache probe
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Server reachability check
    async fn ping(&self) -> Result<()>;

    /// Set a key with a TTL in seconds
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Get a key, `None` when absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete a key
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Redis-backed cache client
#[derive(Debug, Clone)]
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    /// Create a client for the configured host and port
    ///
    /// Opening the client does not touch the network; each operation
    /// obtains a multiplexed connection, so an unreachable server fails
    /// the ping rather than startup.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let url = Self::build_url(config);
        info!("Creating Redis client");
        debug!("Redis URL: {}", Self::sanitize_url(&url));

        let client = Client::open(url.as_str()).map_err(HealthError::Redis)?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(HealthError::Redis)
    }

    fn build_url(config: &CacheConfig) -> String {
        match config.password.as_deref() {
            Some(password) if !password.is_empty() => {
                format!("redis://:{}@{}:{}", password, config.host, config.port)
            }
            _ => format!("redis://{}:{}", config.host, config.port),
        }
    }

    /// Sanitize Redis URL for logging (hide password)
    fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}

#[async_trait]
impl CacheClient for RedisCache {
    async fn ping(&self) -> Result<()> {
        debug!("Performing Redis ping");
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(HealthError::Redis)?;
        debug!("Redis ping succeeded");
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(HealthError::Redis)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(HealthError::Redis)?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(key).await.map_err(HealthError::Redis)?;
        Ok(())
    }
}
