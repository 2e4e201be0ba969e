//! Database probe

use crate::clients::DatabasePool;
use crate::config::DatabaseConfig;
use crate::health::probes::Probe;
use crate::health::types::ProbeResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Waiting acquires above this are flagged as pool saturation in the
/// details; saturation alone never flips the status
const POOL_WAITING_SOFT_BOUND: u32 = 0;

/// Checks database connectivity with a trivial read and reports pool
/// occupancy
pub struct DatabaseProbe {
    pool: Arc<dyn DatabasePool>,
    timeout: Duration,
}

impl DatabaseProbe {
    pub const NAME: &'static str = "database";

    /// Create a probe over an already-initialized pool
    pub fn new(pool: Arc<dyn DatabasePool>, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

#[async_trait]
impl Probe for DatabaseProbe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn check(&self) -> ProbeResult {
        let start = Instant::now();

        match self.pool.ping().await {
            Ok(()) => {
                let stats = self.pool.stats();
                let mut details = HashMap::new();
                details.insert("total".to_string(), stats.total.into());
                details.insert("idle".to_string(), stats.idle.into());
                details.insert("waiting".to_string(), stats.waiting.into());
                if stats.waiting > POOL_WAITING_SOFT_BOUND {
                    debug!(waiting = stats.waiting, "Database pool saturated");
                    details.insert("saturated".to_string(), true.into());
                }

                ProbeResult::healthy(Self::NAME, start.elapsed().as_millis() as u64, details)
            }
            Err(e) => ProbeResult::unhealthy(
                Self::NAME,
                start.elapsed().as_millis() as u64,
                e.to_string(),
                HashMap::new(),
            ),
        }
    }
}
