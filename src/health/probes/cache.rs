//! Cache probe

use crate::clients::CacheClient;
use crate::config::CacheConfig;
use crate::health::probes::Probe;
use crate::health::types::ProbeResult;
use crate::utils::error::HealthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// TTL backstop so a crashed check never leaves the test key behind
const ROUND_TRIP_TTL_SECS: u64 = 10;

/// Pings the cache, then verifies a write/read/delete round trip on an
/// ephemeral key
pub struct CacheProbe {
    client: Arc<dyn CacheClient>,
    timeout: Duration,
}

impl CacheProbe {
    pub const NAME: &'static str = "cache";

    /// Create a probe over an already-initialized client
    pub fn new(client: Arc<dyn CacheClient>, config: &CacheConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    fn fail(start: Instant, error: String) -> ProbeResult {
        ProbeResult::unhealthy(
            Self::NAME,
            start.elapsed().as_millis() as u64,
            error,
            HashMap::new(),
        )
    }
}

#[async_trait]
impl Probe for CacheProbe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn check(&self) -> ProbeResult {
        let start = Instant::now();

        if let Err(e) = self.client.ping().await {
            return Self::fail(start, e.to_string());
        }

        let key = format!("pulsecheck:probe:{}", Uuid::new_v4());
        let value = Uuid::new_v4().to_string();

        if let Err(e) = self.client.set_ex(&key, &value, ROUND_TRIP_TTL_SECS).await {
            return Self::fail(start, e.to_string());
        }

        let read = self.client.get(&key).await;

        // The test key is removed on every exit path; the TTL only covers
        // a crashed process.
        if let Err(e) = self.client.delete(&key).await {
            debug!("Failed to delete cache test key: {}", e);
        }

        match read {
            Ok(Some(stored)) if stored == value => {
                let mut details = HashMap::new();
                details.insert("roundTrip".to_string(), "ok".into());
                ProbeResult::healthy(Self::NAME, start.elapsed().as_millis() as u64, details)
            }
            Ok(stored) => Self::fail(
                start,
                HealthError::Integrity(format!(
                    "read-after-write returned {}",
                    match stored {
                        Some(_) => "a different value",
                        None => "no value",
                    }
                ))
                .to_string(),
            ),
            Err(e) => Self::fail(start, e.to_string()),
        }
    }
}
