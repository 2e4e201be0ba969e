//! Memory probe

use crate::config::MemoryConfig;
use crate::health::metrics::{self, MemoryMetrics};
use crate::health::probes::Probe;
use crate::health::types::ProbeResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Reading memory is a local operation; the deadline only covers
/// scheduling overhead
const MEMORY_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Source of memory readings; a trait so tests can simulate pressure
pub trait MemorySampler: Send + Sync {
    /// Current memory occupancy
    fn sample(&self) -> MemoryMetrics;
}

/// Samples real host memory through sysinfo
pub struct SysinfoSampler;

impl MemorySampler for SysinfoSampler {
    fn sample(&self) -> MemoryMetrics {
        metrics::memory()
    }
}

/// Compares memory usage against the configured threshold
///
/// Exceeding the threshold reports degraded, not unhealthy: the process
/// is still serving, just under pressure.
pub struct MemoryProbe {
    sampler: Arc<dyn MemorySampler>,
    max_usage_percent: f64,
}

impl MemoryProbe {
    pub const NAME: &'static str = "memory";

    /// Create a probe over the given sampler
    pub fn new(sampler: Arc<dyn MemorySampler>, config: &MemoryConfig) -> Self {
        Self {
            sampler,
            max_usage_percent: config.max_usage_percent,
        }
    }
}

#[async_trait]
impl Probe for MemoryProbe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeout(&self) -> Duration {
        MEMORY_PROBE_TIMEOUT
    }

    async fn check(&self) -> ProbeResult {
        let start = Instant::now();
        let sample = self.sampler.sample();

        let mut details = HashMap::new();
        details.insert("usedBytes".to_string(), sample.used_bytes.into());
        details.insert("totalBytes".to_string(), sample.total_bytes.into());
        details.insert("usagePercent".to_string(), sample.percent.into());
        details.insert("threshold".to_string(), self.max_usage_percent.into());

        let elapsed = start.elapsed().as_millis() as u64;
        if sample.percent > self.max_usage_percent {
            ProbeResult::degraded(
                Self::NAME,
                elapsed,
                format!(
                    "memory usage {:.1}% exceeds threshold {:.1}%",
                    sample.percent, self.max_usage_percent
                ),
                details,
            )
        } else {
            ProbeResult::healthy(Self::NAME, elapsed, details)
        }
    }
}
