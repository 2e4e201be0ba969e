//! Check-cycle orchestration
//!
//! Dispatches every enabled probe concurrently, bounds each one by its own
//! deadline, joins on all of them, and folds the results into one
//! `SystemSnapshot`.

use crate::health::metrics;
use crate::health::probes::Probe;
use crate::health::result_cache::ResultCache;
use crate::health::types::{HealthSummary, ProbeResult, ProbeStatus, SystemSnapshot};
use crate::utils::error::HealthError;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Fold many probe statuses into one by the priority lattice
/// unhealthy > degraded > healthy
pub fn fold_status(results: &[ProbeResult]) -> ProbeStatus {
    results
        .iter()
        .fold(ProbeStatus::Healthy, |acc, result| acc.worst(result.status))
}

/// Runs all enabled probes and aggregates their results
pub struct Orchestrator {
    probes: Vec<Arc<dyn Probe>>,
    cache: Arc<ResultCache>,
}

impl Orchestrator {
    /// Create an orchestrator over the enabled probes, in the order their
    /// results should appear in snapshots
    pub fn new(probes: Vec<Arc<dyn Probe>>) -> Self {
        Self {
            probes,
            cache: Arc::new(ResultCache::new()),
        }
    }

    /// Last-known results from previous cycles
    pub fn result_cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Number of registered probes
    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    /// Run one full check cycle
    ///
    /// Waits for every dispatched probe to complete or hit its own
    /// deadline; a slow probe delays only itself. Safe to run
    /// concurrently with another cycle: probes are idempotent and cache
    /// writes are last-writer-wins per probe name.
    pub async fn run_all(&self) -> SystemSnapshot {
        debug!("Running check cycle over {} probes", self.probes.len());

        let checks = join_all(self.probes.iter().cloned().map(Self::run_bounded)).await;

        let status = fold_status(&checks);
        let summary = HealthSummary::from_results(&checks);

        for result in &checks {
            self.cache.store(result.clone());
        }

        debug!(?status, "Check cycle finished");
        SystemSnapshot {
            status,
            checks,
            metrics: metrics::collect(),
            summary,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn run_bounded(probe: Arc<dyn Probe>) -> ProbeResult {
        let deadline = probe.timeout();
        let start = Instant::now();

        match tokio::time::timeout(deadline, probe.check()).await {
            Ok(result) => result,
            // The underlying I/O may still be running; its eventual
            // outcome is discarded along with the future.
            Err(_) => ProbeResult::unhealthy(
                probe.name(),
                start.elapsed().as_millis() as u64,
                HealthError::Timeout(deadline.as_millis() as u64).to_string(),
                HashMap::new(),
            ),
        }
    }
}
