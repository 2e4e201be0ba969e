//! Last-known-result store
//!
//! Keeps the most recent result for each probe between cycles. Writes are
//! independent per probe name with last-writer-wins semantics; nothing is
//! merged and nothing survives a restart.

use crate::health::types::ProbeResult;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory map from probe name to its most recent result
#[derive(Debug, Default)]
pub struct ResultCache {
    results: RwLock<HashMap<String, ProbeResult>>,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entry for one probe
    pub fn store(&self, result: ProbeResult) {
        let mut results = self.results.write();
        results.insert(result.service.clone(), result);
    }

    /// Most recent result for a probe, if it has ever run
    pub fn get(&self, service: &str) -> Option<ProbeResult> {
        self.results.read().get(service).cloned()
    }

    /// All cached results
    pub fn all(&self) -> Vec<ProbeResult> {
        self.results.read().values().cloned().collect()
    }

    /// Number of probes with a cached result
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    /// True when no probe has run yet
    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::types::ProbeStatus;
    use std::collections::HashMap as Map;

    #[test]
    fn last_writer_wins_per_service() {
        let cache = ResultCache::new();
        cache.store(ProbeResult::healthy("database", 5, Map::new()));
        cache.store(ProbeResult::unhealthy("database", 9, "refused", Map::new()));

        let stored = cache.get("database").unwrap();
        assert_eq!(stored.status, ProbeStatus::Unhealthy);
        assert_eq!(stored.response_time_ms, 9);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn entries_are_independent_per_service() {
        let cache = ResultCache::new();
        cache.store(ProbeResult::healthy("database", 5, Map::new()));
        cache.store(ProbeResult::degraded("memory", 1, "pressure", Map::new()));

        assert_eq!(cache.get("database").unwrap().status, ProbeStatus::Healthy);
        assert_eq!(cache.get("memory").unwrap().status, ProbeStatus::Degraded);
        assert!(cache.get("cache").is_none());
    }
}
