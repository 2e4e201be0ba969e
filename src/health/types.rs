//! Health checking types and data structures

use crate::health::metrics::SystemMetrics;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status of one probe, or of the system as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl ProbeStatus {
    /// Severity rank used by the aggregation lattice
    /// (unhealthy > degraded > healthy)
    pub fn severity(self) -> u8 {
        match self {
            ProbeStatus::Healthy => 0,
            ProbeStatus::Degraded => 1,
            ProbeStatus::Unhealthy => 2,
        }
    }

    /// The worse of two statuses
    pub fn worst(self, other: ProbeStatus) -> ProbeStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Outcome of one probe check
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// Probe name
    pub service: String,
    /// Probe status
    pub status: ProbeStatus,
    /// Wall-clock time from dispatch to completion or timeout
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    /// Set at completion
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Probe-specific metadata
    pub details: HashMap<String, serde_json::Value>,
    /// Error message (when not healthy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    /// Build a healthy result
    pub fn healthy(
        service: impl Into<String>,
        response_time_ms: u64,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            service: service.into(),
            status: ProbeStatus::Healthy,
            response_time_ms,
            timestamp: chrono::Utc::now(),
            details,
            error: None,
        }
    }

    /// Build a degraded result
    pub fn degraded(
        service: impl Into<String>,
        response_time_ms: u64,
        error: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            service: service.into(),
            status: ProbeStatus::Degraded,
            response_time_ms,
            timestamp: chrono::Utc::now(),
            details,
            error: Some(error.into()),
        }
    }

    /// Build an unhealthy result
    pub fn unhealthy(
        service: impl Into<String>,
        response_time_ms: u64,
        error: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            service: service.into(),
            status: ProbeStatus::Unhealthy,
            response_time_ms,
            timestamp: chrono::Utc::now(),
            details,
            error: Some(error.into()),
        }
    }
}

/// Per-status counts over one check cycle
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct HealthSummary {
    /// Number of probes that ran
    pub total: usize,
    /// Probes that reported healthy
    pub healthy: usize,
    /// Probes that reported unhealthy
    pub unhealthy: usize,
    /// Probes that reported degraded
    pub degraded: usize,
}

impl HealthSummary {
    /// Count statuses across a cycle's results
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.status {
                ProbeStatus::Healthy => summary.healthy += 1,
                ProbeStatus::Degraded => summary.degraded += 1,
                ProbeStatus::Unhealthy => summary.unhealthy += 1,
            }
        }
        summary
    }
}

/// Aggregate outcome of one full check cycle
///
/// Produced fresh by every orchestrator run; never partially populated.
#[derive(Debug, Clone, Serialize)]
pub struct SystemSnapshot {
    /// Overall status folded over all checks
    pub status: ProbeStatus,
    /// Individual results in probe registration order
    pub checks: Vec<ProbeResult>,
    /// Host and process metrics read at snapshot time
    pub metrics: SystemMetrics,
    /// Per-status counts
    pub summary: HealthSummary,
    /// Snapshot completion time
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
        assert_eq!(
            serde_json::to_string(&ProbeStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn worst_follows_the_lattice() {
        use ProbeStatus::*;
        assert_eq!(Healthy.worst(Degraded), Degraded);
        assert_eq!(Degraded.worst(Unhealthy), Unhealthy);
        assert_eq!(Unhealthy.worst(Healthy), Unhealthy);
        assert_eq!(Healthy.worst(Healthy), Healthy);
    }

    #[test]
    fn result_serializes_to_wire_shape() {
        let result = ProbeResult::healthy("database", 12, HashMap::new());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["service"], "database");
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["responseTime"], 12);
        assert!(json.get("error").is_none());
        assert!(json.get("details").is_some());
    }

    #[test]
    fn summary_counts_each_status() {
        let results = vec![
            ProbeResult::healthy("a", 1, HashMap::new()),
            ProbeResult::degraded("b", 1, "pressure", HashMap::new()),
            ProbeResult::unhealthy("c", 1, "down", HashMap::new()),
            ProbeResult::healthy("d", 1, HashMap::new()),
        ];
        let summary = HealthSummary::from_results(&results);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.healthy, 2);
        assert_eq!(summary.degraded, 1);
        assert_eq!(summary.unhealthy, 1);
    }
}
