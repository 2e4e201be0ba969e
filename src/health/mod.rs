//! Health-check orchestration engine
//!
//! Probes heterogeneous dependencies concurrently, bounds each probe by
//! its own deadline, aggregates the results into a tri-state system
//! status, and keeps the last-known result per probe between cycles.

pub mod metrics;
pub mod orchestrator;
pub mod probes;
pub mod result_cache;
pub mod scheduler;
pub mod types;


pub use orchestrator::{Orchestrator, fold_status};
pub use result_cache::ResultCache;
pub use scheduler::Scheduler;
pub use types::{HealthSummary, ProbeResult, ProbeStatus, SystemSnapshot};
