//! Probe implementations
//!
//! Each probe checks one dependency and is responsible for fully
//! containing its own failures: every error path is converted into a
//! `ProbeResult`, never propagated, so one misbehaving dependency cannot
//! abort the cycle for the others.

mod cache;
mod database;
mod filesystem;
mod http;
mod memory;

pub use cache::CacheProbe;
pub use database::DatabaseProbe;
pub use filesystem::FilesystemProbe;
pub use http::HttpEndpointProbe;
pub use memory::{MemoryProbe, MemorySampler, SysinfoSampler};

use crate::health::types::ProbeResult;
use async_trait::async_trait;
use std::time::Duration;

/// Common contract for all probes
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe name, used as the service name in results
    fn name(&self) -> &str;

    /// Deadline for one check; the orchestrator converts an overrun into
    /// a timeout result and discards whatever the probe later produces
    fn timeout(&self) -> Duration;

    /// Run one check; must never return an error, only a result
    async fn check(&self) -> ProbeResult;
}
