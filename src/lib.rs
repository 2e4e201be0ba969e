//! # Pulsecheck
//!
//! A health-check orchestration service: probes heterogeneous
//! dependencies (database, cache, external HTTP APIs, filesystem, process
//! memory) concurrently, enforces per-probe timeouts, aggregates the
//! results into a tri-state system status, and exposes readiness and
//! liveness endpoints for load balancers and orchestration layers.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pulsecheck::config::Config;
//! use pulsecheck::server::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/pulsecheck.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod clients;
pub mod config;
pub mod health;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use health::{Orchestrator, ProbeResult, ProbeStatus, Scheduler, SystemSnapshot};
pub use utils::error::{HealthError, Result};
