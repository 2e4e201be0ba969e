//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::health::Orchestrator;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Health-check orchestrator
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator,
        }
    }
}
