//! Background scheduler configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Background check-cycle scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Enable the background scheduler
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval between check cycles in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
        }
    }
}
