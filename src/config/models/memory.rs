//! Memory probe configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Process memory probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Enable the memory probe
    #[serde(default)]
    pub enabled: bool,
    /// Usage percentage above which the probe reports degraded
    #[serde(default = "default_max_usage_percent")]
    pub max_usage_percent: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_usage_percent: default_max_usage_percent(),
        }
    }
}
