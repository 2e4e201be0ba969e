//! Database probe configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Database probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Enable the database probe
    #[serde(default)]
    pub enabled: bool,
    /// Connection string (postgres:// or sqlite://)
    #[serde(default)]
    pub connection_string: String,
    /// Probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            connection_string: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
