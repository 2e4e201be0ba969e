//! Cache probe configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Cache (Redis) probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable the cache probe
    #[serde(default)]
    pub enabled: bool,
    /// Redis host
    #[serde(default = "default_cache_host")]
    pub host: String,
    /// Redis port
    #[serde(default = "default_cache_port")]
    pub port: u16,
    /// Redis password (optional)
    #[serde(default)]
    pub password: Option<String>,
    /// Probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_cache_host(),
            port: default_cache_port(),
            password: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}
