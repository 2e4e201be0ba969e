//! Configuration management for the health-check service
//!
//! This module handles loading, validation, and management of all service
//! configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an alternative config file path
pub const CONFIG_PATH_ENV: &str = "PULSECHECK_CONFIG";

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "config/pulsecheck.yaml";

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database probe configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Cache probe configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// External HTTP API probes, one per dependency
    #[serde(default)]
    pub external_apis: Vec<ExternalApiConfig>,
    /// Filesystem probe configuration
    #[serde(default)]
    pub filesystem: FilesystemConfig,
    /// Memory probe configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Background scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HealthError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Resolve the config file path, honoring `PULSECHECK_CONFIG`
    pub fn resolve_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get scheduler configuration
    pub fn scheduler(&self) -> &SchedulerConfig {
        &self.scheduler
    }

    /// Number of enabled probes
    pub fn enabled_probe_count(&self) -> usize {
        let mut count = self.external_apis.len();
        if self.database.enabled {
            count += 1;
        }
        if self.cache.enabled {
            count += 1;
        }
        if self.filesystem.enabled {
            count += 1;
        }
        if self.memory.enabled {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_every_probe() {
        let config = Config::default();
        assert_eq!(config.enabled_probe_count(), 0);
        assert!(config.scheduler.enabled);
        assert_eq!(config.scheduler.interval_secs, 60);
    }

    #[test]
    fn yaml_sections_fill_in_defaults() {
        let yaml = r#"
database:
  enabled: true
  connection_string: "postgres://localhost/app"
cache:
  enabled: true
  host: "redis.internal"
external_apis:
  - name: billing
    url: "https://billing.example.com/ping"
    expected_status: 204
memory:
  enabled: true
  max_usage_percent: 85
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.database.enabled);
        assert_eq!(config.database.timeout_ms, 5_000);
        assert_eq!(config.cache.port, 6379);
        assert_eq!(config.external_apis[0].expected_status, 204);
        assert!(config.external_apis[0].headers.is_empty());
        assert!(!config.filesystem.enabled);
        assert_eq!(config.enabled_probe_count(), 4);
        config.validate().unwrap();
    }
}
