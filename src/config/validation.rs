//! Configuration validation
//!
//! All configuration is validated once at startup; probes can then trust
//! their own sections without defensive re-checks.

use super::models::*;
use super::Config;
use crate::utils::error::{HealthError, Result};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Validation trait for configuration sections
pub trait Validate {
    /// Validate the configuration, returning a descriptive error for the
    /// first problem found
    fn validate(&self) -> Result<()>;
}

impl Validate for Config {
    fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.database.validate()?;
        self.cache.validate()?;
        self.memory.validate()?;
        self.scheduler.validate()?;

        let mut names = HashSet::new();
        for api in &self.external_apis {
            api.validate()?;
            if !names.insert(api.name.as_str()) {
                return Err(HealthError::Config(format!(
                    "Duplicate external API name: {}",
                    api.name
                )));
            }
        }

        if self.server.port == 0 {
            return Err(HealthError::Config(
                "server.port must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.connection_string.is_empty() {
            return Err(HealthError::Config(
                "database.connection_string is required when the database probe is enabled"
                    .to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(HealthError::Config(
                "database.timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.host.is_empty() {
            return Err(HealthError::Config(
                "cache.host is required when the cache probe is enabled".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(HealthError::Config(
                "cache.port must be non-zero".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(HealthError::Config(
                "cache.timeout_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ExternalApiConfig {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(HealthError::Config(
                "external API entries need a non-empty name".to_string(),
            ));
        }

        let url = Url::parse(&self.url).map_err(|e| {
            HealthError::Config(format!("external API {} has an invalid URL: {}", self.name, e))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(HealthError::Config(format!(
                    "external API {} must use http:// or https://, got: {}",
                    self.name, scheme
                )));
            }
        }

        if self.timeout_ms == 0 {
            return Err(HealthError::Config(format!(
                "external API {} timeout_ms must be non-zero",
                self.name
            )));
        }
        Ok(())
    }
}

impl Validate for MemoryConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if !(self.max_usage_percent > 0.0 && self.max_usage_percent <= 100.0) {
            return Err(HealthError::Config(format!(
                "memory.max_usage_percent must be in (0, 100], got: {}",
                self.max_usage_percent
            )));
        }
        Ok(())
    }
}

impl Validate for SchedulerConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled && self.interval_secs == 0 {
            return Err(HealthError::Config(
                "scheduler.interval_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_database_requires_connection_string() {
        let config = DatabaseConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DatabaseConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn external_api_rejects_bad_urls() {
        let api = ExternalApiConfig {
            name: "payments".to_string(),
            url: "ftp://example.com".to_string(),
            timeout_ms: 1000,
            headers: Default::default(),
            expected_status: 200,
        };
        assert!(api.validate().is_err());

        let api = ExternalApiConfig {
            url: "https://example.com/health".to_string(),
            ..api
        };
        assert!(api.validate().is_ok());
    }

    #[test]
    fn duplicate_external_api_names_are_rejected() {
        let api = ExternalApiConfig {
            name: "same".to_string(),
            url: "https://example.com".to_string(),
            timeout_ms: 1000,
            headers: Default::default(),
            expected_status: 200,
        };
        let config = Config {
            external_apis: vec![api.clone(), api],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn memory_threshold_bounds() {
        let mut config = MemoryConfig {
            enabled: true,
            max_usage_percent: 0.0,
        };
        assert!(config.validate().is_err());
        config.max_usage_percent = 101.0;
        assert!(config.validate().is_err());
        config.max_usage_percent = 90.0;
        assert!(config.validate().is_ok());
    }
}
