//! External HTTP API probe configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One external HTTP dependency to probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalApiConfig {
    /// Probe name, used as the service name in results
    pub name: String,
    /// URL to issue a GET against
    pub url: String,
    /// Probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Extra request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Expected response status code
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}
