//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

pub mod cache;
pub mod database;
pub mod external;
pub mod filesystem;
pub mod memory;
pub mod scheduler;
pub mod server;

// Re-export all configuration types
pub use cache::*;
pub use database::*;
pub use external::*;
pub use filesystem::*;
pub use memory::*;
pub use scheduler::*;
pub use server::*;

/// Default bind host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default per-probe timeout in milliseconds
pub fn default_timeout_ms() -> u64 {
    5_000
}

/// Default Redis host
pub fn default_cache_host() -> String {
    "127.0.0.1".to_string()
}

/// Default Redis port
pub fn default_cache_port() -> u16 {
    6379
}

/// Default expected HTTP status for external API probes
pub fn default_expected_status() -> u16 {
    200
}

/// Default memory usage threshold (percent)
pub fn default_max_usage_percent() -> f64 {
    90.0
}

/// Default scheduler interval in seconds
pub fn default_interval_secs() -> u64 {
    60
}

pub fn default_true() -> bool {
    true
}
