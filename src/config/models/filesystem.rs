//! Filesystem probe configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemConfig {
    /// Enable the filesystem probe
    #[serde(default)]
    pub enabled: bool,
    /// Paths to verify
    #[serde(default)]
    pub paths: Vec<PathCheck>,
    /// Which permissions to verify on each path
    #[serde(default)]
    pub permissions: FsPermissions,
    /// Probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FilesystemConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            paths: Vec::new(),
            permissions: FsPermissions::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// One path to verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathCheck {
    /// Filesystem path
    pub path: PathBuf,
    /// A missing required path fails the whole probe; a missing or
    /// unwritable optional path is only recorded in the details
    #[serde(default = "default_true")]
    pub required: bool,
}

/// Permissions validated per path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsPermissions {
    /// Verify read access
    #[serde(default = "default_true")]
    pub read: bool,
    /// Verify write access (for directories, by creating and deleting a
    /// uniquely-named temp file)
    #[serde(default)]
    pub write: bool,
}

impl Default for FsPermissions {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
        }
    }
}
