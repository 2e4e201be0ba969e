//! Filesystem probe

use crate::config::{FilesystemConfig, FsPermissions, PathCheck};
use crate::health::probes::Probe;
use crate::health::types::ProbeResult;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Verifies existence and requested permissions for each configured path
///
/// Write permission on a directory is validated by actually creating and
/// deleting a uniquely-named temp file, not by checking mode bits.
pub struct FilesystemProbe {
    paths: Vec<PathCheck>,
    permissions: FsPermissions,
    timeout: Duration,
}

/// Outcome for one configured path, surfaced in the probe details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathReport {
    path: String,
    required: bool,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    readable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    writable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FilesystemProbe {
    pub const NAME: &'static str = "filesystem";

    /// Create a probe for the configured paths
    pub fn new(config: &FilesystemConfig) -> Self {
        Self {
            paths: config.paths.clone(),
            permissions: config.permissions.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    async fn check_path(&self, check: &PathCheck) -> PathReport {
        let path = &check.path;
        let mut report = PathReport {
            path: path.display().to_string(),
            required: check.required,
            exists: false,
            readable: None,
            writable: None,
            error: None,
        };

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                report.error = Some(format!("does not exist: {}", e));
                return report;
            }
        };
        report.exists = true;

        if self.permissions.read {
            let readable = Self::verify_read(path, metadata.is_dir()).await;
            if let Err(e) = &readable {
                report.error = Some(format!("not readable: {}", e));
            }
            report.readable = Some(readable.is_ok());
        }

        if self.permissions.write {
            let writable = Self::verify_write(path, metadata.is_dir()).await;
            if let Err(e) = &writable {
                report.error = Some(format!("not writable: {}", e));
            }
            report.writable = Some(writable.is_ok());
        }

        report
    }

    async fn verify_read(path: &Path, is_dir: bool) -> std::io::Result<()> {
        if is_dir {
            tokio::fs::read_dir(path).await.map(|_| ())
        } else {
            tokio::fs::File::open(path).await.map(|_| ())
        }
    }

    async fn verify_write(path: &Path, is_dir: bool) -> std::io::Result<()> {
        if is_dir {
            let probe_file = path.join(format!(".pulsecheck-write-{}", Uuid::new_v4()));
            let outcome = tokio::fs::write(&probe_file, b"ok").await;
            // Remove regardless of the write outcome; a failed write can
            // still leave an empty file behind.
            if let Err(e) = tokio::fs::remove_file(&probe_file).await {
                if outcome.is_ok() {
                    debug!("Failed to remove write-test file: {}", e);
                }
            }
            outcome
        } else {
            let metadata = tokio::fs::metadata(path).await?;
            if metadata.permissions().readonly() {
                Err(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "file is read-only",
                ))
            } else {
                Ok(())
            }
        }
    }
}

#[async_trait]
impl Probe for FilesystemProbe {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn check(&self) -> ProbeResult {
        let start = Instant::now();

        let mut reports = Vec::with_capacity(self.paths.len());
        for check in &self.paths {
            reports.push(self.check_path(check).await);
        }

        // One verdict across all configured paths, not per path.
        let failed: Vec<&PathReport> = reports
            .iter()
            .filter(|r| r.required && r.error.is_some())
            .collect();

        let mut details = HashMap::new();
        details.insert(
            "paths".to_string(),
            serde_json::to_value(&reports).unwrap_or_default(),
        );

        let elapsed = start.elapsed().as_millis() as u64;
        if failed.is_empty() {
            ProbeResult::healthy(Self::NAME, elapsed, details)
        } else {
            let failing: Vec<&str> = failed.iter().map(|r| r.path.as_str()).collect();
            ProbeResult::unhealthy(
                Self::NAME,
                elapsed,
                format!("required path check failed: {}", failing.join(", ")),
                details,
            )
        }
    }
}
