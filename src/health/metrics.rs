//! Host and process metrics collection using the sysinfo crate

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;
use sysinfo::System;

static SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| Mutex::new(System::new_all()));

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Host memory occupancy
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    /// Bytes in use
    pub used_bytes: u64,
    /// Bytes installed
    pub total_bytes: u64,
    /// Used as a percentage of total
    pub percent: f64,
}

/// Process and host metrics read at snapshot time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    /// Memory occupancy
    pub memory: MemoryMetrics,
    /// Process uptime in seconds
    pub uptime: u64,
    /// 1/5/15 minute load averages, absent on unsupported platforms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_average: Option<[f64; 3]>,
    /// Service version
    pub version: &'static str,
    /// OS process id
    pub process_id: u32,
}

/// Record process start; called once from main, later calls are no-ops
pub fn mark_started() {
    let _ = START_TIME.set(Instant::now());
}

/// Seconds since `mark_started` (or since first observation)
pub fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(Instant::now);
    start.elapsed().as_secs()
}

/// Current host memory occupancy
pub fn memory() -> MemoryMetrics {
    let mut sys = SYSTEM.lock();
    sys.refresh_memory();
    let used_bytes = sys.used_memory();
    let total_bytes = sys.total_memory();
    let percent = if total_bytes == 0 {
        0.0
    } else {
        (used_bytes as f64 / total_bytes as f64) * 100.0
    };
    MemoryMetrics {
        used_bytes,
        total_bytes,
        percent,
    }
}

/// Read all metrics for a snapshot; nothing here is cached between calls
pub fn collect() -> SystemMetrics {
    let load = System::load_average();
    let load_average = if cfg!(target_os = "windows") {
        None
    } else {
        Some([load.one, load.five, load.fifteen])
    };

    SystemMetrics {
        memory: memory(),
        uptime: uptime_seconds(),
        load_average,
        version: env!("CARGO_PKG_VERSION"),
        process_id: std::process::id(),
    }
}
