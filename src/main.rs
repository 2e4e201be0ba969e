//! Pulsecheck - concurrent health-check orchestration service

use pulsecheck::health::metrics;
use pulsecheck::server;
use std::process::ExitCode;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Anchor process uptime before anything else runs
    metrics::mark_started();

    // Start server (auto-loads config/pulsecheck.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
