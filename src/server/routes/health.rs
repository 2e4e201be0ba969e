//! Readiness, liveness, and version endpoints

use crate::health::metrics;
use crate::health::types::ProbeStatus;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(readiness))
            .route("/simple", web::get().to(liveness)),
    )
    .route("/version", web::get().to(version_info));
}

/// Readiness endpoint
///
/// Triggers a fresh check cycle on every request (never served from the
/// result cache) and returns the full snapshot. 200 while the service is
/// usable (healthy or degraded); 503 only when unhealthy, so load
/// balancers stop routing traffic here.
pub async fn readiness(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Readiness check requested");

    let snapshot = state.orchestrator.run_all().await;

    let status_code = match snapshot.status {
        ProbeStatus::Unhealthy => actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
        ProbeStatus::Healthy | ProbeStatus::Degraded => actix_web::http::StatusCode::OK,
    };

    Ok(HttpResponse::build(status_code).json(snapshot))
}

/// Liveness endpoint
///
/// Probes nothing: it answers as long as the process can respond, so
/// orchestration layers can tell "restart me" apart from "stop routing
/// traffic to me".
pub async fn liveness() -> ActixResult<HttpResponse> {
    debug!("Liveness check requested");

    let liveness = LivenessStatus {
        status: Cow::Borrowed("healthy"),
        uptime: metrics::uptime_seconds(),
        timestamp: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(liveness))
}

/// Version information endpoint
pub async fn version_info() -> ActixResult<HttpResponse> {
    debug!("Version info requested");

    let version_info = VersionInfo {
        service: Cow::Borrowed("pulsecheck"),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(version_info))
}

/// Liveness response body
#[derive(Debug, Clone, serde::Serialize)]
struct LivenessStatus {
    status: Cow<'static, str>,
    uptime: u64,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// Version response body
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    service: Cow<'static, str>,
    version: Cow<'static, str>,
}
