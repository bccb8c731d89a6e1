//! Health check endpoints for load balancers and monitoring.

use axum::http::StatusCode;

/// `GET /health` — liveness. Checks nothing beyond the process being up.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// `GET /ready` — readiness. All dependencies are in-process, so readiness
/// follows liveness.
#[allow(clippy::unused_async)]
pub async fn readiness_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ready")
}
