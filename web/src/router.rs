//! Router assembly.

use crate::handlers::{attendees, events, health, registrations};
use crate::middleware::{rate_limit_layer, request_log_layer};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use seatwise_runtime::FixedWindowLimiter;
use std::sync::Arc;

/// Build the full application router.
///
/// The rate-limit layer sits inside the request-log layer: every request is
/// logged, including the ones the limiter rejects.
pub fn build_router(state: AppState, limiter: Arc<FixedWindowLimiter>) -> Router {
    Router::new()
        .route("/api/events", post(events::create_event).get(events::list_events))
        .route("/api/events/:id", get(events::get_event))
        .route(
            "/api/attendees",
            post(attendees::create_attendee).get(attendees::list_attendees),
        )
        .route(
            "/api/registrations",
            post(registrations::create_registration).get(registrations::list_registrations),
        )
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .layer(rate_limit_layer(limiter))
        .layer(request_log_layer())
        .with_state(state)
}
