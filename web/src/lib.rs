//! # Seatwise Web
//!
//! Axum HTTP surface for the registration service: thin handlers over the
//! application services, a domain-to-HTTP error bridge, and the two tower
//! layers every request passes through (request logging with correlation
//! IDs, per-client rate limiting on the customer API paths).

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::ClientKey;
pub use middleware::{
    CORRELATION_ID_HEADER, RATE_LIMITED_BODY, rate_limit_layer, request_log_layer,
};
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
