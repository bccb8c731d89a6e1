//! Reliability primitives shared by the Seatwise services.
//!
//! - [`retry`]: bounded exponential backoff for transient commit conflicts
//! - [`circuit_breaker`]: failure isolation for the notification gateway
//! - [`audit`]: best-effort asynchronous change capture
//! - [`rate_limit`]: per-client fixed-window request limiting

pub mod audit;
pub mod circuit_breaker;
pub mod rate_limit;
pub mod retry;

pub use audit::AuditPipeline;
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, State};
pub use rate_limit::FixedWindowLimiter;
pub use retry::{RetryPolicy, retry_with_predicate};
