//! Configuration management for the Seatwise server.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application server configuration.
    pub server: ServerConfig,
    /// Customer API rate limiting.
    pub rate_limit: RateLimitConfig,
    /// Notification circuit breaker thresholds.
    pub breaker: BreakerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Metrics server host (for Prometheus scraping).
    pub metrics_host: String,
    /// Metrics server port.
    pub metrics_port: u16,
    /// Graceful shutdown timeout in seconds.
    pub shutdown_timeout: u64,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per client per window.
    pub requests_per_minute: u32,
}

impl RateLimitConfig {
    /// The fixed one-minute window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_secs(60)
    }
}

/// Notification circuit breaker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerConfig {
    /// Consecutive delivery failures before the circuit opens.
    pub failure_threshold: usize,
    /// Seconds the circuit stays open before probing recovery.
    pub cooldown_seconds: u64,
    /// Successful probes required to close the circuit again.
    pub success_threshold: usize,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
                metrics_host: env::var("METRICS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                metrics_port: env::var("METRICS_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(9090),
                shutdown_timeout: env::var("SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: env::var("RATE_LIMIT_REQUESTS_PER_MINUTE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            },
            breaker: BreakerConfig {
                failure_threshold: env::var("NOTIFICATION_BREAKER_FAILURE_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
                cooldown_seconds: env::var("NOTIFICATION_BREAKER_COOLDOWN")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
                success_threshold: env::var("NOTIFICATION_BREAKER_SUCCESS_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            },
        }
    }
}
