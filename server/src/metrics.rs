//! Prometheus exporter setup and metric descriptions.

use crate::config::ServerConfig;
use anyhow::Context;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter and describe every metric the workspace
/// emits.
///
/// # Errors
///
/// Returns an error if the metrics address is invalid or the exporter's HTTP
/// listener cannot be installed.
pub fn init(config: &ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.metrics_host, config.metrics_port)
        .parse()
        .context("invalid metrics listen address")?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install Prometheus exporter")?;

    describe_counter!("event.created.total", "Events created");
    describe_counter!("registration.created.total", "Registrations granted");
    describe_counter!(
        "registration.failed.total",
        "Registration attempts refused with a domain error"
    );
    describe_histogram!(
        "registration.process.duration_seconds",
        "End-to-end duration of the registration flow"
    );
    describe_counter!(
        "rate_limit.rejected.total",
        "Requests rejected by the fixed-window rate limiter"
    );
    describe_counter!("audit.recorded.total", "Audit records persisted");
    describe_counter!(
        "audit.dropped.total",
        "Audit records dropped after a sink failure"
    );
    describe_counter!(
        "circuit_breaker.opened.total",
        "Notification circuit breaker transitions to open"
    );
    describe_counter!(
        "circuit_breaker.half_open.total",
        "Notification circuit breaker recovery probes started"
    );
    describe_counter!(
        "circuit_breaker.closed.total",
        "Notification circuit breaker recoveries"
    );
    describe_counter!(
        "circuit_breaker.rejected.total",
        "Notification deliveries rejected while the circuit was open"
    );

    tracing::info!(address = %addr, "Prometheus exporter listening");
    Ok(())
}
