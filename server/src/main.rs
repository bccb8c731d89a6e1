//! Seatwise HTTP server.
//!
//! Finite-capacity event registration with asynchronous audit capture and a
//! per-client rate limiter on the customer API paths.

mod config;
mod metrics;

use config::Config;
use seatwise_core::audit::ChangeSink;
use seatwise_core::environment::{Clock, SystemClock};
use seatwise_runtime::audit::AuditPipeline;
use seatwise_runtime::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use seatwise_runtime::rate_limit::FixedWindowLimiter;
use seatwise_service::{
    AttendeeDirectoryService, EventCatalogService, LoggingNotificationGateway,
    RegistrationService,
};
use seatwise_store::{
    InMemoryAttendeeStore, InMemoryChangeLog, InMemoryEventStore, InMemoryRegistrationStore,
};
use seatwise_web::{AppState, build_router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("seatwise={}", config.server.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    metrics::init(&config.server)?;

    // Storage
    let events = Arc::new(InMemoryEventStore::new());
    let attendees = Arc::new(InMemoryAttendeeStore::new());
    let registrations = Arc::new(InMemoryRegistrationStore::new());
    let changelog = Arc::new(InMemoryChangeLog::new());
    let clock = Arc::new(SystemClock);

    // Audit pipeline and application services
    let audit = AuditPipeline::spawn(
        Arc::clone(&changelog) as Arc<dyn ChangeSink>,
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    let catalog = Arc::new(EventCatalogService::new(Arc::clone(&events) as Arc<_>));
    let directory = Arc::new(AttendeeDirectoryService::new(
        Arc::clone(&attendees) as Arc<_>,
        audit.clone(),
    ));
    let breaker = CircuitBreaker::new(CircuitBreakerConfig {
        failure_threshold: config.breaker.failure_threshold,
        cooldown: Duration::from_secs(config.breaker.cooldown_seconds),
        success_threshold: config.breaker.success_threshold,
    });
    let registration = Arc::new(RegistrationService::new(
        Arc::clone(&catalog),
        Arc::clone(&directory),
        Arc::clone(&registrations) as Arc<_>,
        Arc::new(LoggingNotificationGateway::new()),
        breaker,
        audit.clone(),
        Arc::clone(&clock) as Arc<_>,
    ));

    let limiter = Arc::new(FixedWindowLimiter::new(
        config.rate_limit.requests_per_minute,
        config.rate_limit.window(),
    ));
    let state = AppState::new(catalog, directory, registration);
    let app = build_router(state, limiter);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        app = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        address = %addr,
        rate_limit_per_minute = config.rate_limit.requests_per_minute,
        "server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Give in-flight audit records a chance to land before exit.
    let flush = audit.flush();
    if tokio::time::timeout(Duration::from_secs(config.server.shutdown_timeout), flush)
        .await
        .is_err()
    {
        tracing::warn!("audit flush timed out during shutdown");
    }

    info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down gracefully"),
        () = terminate => info!("received sigterm, shutting down gracefully"),
    }
}
