//! Fully wired service stack over in-memory storage.

use crate::clock::FixedClock;
use seatwise_core::audit::ChangeSink;
use seatwise_core::environment::Clock;
use seatwise_core::notify::NotificationGateway;
use seatwise_runtime::AuditPipeline;
use seatwise_runtime::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use seatwise_service::{
    AttendeeDirectoryService, EventCatalogService, LoggingNotificationGateway,
    RegistrationService,
};
use seatwise_store::{
    InMemoryAttendeeStore, InMemoryChangeLog, InMemoryEventStore, InMemoryRegistrationStore,
};
use std::sync::Arc;

/// The whole service stack wired against in-memory collaborators.
///
/// Stores, change log, and clock stay reachable so tests can seed state and
/// assert on what the services wrote. Must be built inside a tokio runtime
/// (the audit writer task is spawned at construction).
#[derive(Debug)]
pub struct ServiceFixture {
    /// Backing event store.
    pub events: Arc<InMemoryEventStore>,
    /// Backing attendee store.
    pub attendees: Arc<InMemoryAttendeeStore>,
    /// Backing registration log.
    pub registrations: Arc<InMemoryRegistrationStore>,
    /// Destination of the audit pipeline.
    pub changelog: Arc<InMemoryChangeLog>,
    /// Programmable clock injected everywhere.
    pub clock: Arc<FixedClock>,
    /// Handle to the audit pipeline, for flushing in assertions.
    pub audit: AuditPipeline,
    /// Event catalog under test.
    pub catalog: Arc<EventCatalogService>,
    /// Attendee directory under test.
    pub directory: Arc<AttendeeDirectoryService>,
    /// Registration coordinator under test.
    pub registration: Arc<RegistrationService>,
}

impl ServiceFixture {
    /// Stack with a log-only notification gateway and default breaker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_notifier(
            Arc::new(LoggingNotificationGateway::new()),
            CircuitBreakerConfig::default(),
        )
    }

    /// Stack with a custom notification gateway and breaker configuration.
    #[must_use]
    pub fn with_notifier(
        notifier: Arc<dyn NotificationGateway>,
        breaker_config: CircuitBreakerConfig,
    ) -> Self {
        let events = Arc::new(InMemoryEventStore::new());
        let attendees = Arc::new(InMemoryAttendeeStore::new());
        let registrations = Arc::new(InMemoryRegistrationStore::new());
        let changelog = Arc::new(InMemoryChangeLog::new());
        let clock = Arc::new(FixedClock::default());

        let audit = AuditPipeline::spawn(
            Arc::clone(&changelog) as Arc<dyn ChangeSink>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let catalog = Arc::new(EventCatalogService::new(
            Arc::clone(&events) as Arc<_>,
        ));
        let directory = Arc::new(AttendeeDirectoryService::new(
            Arc::clone(&attendees) as Arc<_>,
            audit.clone(),
        ));
        let registration = Arc::new(RegistrationService::new(
            Arc::clone(&catalog),
            Arc::clone(&directory),
            Arc::clone(&registrations) as Arc<_>,
            notifier,
            CircuitBreaker::new(breaker_config),
            audit.clone(),
            Arc::clone(&clock) as Arc<_>,
        ));

        Self {
            events,
            attendees,
            registrations,
            changelog,
            clock,
            audit,
            catalog,
            directory,
            registration,
        }
    }
}

impl Default for ServiceFixture {
    fn default() -> Self {
        Self::new()
    }
}
