//! Registration coordinator: the compose point of the reservation flow.
//!
//! One registration is: event exists, attendee exists, seat reserved under
//! the event row's exclusive lock, registration persisted, confirmation
//! attempted through the notification breaker. The first three steps decide
//! the outcome; notification never does.

use crate::catalog::EventCatalogService;
use crate::directory::AttendeeDirectoryService;
use seatwise_core::audit::AuditTags;
use seatwise_core::command::RegistrationCommand;
use seatwise_core::environment::Clock;
use seatwise_core::error::DomainError;
use seatwise_core::model::{Registration, RegistrationId};
use seatwise_core::notify::NotificationGateway;
use seatwise_core::store::RegistrationStore;
use seatwise_runtime::AuditPipeline;
use seatwise_runtime::circuit_breaker::CircuitBreaker;
use std::sync::Arc;
use std::time::Instant;

const REGISTER: AuditTags = AuditTags {
    module: "registration",
    action: "register",
    entity: "registration",
};

/// Application service that grants seats.
pub struct RegistrationService {
    catalog: Arc<EventCatalogService>,
    directory: Arc<AttendeeDirectoryService>,
    registrations: Arc<dyn RegistrationStore>,
    notifier: Arc<dyn NotificationGateway>,
    breaker: CircuitBreaker,
    audit: AuditPipeline,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    /// Wire up the coordinator.
    #[must_use]
    pub fn new(
        catalog: Arc<EventCatalogService>,
        directory: Arc<AttendeeDirectoryService>,
        registrations: Arc<dyn RegistrationStore>,
        notifier: Arc<dyn NotificationGateway>,
        breaker: CircuitBreaker,
        audit: AuditPipeline,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            directory,
            registrations,
            notifier,
            breaker,
            audit,
            clock,
        }
    }

    /// Register an attendee for an event.
    ///
    /// Tracked: exactly one audit record per granted registration. Metrics
    /// count granted and failed registrations and time the whole flow.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EventNotFound`] / [`DomainError::AttendeeNotFound`]
    ///   for unknown ids; nothing is reserved or persisted
    /// - [`DomainError::CapacityExhausted`] when the event is fully booked
    /// - [`DomainError::ConcurrencyConflict`] only after internal retries
    ///   are exhausted
    pub async fn register(
        &self,
        command: RegistrationCommand,
    ) -> Result<Registration, DomainError> {
        let started = Instant::now();
        let result = self
            .audit
            .tracked(REGISTER, &command, || self.process(command))
            .await;

        metrics::histogram!("registration.process.duration_seconds")
            .record(started.elapsed().as_secs_f64());
        match &result {
            Ok(registration) => {
                metrics::counter!("registration.created.total").increment(1);
                tracing::info!(
                    registration_id = %registration.id,
                    event_id = %registration.event_id,
                    attendee_id = %registration.attendee_id,
                    "registration granted"
                );
            }
            Err(err) => {
                metrics::counter!("registration.failed.total").increment(1);
                tracing::info!(
                    event_id = %command.event_id,
                    attendee_id = %command.attendee_id,
                    error = %err,
                    "registration refused"
                );
            }
        }
        result
    }

    async fn process(&self, command: RegistrationCommand) -> Result<Registration, DomainError> {
        self.catalog.find_by_id(command.event_id).await?;
        self.directory.find_by_id(command.attendee_id).await?;
        self.catalog.reserve_seat(command.event_id).await?;

        let registration = Registration {
            id: RegistrationId::new(),
            event_id: command.event_id,
            attendee_id: command.attendee_id,
            registered_at: self.clock.now(),
        };
        let stored = self.registrations.save(registration).await?;

        self.confirm(&stored).await;
        Ok(stored)
    }

    /// Best-effort confirmation. The seat is already granted; a delivery
    /// failure or an open breaker degrades to a warn-level fallback.
    async fn confirm(&self, registration: &Registration) {
        let outcome = self
            .breaker
            .call(|| self.notifier.registration_confirmed(registration))
            .await;
        if let Err(err) = outcome {
            tracing::warn!(
                registration_id = %registration.id,
                error = %err,
                "confirmation not sent, registration stands"
            );
        }
    }

    /// All granted registrations.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the listing fails.
    pub async fn list(&self) -> Result<Vec<Registration>, DomainError> {
        self.registrations.list().await
    }
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService").finish_non_exhaustive()
    }
}
