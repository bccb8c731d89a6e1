//! Application state for Axum handlers.

use seatwise_service::{AttendeeDirectoryService, EventCatalogService, RegistrationService};
use std::sync::Arc;

/// Application services shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Event catalog: creation, lookup, reservation.
    pub catalog: Arc<EventCatalogService>,
    /// Attendee directory.
    pub directory: Arc<AttendeeDirectoryService>,
    /// Registration coordinator.
    pub registration: Arc<RegistrationService>,
}

impl AppState {
    /// Bundle the services for the router.
    #[must_use]
    pub fn new(
        catalog: Arc<EventCatalogService>,
        directory: Arc<AttendeeDirectoryService>,
        registration: Arc<RegistrationService>,
    ) -> Self {
        Self {
            catalog,
            directory,
            registration,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
