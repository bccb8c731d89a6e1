//! The error taxonomy shared by every Seatwise operation.
//!
//! Business-rule failures (`EventNotFound`, `AttendeeNotFound`,
//! `CapacityExhausted`, `InvalidCapacity`, `DuplicateEmail`) propagate to the
//! request boundary as the final outcome. `ConcurrencyConflict` is transient:
//! the reservation path retries it internally and callers only see it once
//! retries are exhausted. Audit and notification failures have no variants
//! here on purpose — they are contained at their component and never decide
//! the outcome of a business call.

use crate::model::{AttendeeId, EventId};
use thiserror::Error;

/// Errors produced by the registration domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced event does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The referenced attendee does not exist.
    #[error("attendee not found: {0}")]
    AttendeeNotFound(AttendeeId),

    /// A reservation was attempted against a full event. No mutation occurred.
    #[error("no seat available for event: {0}")]
    CapacityExhausted(EventId),

    /// Event creation was attempted with a non-positive capacity.
    #[error("event capacity must be greater than zero")]
    InvalidCapacity,

    /// An attendee with this email already exists.
    #[error("attendee email already registered: {0}")]
    DuplicateEmail(String),

    /// A versioned write lost a race with a concurrent writer.
    ///
    /// Transient: the caller should re-run the whole read-check-write cycle
    /// against fresh state, never assume partial progress.
    #[error("concurrent update conflict on event: {0}")]
    ConcurrencyConflict(EventId),

    /// The storage layer failed in a way the domain cannot interpret.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Whether this failure is transient and safe to retry with fresh state.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventId;

    #[test]
    fn only_conflicts_are_transient() {
        let id = EventId::new();
        assert!(DomainError::ConcurrencyConflict(id).is_transient());
        assert!(!DomainError::CapacityExhausted(id).is_transient());
        assert!(!DomainError::EventNotFound(id).is_transient());
        assert!(!DomainError::InvalidCapacity.is_transient());
    }

    #[test]
    fn capacity_exhausted_names_the_event() {
        let id = EventId::new();
        let message = DomainError::CapacityExhausted(id).to_string();
        assert!(message.contains(&id.to_string()));
    }
}
