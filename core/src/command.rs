//! Commands accepted by the application services.
//!
//! Commands are plain serializable values: they double as the payload that
//! the audit pipeline captures for tracked operations.

use crate::model::{AttendeeId, EventId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a new event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEventCommand {
    /// Event title.
    pub title: String,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Seat capacity; must be greater than zero.
    pub capacity: u32,
}

/// Request to add an attendee to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendeeCommand {
    /// Display name.
    pub name: String,
    /// Contact email; must be unique.
    pub email: String,
}

/// Request to register an attendee for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationCommand {
    /// The event to reserve a seat on.
    pub event_id: EventId,
    /// The attendee the seat is for.
    pub attendee_id: AttendeeId,
}
