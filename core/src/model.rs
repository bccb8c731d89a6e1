//! Domain entities and their identifiers.
//!
//! All identifiers are opaque UUID newtypes. [`Event`] carries the version
//! token used by the storage layer for staleness detection; the other
//! entities are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype! {
    /// Opaque identifier of an [`Event`].
    EventId
}

id_newtype! {
    /// Opaque identifier of an [`Attendee`].
    AttendeeId
}

id_newtype! {
    /// Opaque identifier of a [`Registration`].
    RegistrationId
}

/// A bookable event with a hard capacity ceiling.
///
/// `capacity` is immutable after creation. `reserved_seats` only ever grows
/// (there is no cancellation flow) and never exceeds `capacity` — that
/// invariant is enforced by the seat reservation path, serialized per event
/// by the storage layer's exclusive row update.
///
/// `version` is a detectable-staleness token: the store bumps it by exactly
/// one on every committed update, so any copy read before a concurrent write
/// can be recognized as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Human-readable title.
    pub title: String,
    /// Scheduled start time.
    pub starts_at: DateTime<Utc>,
    /// Maximum number of seats. Positive, immutable.
    pub capacity: u32,
    /// Seats granted so far. Always `<= capacity`.
    pub reserved_seats: u32,
    /// Monotonically increasing optimistic-concurrency token.
    pub version: u64,
}

impl Event {
    /// Seats still available on this event.
    #[must_use]
    pub const fn seats_available(&self) -> u32 {
        self.capacity.saturating_sub(self.reserved_seats)
    }

    /// Whether the event is fully booked.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.reserved_seats >= self.capacity
    }
}

/// A person who can register for events.
///
/// Read-only from the reservation core's perspective; the directory enforces
/// email uniqueness at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Unique identifier.
    pub id: AttendeeId,
    /// Display name.
    pub name: String,
    /// Contact email, unique across the directory.
    pub email: String,
}

/// The durable proof that a seat was granted.
///
/// Created exactly once per successful reservation and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique identifier.
    pub id: RegistrationId,
    /// The event the seat belongs to.
    pub event_id: EventId,
    /// The attendee the seat was granted to.
    pub attendee_id: AttendeeId,
    /// When the seat was granted.
    pub registered_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn event(capacity: u32, reserved: u32) -> Event {
        Event {
            id: EventId::new(),
            title: "RustConf".to_string(),
            starts_at: Utc::now(),
            capacity,
            reserved_seats: reserved,
            version: 1,
        }
    }

    #[test]
    fn seats_available_counts_down() {
        assert_eq!(event(10, 3).seats_available(), 7);
        assert_eq!(event(10, 10).seats_available(), 0);
    }

    #[test]
    fn full_event_is_full() {
        assert!(event(2, 2).is_full());
        assert!(!event(2, 1).is_full());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
