//! # Seatwise Store
//!
//! In-memory implementations of the `seatwise-core` storage traits.
//!
//! The centerpiece is [`InMemoryEventStore`]: each event row lives behind its
//! own async mutex, so `update_exclusive` gives the same guarantee a
//! `SELECT ... FOR UPDATE` transaction would — check-then-write sequences on
//! one event are serialized, while unrelated events proceed in parallel. The
//! version token on every row makes stale copies detectable for the
//! compare-and-swap `save` path.
//!
//! The remaining stores are deliberately boring: a keyed attendee directory
//! with a unique-email check, an append-only registration log, and an
//! append-only change log that serves as the audit pipeline's durable
//! destination.

pub mod attendees;
pub mod changelog;
pub mod events;
pub mod registrations;

pub use attendees::InMemoryAttendeeStore;
pub use changelog::InMemoryChangeLog;
pub use events::InMemoryEventStore;
pub use registrations::InMemoryRegistrationStore;
