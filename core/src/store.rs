//! Storage abstractions for events, attendees, and registrations.
//!
//! The interesting trait is [`EventStore`]: event rows carry a version token,
//! and the store exposes two write primitives with different guarantees:
//!
//! - [`EventStore::update_exclusive`] — the "for update" read. The supplied
//!   closure runs while the row's exclusive lock is held, so check-then-write
//!   sequences for the same event are fully serialized. On closure success
//!   the store commits and bumps the version by one; on closure failure the
//!   row is left untouched. Distinct events never contend.
//! - [`EventStore::save`] — a compare-and-swap on the version token. A stale
//!   version yields [`DomainError::ConcurrencyConflict`], which callers must
//!   treat as "re-read and redo", never as partial progress.
//!
//! # Dyn compatibility
//!
//! Traits here use explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` so they can be held as `Arc<dyn EventStore>` by the
//! application services.

use crate::error::DomainError;
use crate::model::{Attendee, AttendeeId, Event, EventId, Registration};
use std::future::Future;
use std::pin::Pin;

/// Boxed future type used by all storage traits.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DomainError>> + Send + 'a>>;

/// In-place mutation applied to an event row under its exclusive lock.
///
/// Returning an error aborts the update: the row keeps its prior state and
/// version, and the error is surfaced to the caller unchanged.
pub type MutateEvent = Box<dyn FnOnce(&mut Event) -> Result<(), DomainError> + Send>;

/// Versioned storage for [`Event`] rows.
pub trait EventStore: Send + Sync {
    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn get(&self, id: EventId) -> StoreFuture<'_, Option<Event>>;

    /// Insert a newly created event. The stored row starts at version 1.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if a row with this id already exists.
    fn insert(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Compare-and-swap write: commits only if `event.version` still matches
    /// the stored row, then bumps the version. Returns the committed row.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EventNotFound`] if no row with this id exists
    /// - [`DomainError::ConcurrencyConflict`] if the version is stale
    fn save(&self, event: Event) -> StoreFuture<'_, Event>;

    /// Run `mutate` against the row under its exclusive lock, committing and
    /// bumping the version on success. Returns the committed row.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EventNotFound`] if no row with this id exists
    /// - Whatever error `mutate` returns (the row is left untouched)
    fn update_exclusive(&self, id: EventId, mutate: MutateEvent) -> StoreFuture<'_, Event>;

    /// All events, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn list(&self) -> StoreFuture<'_, Vec<Event>>;
}

/// Read-mostly storage for [`Attendee`] records.
pub trait AttendeeStore: Send + Sync {
    /// Look up an attendee by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn get(&self, id: AttendeeId) -> StoreFuture<'_, Option<Attendee>>;

    /// Insert a new attendee.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateEmail`] if the email is taken.
    fn insert(&self, attendee: Attendee) -> StoreFuture<'_, Attendee>;

    /// All attendees, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn list(&self) -> StoreFuture<'_, Vec<Attendee>>;
}

/// Append-only storage for [`Registration`] records.
pub trait RegistrationStore: Send + Sync {
    /// Persist a granted registration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn save(&self, registration: Registration) -> StoreFuture<'_, Registration>;

    /// All registrations, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] if the storage layer fails.
    fn list(&self) -> StoreFuture<'_, Vec<Registration>>;
}
