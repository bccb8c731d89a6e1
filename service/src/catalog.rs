//! Event catalog: creation, lookup, and the seat reservation entry point.

use seatwise_core::command::NewEventCommand;
use seatwise_core::error::DomainError;
use seatwise_core::model::{Event, EventId};
use seatwise_core::store::EventStore;
use seatwise_runtime::retry::{RetryPolicy, retry_with_predicate};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Read-through cache over event lookups.
///
/// Lookup and list traffic dominates writes, so single-event reads are served
/// from here and every committed write invalidates the entry. Going back to
/// the store after invalidation is what keeps cached `reserved_seats` from
/// lagging behind a granted seat.
#[derive(Debug, Default)]
struct EventCache {
    entries: RwLock<HashMap<EventId, Event>>,
}

impl EventCache {
    fn get(&self, id: EventId) -> Option<Event> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn put(&self, event: Event) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(event.id, event);
    }

    fn invalidate(&self, id: EventId) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

/// Application service owning the event lifecycle.
pub struct EventCatalogService {
    events: Arc<dyn EventStore>,
    cache: EventCache,
    retry: RetryPolicy,
}

impl EventCatalogService {
    /// Create a catalog over the given store.
    #[must_use]
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self {
            events,
            cache: EventCache::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Create a new event.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCapacity`] for a zero capacity, or a
    /// storage error from the insert.
    pub async fn create(&self, command: NewEventCommand) -> Result<Event, DomainError> {
        if command.capacity == 0 {
            return Err(DomainError::InvalidCapacity);
        }

        let event = Event {
            id: EventId::new(),
            title: command.title,
            starts_at: command.starts_at,
            capacity: command.capacity,
            reserved_seats: 0,
            version: 0,
        };
        let stored = self.events.insert(event).await?;

        metrics::counter!("event.created.total").increment(1);
        tracing::info!(event_id = %stored.id, capacity = stored.capacity, "event created");
        self.cache.put(stored.clone());
        Ok(stored)
    }

    /// Look up an event by id, serving from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EventNotFound`] if no such event exists.
    pub async fn find_by_id(&self, id: EventId) -> Result<Event, DomainError> {
        if let Some(event) = self.cache.get(id) {
            return Ok(event);
        }

        let event = self
            .events
            .get(id)
            .await?
            .ok_or(DomainError::EventNotFound(id))?;
        self.cache.put(event.clone());
        Ok(event)
    }

    /// All events, sorted by start time.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the listing fails.
    pub async fn list(&self) -> Result<Vec<Event>, DomainError> {
        let mut events = self.events.list().await?;
        events.sort_by_key(|event| event.starts_at);
        Ok(events)
    }

    /// Reserve one seat on an event.
    ///
    /// The capacity check and the increment run under the event row's
    /// exclusive lock, so concurrent reservations for the same event are
    /// serialized and the capacity ceiling can never be crossed. Version
    /// conflicts are retried internally; callers never observe them unless
    /// retries are exhausted.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EventNotFound`] for an unknown event
    /// - [`DomainError::CapacityExhausted`] when the event is fully booked
    /// - [`DomainError::ConcurrencyConflict`] only after retry exhaustion
    pub async fn reserve_seat(&self, id: EventId) -> Result<Event, DomainError> {
        let updated = retry_with_predicate(
            self.retry.clone(),
            || {
                self.events.update_exclusive(
                    id,
                    Box::new(move |event| {
                        if event.is_full() {
                            return Err(DomainError::CapacityExhausted(event.id));
                        }
                        event.reserved_seats += 1;
                        Ok(())
                    }),
                )
            },
            DomainError::is_transient,
        )
        .await?;

        self.cache.invalidate(id);
        tracing::debug!(
            event_id = %updated.id,
            reserved = updated.reserved_seats,
            capacity = updated.capacity,
            "seat reserved"
        );
        Ok(updated)
    }
}

impl std::fmt::Debug for EventCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCatalogService").finish_non_exhaustive()
    }
}
