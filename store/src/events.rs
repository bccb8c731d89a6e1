//! Versioned in-memory event rows with per-row exclusive locking.

use seatwise_core::error::DomainError;
use seatwise_core::model::{Event, EventId};
use seatwise_core::store::{EventStore, MutateEvent, StoreFuture};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// In-memory [`EventStore`].
///
/// The outer map is only locked long enough to find (or add) a row; every
/// row is an `Arc<Mutex<Event>>` of its own, so holding one event's lock
/// never blocks operations on other events.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    rows: RwLock<HashMap<EventId, Arc<Mutex<Event>>>>,
}

impl InMemoryEventStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn row(&self, id: EventId) -> Option<Arc<Mutex<Event>>> {
        self.rows.read().await.get(&id).cloned()
    }
}

impl EventStore for InMemoryEventStore {
    fn get(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            match self.row(id).await {
                Some(row) => Ok(Some(row.lock().await.clone())),
                None => Ok(None),
            }
        })
    }

    fn insert(&self, mut event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let mut rows = self.rows.write().await;
            if rows.contains_key(&event.id) {
                return Err(DomainError::Storage(format!(
                    "event already exists: {}",
                    event.id
                )));
            }
            event.version = 1;
            rows.insert(event.id, Arc::new(Mutex::new(event.clone())));
            Ok(event)
        })
    }

    fn save(&self, event: Event) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let row = self
                .row(event.id)
                .await
                .ok_or(DomainError::EventNotFound(event.id))?;
            let mut stored = row.lock().await;
            if stored.version != event.version {
                tracing::debug!(
                    event_id = %event.id,
                    stale = event.version,
                    current = stored.version,
                    "version token mismatch on save"
                );
                return Err(DomainError::ConcurrencyConflict(event.id));
            }
            let committed = Event {
                version: stored.version + 1,
                ..event
            };
            *stored = committed.clone();
            Ok(committed)
        })
    }

    fn update_exclusive(&self, id: EventId, mutate: MutateEvent) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let row = self.row(id).await.ok_or(DomainError::EventNotFound(id))?;
            // Row lock held across the whole check-then-write: this is the
            // "for update" read that serializes reservations per event.
            let mut stored = row.lock().await;
            let mut scratch = stored.clone();
            mutate(&mut scratch)?;
            scratch.version = stored.version + 1;
            *stored = scratch.clone();
            Ok(scratch)
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let rows: Vec<Arc<Mutex<Event>>> = self.rows.read().await.values().cloned().collect();
            let mut events = Vec::with_capacity(rows.len());
            for row in rows {
                events.push(row.lock().await.clone());
            }
            Ok(events)
        })
    }
}
