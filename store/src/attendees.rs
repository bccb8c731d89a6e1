//! In-memory attendee directory with a unique-email constraint.

use seatwise_core::error::DomainError;
use seatwise_core::model::{Attendee, AttendeeId};
use seatwise_core::store::{AttendeeStore, StoreFuture};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`AttendeeStore`].
#[derive(Debug, Default)]
pub struct InMemoryAttendeeStore {
    rows: RwLock<HashMap<AttendeeId, Attendee>>,
}

impl InMemoryAttendeeStore {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttendeeStore for InMemoryAttendeeStore {
    fn get(&self, id: AttendeeId) -> StoreFuture<'_, Option<Attendee>> {
        Box::pin(async move { Ok(self.rows.read().await.get(&id).cloned()) })
    }

    fn insert(&self, attendee: Attendee) -> StoreFuture<'_, Attendee> {
        Box::pin(async move {
            let mut rows = self.rows.write().await;
            if rows.values().any(|existing| existing.email == attendee.email) {
                return Err(DomainError::DuplicateEmail(attendee.email));
            }
            rows.insert(attendee.id, attendee.clone());
            Ok(attendee)
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(async move { Ok(self.rows.read().await.values().cloned().collect()) })
    }
}
