//! Append-only registration log.

use seatwise_core::model::Registration;
use seatwise_core::store::{RegistrationStore, StoreFuture};
use tokio::sync::Mutex;

/// In-memory [`RegistrationStore`]; keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    rows: Mutex<Vec<Registration>>,
}

impl InMemoryRegistrationStore {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistrationStore for InMemoryRegistrationStore {
    fn save(&self, registration: Registration) -> StoreFuture<'_, Registration> {
        Box::pin(async move {
            self.rows.lock().await.push(registration.clone());
            Ok(registration)
        })
    }

    fn list(&self) -> StoreFuture<'_, Vec<Registration>> {
        Box::pin(async move { Ok(self.rows.lock().await.clone()) })
    }
}
