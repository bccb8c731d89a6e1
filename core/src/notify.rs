//! Notification gateway boundary.
//!
//! Delivery is best-effort: the registration coordinator calls this behind a
//! circuit breaker and degrades any failure to a logged fallback. A broken
//! notification provider must never roll back or block a granted seat.

use crate::model::Registration;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Failure to deliver a notification.
#[derive(Error, Debug, Clone)]
#[error("notification delivery failed: {0}")]
pub struct NotificationError(pub String);

/// Outbound confirmation channel for granted registrations.
pub trait NotificationGateway: Send + Sync {
    /// Tell the attendee their registration was confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] if the provider rejects or times out.
    /// Callers contain this failure; it never propagates past the coordinator.
    fn registration_confirmed(
        &self,
        registration: &Registration,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotificationError>> + Send + '_>>;
}
