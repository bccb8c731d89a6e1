//! Notification-gateway doubles.

use seatwise_core::model::Registration;
use seatwise_core::notify::{NotificationError, NotificationGateway};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway that records every confirmation it is asked to deliver.
#[derive(Debug, Default)]
pub struct CountingNotificationGateway {
    confirmations: AtomicUsize,
}

impl CountingNotificationGateway {
    /// Create the gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of confirmations delivered.
    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }
}

impl NotificationGateway for CountingNotificationGateway {
    fn registration_confirmed(
        &self,
        _registration: &Registration,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotificationError>> + Send + '_>> {
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(()) })
    }
}

/// Gateway whose provider is permanently down.
///
/// Used to prove that delivery failure (and eventually an open breaker)
/// never rolls back a granted seat.
#[derive(Debug, Default)]
pub struct FailingNotificationGateway {
    attempts: AtomicUsize,
}

impl FailingNotificationGateway {
    /// Create the gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of delivery attempts made before the breaker stopped them.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl NotificationGateway for FailingNotificationGateway {
    fn registration_confirmed(
        &self,
        _registration: &Registration,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotificationError>> + Send + '_>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Err(NotificationError("provider down".to_string())) })
    }
}
