//! Log-only notification gateway.

use seatwise_core::model::Registration;
use seatwise_core::notify::{NotificationError, NotificationGateway};
use std::future::Future;
use std::pin::Pin;

/// Gateway that "delivers" confirmations as log lines.
///
/// Stands in for a real provider; the coordinator treats it exactly like one,
/// breaker and all.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationGateway;

impl LoggingNotificationGateway {
    /// Create the gateway.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NotificationGateway for LoggingNotificationGateway {
    fn registration_confirmed(
        &self,
        registration: &Registration,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotificationError>> + Send + '_>> {
        let registration = registration.clone();
        Box::pin(async move {
            tracing::info!(
                registration_id = %registration.id,
                event_id = %registration.event_id,
                attendee_id = %registration.attendee_id,
                "registration confirmation sent"
            );
            Ok(())
        })
    }
}
