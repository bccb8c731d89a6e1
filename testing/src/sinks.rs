//! Change-sink doubles for exercising the audit pipeline's failure paths.

use seatwise_core::audit::{AuditRecord, ChangeSink, ChangeSinkError};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Sink that refuses every append, counting the attempts.
///
/// Used to prove that audit capture failure never disturbs the business
/// operation it was capturing.
#[derive(Debug, Default)]
pub struct FailingChangeSink {
    attempts: AtomicUsize,
}

impl FailingChangeSink {
    /// Create the sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many appends were attempted (and refused).
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ChangeSink for FailingChangeSink {
    fn append(
        &self,
        _record: AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChangeSinkError>> + Send + '_>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Err(ChangeSinkError("sink unavailable".to_string())) })
    }
}
