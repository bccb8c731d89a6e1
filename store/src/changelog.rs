//! Append-only change log: the audit pipeline's durable destination.

use seatwise_core::audit::{AuditRecord, ChangeSink, ChangeSinkError};
use std::future::Future;
use std::pin::Pin;
use tokio::sync::Mutex;

/// In-memory [`ChangeSink`] keeping records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryChangeLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryChangeLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records appended so far.
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().await.clone()
    }

    /// Number of records appended so far.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether no records have been appended yet.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl ChangeSink for InMemoryChangeLog {
    fn append(
        &self,
        record: AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChangeSinkError>> + Send + '_>> {
        Box::pin(async move {
            self.records.lock().await.push(record);
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn appends_in_order() {
        let log = InMemoryChangeLog::new();
        for action in ["register", "create"] {
            log.append(AuditRecord {
                module: "attendees".to_string(),
                action: action.to_string(),
                entity: "attendee".to_string(),
                occurred_at: Utc::now(),
                payload: "{}".to_string(),
                result: "{}".to_string(),
            })
            .await
            .unwrap();
        }

        let records = log.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "register");
        assert_eq!(records[1].action, "create");
    }
}
