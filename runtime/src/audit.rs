//! Best-effort asynchronous audit pipeline.
//!
//! [`AuditPipeline::tracked`] wraps a business operation: it runs the
//! operation, and if it succeeds, serializes the arguments and the result and
//! hands a record to a detached writer task over an unbounded channel. The
//! business call never waits on the sink and never sees a sink failure; a
//! record that cannot be serialized is stored with a sentinel payload, and a
//! record the sink refuses is logged and dropped.

use seatwise_core::audit::{
    AuditRecord, AuditTags, ChangeSink, SERIALIZATION_FAILED_PAYLOAD,
};
use seatwise_core::environment::Clock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

enum AuditMessage {
    Record(AuditRecord),
    Flush(oneshot::Sender<()>),
}

/// Handle to the audit writer task. Cheap to clone; all clones feed the same
/// writer.
#[derive(Clone)]
pub struct AuditPipeline {
    tx: mpsc::UnboundedSender<AuditMessage>,
    clock: Arc<dyn Clock>,
}

impl AuditPipeline {
    /// Spawn the writer task and return a handle to it.
    ///
    /// The writer runs until every handle is dropped, then drains the channel
    /// and stops.
    #[must_use]
    pub fn spawn(sink: Arc<dyn ChangeSink>, clock: Arc<dyn Clock>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    AuditMessage::Record(record) => {
                        if let Err(err) = sink.append(record).await {
                            metrics::counter!("audit.dropped.total").increment(1);
                            tracing::warn!(error = %err, "audit record dropped, sink append failed");
                        } else {
                            metrics::counter!("audit.recorded.total").increment(1);
                        }
                    }
                    AuditMessage::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            tracing::debug!("audit writer stopped, all handles dropped");
        });

        Self { tx, clock }
    }

    /// Run `operation` and capture an audit record if it succeeds.
    ///
    /// The operation's own result is returned unchanged either way: capture
    /// happens only on success, and enqueueing never blocks or fails the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns whatever error the operation itself returns.
    pub async fn tracked<A, F, Fut, T, E>(
        &self,
        tags: AuditTags,
        args: &A,
        operation: F,
    ) -> Result<T, E>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        T: Serialize,
    {
        let result = operation().await;
        if let Ok(value) = &result {
            self.publish(tags, to_json(args), to_json(value));
        }
        result
    }

    /// Wait until every record enqueued before this call has been offered to
    /// the sink.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(AuditMessage::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    fn publish(&self, tags: AuditTags, payload: String, result: String) {
        let record = AuditRecord {
            module: tags.module.to_string(),
            action: tags.action.to_string(),
            entity: tags.entity.to_string(),
            occurred_at: self.clock.now(),
            payload,
            result,
        };
        if self.tx.send(AuditMessage::Record(record)).is_err() {
            tracing::warn!("audit record dropped, writer task is gone");
        }
    }
}

impl std::fmt::Debug for AuditPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditPipeline").finish_non_exhaustive()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| SERIALIZATION_FAILED_PAYLOAD.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use seatwise_core::audit::ChangeSinkError;
    use std::future::Future;
    use std::pin::Pin;
    use tokio::sync::Mutex;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<AuditRecord>>,
    }

    impl ChangeSink for RecordingSink {
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

    struct FailingSink;

    impl ChangeSink for FailingSink {
        fn append(
            &self,
            _record: AuditRecord,
        ) -> Pin<Box<dyn Future<Output = Result<(), ChangeSinkError>> + Send + '_>> {
            Box::pin(async move { Err(ChangeSinkError("disk full".to_string())) })
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    const TAGS: AuditTags = AuditTags {
        module: "attendees",
        action: "register",
        entity: "attendee",
    };

    fn pipeline(sink: Arc<dyn ChangeSink>) -> AuditPipeline {
        AuditPipeline::spawn(sink, Arc::new(TestClock(midnight())))
    }

    #[tokio::test]
    async fn success_produces_exactly_one_record() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink) as Arc<dyn ChangeSink>);

        let result = pipeline
            .tracked(TAGS, "ada@example.com", || async {
                Ok::<_, String>("registered")
            })
            .await;
        assert_eq!(result, Ok("registered"));

        pipeline.flush().await;
        let records = sink.records.lock().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].module, "attendees");
        assert_eq!(records[0].occurred_at, midnight());
        assert_eq!(records[0].payload, r#""ada@example.com""#);
        assert_eq!(records[0].result, r#""registered""#);
    }

    #[tokio::test]
    async fn failure_produces_no_record() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink) as Arc<dyn ChangeSink>);

        let result = pipeline
            .tracked(TAGS, "ada@example.com", || async {
                Err::<String, _>("sold out")
            })
            .await;
        assert_eq!(result, Err("sold out"));

        pipeline.flush().await;
        assert!(sink.records.lock().await.is_empty());
    }

    #[tokio::test]
    async fn serialization_failure_stores_the_sentinel() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink) as Arc<dyn ChangeSink>);

        pipeline
            .tracked(TAGS, &Unserializable, || async { Ok::<_, String>(7) })
            .await
            .unwrap();

        pipeline.flush().await;
        let records = sink.records.lock().await;
        assert_eq!(records[0].payload, SERIALIZATION_FAILED_PAYLOAD);
        assert_eq!(records[0].result, "7");
    }

    #[tokio::test]
    async fn sink_failure_never_reaches_the_caller() {
        let pipeline = pipeline(Arc::new(FailingSink));

        let result = pipeline
            .tracked(TAGS, "ada@example.com", || async { Ok::<_, String>(1) })
            .await;
        assert_eq!(result, Ok(1));

        // Flush still completes even though every append fails.
        pipeline.flush().await;
    }

    #[tokio::test]
    async fn records_are_captured_in_call_order() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = pipeline(Arc::clone(&sink) as Arc<dyn ChangeSink>);

        for payload in ["first", "second", "third"] {
            pipeline
                .tracked(TAGS, payload, || async { Ok::<_, String>(()) })
                .await
                .unwrap();
        }

        pipeline.flush().await;
        let records = sink.records.lock().await;
        let payloads: Vec<_> = records.iter().map(|r| r.payload.as_str()).collect();
        assert_eq!(payloads, [r#""first""#, r#""second""#, r#""third""#]);
    }
}
