//! Audit/change-capture types and the sink boundary.
//!
//! Every tracked mutation produces exactly one [`AuditRecord`] on success:
//! which operation ran ([`AuditTags`]), when, with what serialized arguments,
//! and what it returned. Records are append-only and carry no identity beyond
//! insertion order.
//!
//! Delivery is best-effort and asynchronous: the pipeline in
//! `seatwise-runtime` enqueues records for out-of-band persistence through a
//! [`ChangeSink`], and a sink failure drops the record rather than disturb
//! the business call that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Sentinel payload stored when argument or result serialization fails.
pub const SERIALIZATION_FAILED_PAYLOAD: &str = r#"{"error":"serialization_failed"}"#;

/// Static tags naming a tracked operation.
///
/// Plain configuration data passed at the call site — there is no
/// annotation/reflection machinery involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditTags {
    /// Owning module, e.g. `"attendees"`.
    pub module: &'static str,
    /// Operation name, e.g. `"register"`.
    pub action: &'static str,
    /// Entity kind the operation touches, e.g. `"attendee"`.
    pub entity: &'static str,
}

/// One captured mutation, ready for durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Owning module of the tracked operation.
    pub module: String,
    /// Operation name.
    pub action: String,
    /// Entity kind the operation touched.
    pub entity: String,
    /// When the capture happened.
    pub occurred_at: DateTime<Utc>,
    /// JSON-serialized call arguments, or the serialization sentinel.
    pub payload: String,
    /// JSON-serialized return value, or the serialization sentinel.
    pub result: String,
}

/// Failure to append a record to the durable audit store.
#[derive(Error, Debug, Clone)]
#[error("change sink append failed: {0}")]
pub struct ChangeSinkError(pub String);

/// Durable destination for audit records.
///
/// Appends are invoked from the pipeline's writer task, never from the
/// request path. Implementations may be slow or flaky; the pipeline logs and
/// drops on error.
pub trait ChangeSink: Send + Sync {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeSinkError`] if the record could not be persisted. The
    /// pipeline treats this as a dropped record, not a business failure.
    fn append(
        &self,
        record: AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), ChangeSinkError>> + Send + '_>>;
}
