//! Attendee directory: tracked creation and listing.

use seatwise_core::audit::AuditTags;
use seatwise_core::command::NewAttendeeCommand;
use seatwise_core::error::DomainError;
use seatwise_core::model::{Attendee, AttendeeId};
use seatwise_core::store::AttendeeStore;
use seatwise_runtime::AuditPipeline;
use std::sync::Arc;

const REGISTER_ATTENDEE: AuditTags = AuditTags {
    module: "attendees",
    action: "register",
    entity: "attendee",
};

/// Application service owning attendee records.
pub struct AttendeeDirectoryService {
    attendees: Arc<dyn AttendeeStore>,
    audit: AuditPipeline,
}

impl AttendeeDirectoryService {
    /// Create a directory over the given store.
    #[must_use]
    pub fn new(attendees: Arc<dyn AttendeeStore>, audit: AuditPipeline) -> Self {
        Self { attendees, audit }
    }

    /// Add an attendee to the directory. Tracked: a successful registration
    /// produces one audit record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateEmail`] if the email is already taken.
    pub async fn register(&self, command: NewAttendeeCommand) -> Result<Attendee, DomainError> {
        self.audit
            .tracked(REGISTER_ATTENDEE, &command, || async {
                let attendee = Attendee {
                    id: AttendeeId::new(),
                    name: command.name.clone(),
                    email: command.email.clone(),
                };
                let stored = self.attendees.insert(attendee).await?;
                tracing::info!(attendee_id = %stored.id, "attendee registered");
                Ok(stored)
            })
            .await
    }

    /// Look up an attendee by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AttendeeNotFound`] if no such attendee exists.
    pub async fn find_by_id(&self, id: AttendeeId) -> Result<Attendee, DomainError> {
        self.attendees
            .get(id)
            .await?
            .ok_or(DomainError::AttendeeNotFound(id))
    }

    /// All attendees.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the listing fails.
    pub async fn list(&self) -> Result<Vec<Attendee>, DomainError> {
        self.attendees.list().await
    }
}

impl std::fmt::Debug for AttendeeDirectoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendeeDirectoryService").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use seatwise_core::SystemClock;
    use seatwise_core::audit::ChangeSink;
    use seatwise_store::{InMemoryAttendeeStore, InMemoryChangeLog};

    fn directory() -> (AttendeeDirectoryService, Arc<InMemoryChangeLog>, AuditPipeline) {
        let log = Arc::new(InMemoryChangeLog::new());
        let audit = AuditPipeline::spawn(
            Arc::clone(&log) as Arc<dyn ChangeSink>,
            Arc::new(SystemClock),
        );
        let directory = AttendeeDirectoryService::new(
            Arc::new(InMemoryAttendeeStore::new()),
            audit.clone(),
        );
        (directory, log, audit)
    }

    fn command(email: &str) -> NewAttendeeCommand {
        NewAttendeeCommand {
            name: "Ada".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn register_captures_one_audit_record() {
        let (directory, log, audit) = directory();

        let ada = directory.register(command("ada@example.com")).await.unwrap();
        assert_eq!(directory.find_by_id(ada.id).await.unwrap(), ada);

        audit.flush().await;
        let records = log.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].module, "attendees");
        assert_eq!(records[0].action, "register");
        assert!(records[0].payload.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn duplicate_email_fails_and_is_not_captured() {
        let (directory, log, audit) = directory();

        directory.register(command("ada@example.com")).await.unwrap();
        let result = directory.register(command("ada@example.com")).await;
        assert_eq!(
            result,
            Err(DomainError::DuplicateEmail("ada@example.com".to_string()))
        );

        audit.flush().await;
        assert_eq!(log.len().await, 1);
    }
}
