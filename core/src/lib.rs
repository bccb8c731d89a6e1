//! # Seatwise Core
//!
//! Domain model and collaborator traits for the Seatwise event registration
//! system.
//!
//! This crate is deliberately free of I/O. It defines:
//!
//! - **Model**: [`model::Event`], [`model::Attendee`], [`model::Registration`]
//!   and their identifier newtypes
//! - **Commands**: the inputs to the application services
//! - **Errors**: the single [`error::DomainError`] taxonomy every operation
//!   speaks
//! - **Storage traits**: [`store::EventStore`] (versioned rows with an
//!   exclusive-update primitive), [`store::AttendeeStore`],
//!   [`store::RegistrationStore`]
//! - **Side-channel traits**: [`notify::NotificationGateway`] and
//!   [`audit::ChangeSink`], whose failures must never affect a committed
//!   reservation
//! - **Environment**: the [`environment::Clock`] abstraction for testable time
//!
//! Implementations live elsewhere: in-memory storage in `seatwise-store`,
//! reliability primitives in `seatwise-runtime`, application services in
//! `seatwise-service`.

pub mod audit;
pub mod command;
pub mod environment;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;

pub use audit::{AuditRecord, AuditTags, ChangeSink};
pub use command::{NewAttendeeCommand, NewEventCommand, RegistrationCommand};
pub use environment::{Clock, SystemClock};
pub use error::DomainError;
pub use model::{Attendee, AttendeeId, Event, EventId, Registration, RegistrationId};

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
