//! # Seatwise Testing
//!
//! Test doubles and fixtures shared across the workspace: a programmable
//! clock, failing/counting side-channel doubles, and a fully wired service
//! stack over in-memory storage.

pub mod clock;
pub mod fixture;
pub mod notify;
pub mod sinks;

pub use clock::FixedClock;
pub use fixture::ServiceFixture;
pub use notify::{CountingNotificationGateway, FailingNotificationGateway};
pub use sinks::FailingChangeSink;
