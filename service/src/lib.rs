//! # Seatwise Service
//!
//! Application services composing the domain: the event catalog (creation,
//! cached lookup, seat reservation), the attendee directory (tracked
//! creation), and the registration coordinator that strings them together
//! with best-effort notification behind a circuit breaker.

pub mod catalog;
pub mod directory;
pub mod notify;
pub mod registration;

pub use catalog::EventCatalogService;
pub use directory::AttendeeDirectoryService;
pub use notify::LoggingNotificationGateway;
pub use registration::RegistrationService;
