//! Observability subsystem
//!
//! Structured logging only:
//! - One JSON object per line on stderr
//! - Typed events with a fixed severity each
//! - A process-wide minimum severity set from configuration
//!
//! # Usage
//!
//! ```ignore
//! use tablestore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::TableCreated, &[("table", "people")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
