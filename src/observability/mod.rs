//! Observability subsystem
//!
//! Structured JSON diagnostics for per-record warnings and lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Diagnostics go to stderr, never to the command's output stream
//!
//! # Usage
//!
//! ```ignore
//! use etcdhelper::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::DecodeFailed, &[("key", "/ns/blob")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Severity an event is logged at.
pub fn severity_of(event: Event) -> Severity {
    if event.is_per_record_failure() {
        return Severity::Warn;
    }
    match event {
        Event::RecordExported => Severity::Trace,
        _ => Severity::Info,
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
