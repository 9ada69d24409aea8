//! Observability subsystem
//!
//! - Structured logging (JSON lines)
//! - Per-store operation counters
//! - Typed lifecycle and mutation events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on tree operations
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use childtree::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::RecordCreated, &[("document", "101")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_created();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::BootStart);
        log_event(Event::ConfigLoaded);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::SeedLoaded, &[("records", "12"), ("tree", "avl")]);
    }
}
