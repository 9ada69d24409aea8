//! Observable events
//!
//! Events are explicit and typed; each one carries its default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in childtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration file parsed and validated
    ConfigLoaded,
    /// Seed records inserted into a store
    SeedLoaded,
    /// HTTP listener bound, ready to serve
    Serving,
    /// Server stopped
    ShutdownComplete,

    // Store mutations
    /// Record inserted
    RecordCreated,
    /// Record fields replaced in place
    RecordUpdated,
    /// Record removed
    RecordDeleted,
    /// Store emptied
    StoreCleared,

    // Rejections
    /// Operation refused (duplicate, missing, invalid)
    RequestRejected,
    /// Lock poisoned or other internal failure
    InternalFailure,
}

impl Event {
    /// Returns the event name written to the log line
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CHILDTREE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SeedLoaded => "SEED_LOADED",
            Event::Serving => "CHILDTREE_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::StoreCleared => "STORE_CLEARED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::InternalFailure => "INTERNAL_FAILURE",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordCreated | Event::RecordUpdated | Event::RecordDeleted => Severity::Trace,
            Event::RequestRejected => Severity::Warn,
            Event::InternalFailure => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [Event; 11] = [
        Event::BootStart,
        Event::ConfigLoaded,
        Event::SeedLoaded,
        Event::Serving,
        Event::ShutdownComplete,
        Event::RecordCreated,
        Event::RecordUpdated,
        Event::RecordDeleted,
        Event::StoreCleared,
        Event::RequestRejected,
        Event::InternalFailure,
    ];

    #[test]
    fn test_event_names_unique() {
        let names: HashSet<_> = ALL.iter().map(|e| e.as_str()).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::RecordCreated.severity(), Severity::Trace);
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
        assert_eq!(Event::InternalFailure.severity(), Severity::Error);
        assert_eq!(Event::Serving.severity(), Severity::Info);
    }
}
