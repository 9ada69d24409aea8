//! Metrics registry
//!
//! - Counters increase monotonically and reset only on process start
//! - `records` is the one gauge and mirrors the tree count
//! - Atomic, so read-locked store operations can count too

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operation counters for one record store
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful inserts
    records_created: AtomicU64,
    /// Successful in-place updates
    records_updated: AtomicU64,
    /// Successful deletes
    records_deleted: AtomicU64,
    /// Single-record lookups served
    lookups: AtomicU64,
    /// Full traversals served (listings and reports)
    traversals: AtomicU64,
    /// Operations refused with a client error
    rejected: AtomicU64,
    /// Records currently stored
    records: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a successful insert
    pub fn record_created(&self) {
        self.records_created.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful update
    pub fn record_updated(&self) {
        self.records_updated.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful delete
    pub fn record_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_sub(1, Ordering::Relaxed);
    }

    /// Count a lookup
    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a traversal
    pub fn increment_traversals(&self) {
        self.traversals.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a rejected operation
    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Overwrite the record gauge
    pub fn set_records(&self, count: u64) {
        self.records.store(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            traversals: self.traversals.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            records: self.records.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub lookups: u64,
    pub traversals: u64,
    pub rejected: u64,
    pub records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.records_created, 0);
        assert_eq!(snapshot.lookups, 0);
        assert_eq!(snapshot.records, 0);
    }

    #[test]
    fn test_record_gauge_follows_mutations() {
        let registry = MetricsRegistry::new();
        registry.record_created();
        registry.record_created();
        registry.record_deleted();
        registry.record_updated();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.records_created, 2);
        assert_eq!(snapshot.records_deleted, 1);
        assert_eq!(snapshot.records_updated, 1);
        assert_eq!(snapshot.records, 1);

        registry.set_records(0);
        assert_eq!(registry.snapshot().records, 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_rejected();
        let value = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(value["rejected"], 1);
        assert_eq!(value["traversals"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let reg = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        reg.increment_lookups();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.snapshot().lookups, 1000);
    }
}
