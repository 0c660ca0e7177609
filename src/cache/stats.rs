//! Cache Statistics Module
//!
//! Tracks store activity: hits, misses, stores, overwrites and swept entries.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of store activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Checks that found a stored result
    pub hits: u64,
    /// Checks that found nothing
    pub misses: u64,
    /// Calls to `store`
    pub stores: u64,
    /// Stores that replaced an existing entry
    pub overwrites: u64,
    /// Entries removed by the sweeper
    pub swept: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the check hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if nothing has been checked.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Counters ==
/// Lock-free counters shared by every clone of a store.
///
/// `check` only holds the shared lock, so counters cannot live inside the
/// guarded map.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
    overwrites: AtomicU64,
    swept: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store(&self, overwrite: bool) {
        self.stores.fetch_add(1, Ordering::Relaxed);
        if overwrite {
            self.overwrites.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_swept(&self, count: usize) {
        self.swept.fetch_add(count as u64, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters into a `CacheStats` with the given entry count.
    pub(crate) fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
            total_entries,
        }
    }
}
