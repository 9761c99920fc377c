//! Cache Statistics Module
//!
//! Counters kept by the router: hits, misses, writes, clears, fallbacks and
//! unreadable payloads.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of router activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a payload
    pub hits: u64,
    /// Reads that found nothing (or nothing readable)
    pub misses: u64,
    /// Successful saves
    pub writes: u64,
    /// Clear requests
    pub clears: u64,
    /// Operations served by the local store after a remote error
    pub fallbacks: u64,
    /// Stored payloads that failed to deserialize
    pub decode_failures: u64,
    /// Operations that failed on every tier
    pub errors: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    pub fn record_decode_failure(&mut self) {
        self.decode_failures += 1;
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn set_fallbacks(&mut self, count: u64) {
        self.fallbacks = count;
    }
}
