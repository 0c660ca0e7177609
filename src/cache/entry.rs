//! Cache Entry Module
//!
//! Defines a stored operation result together with the instant it was recorded.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A completed operation's result bytes and its creation instant.
///
/// Value and timestamp live in one structure so they are always written and
/// removed together.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Opaque result bytes supplied by the caller
    pub result: Vec<u8>,
    /// When the result was stored (monotonic clock)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(result: Vec<u8>) -> Self {
        Self {
            result,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is expired only once its age is strictly
    /// greater than the TTL, so an entry exactly `ttl` old is still retained.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    // == Time To Live ==
    /// Remaining time before the entry becomes eligible for sweeping.
    ///
    /// Returns `Duration::ZERO` once the TTL has elapsed.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}
