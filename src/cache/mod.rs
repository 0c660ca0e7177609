//! Cache Module
//!
//! Provides the in-memory idempotency store with TTL-based sweeping.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::IdempotencyStore;

/// Caller-generated identifier for one logical operation.
pub type OperationId = uuid::Uuid;
