//! Trx Store - An in-memory idempotency cache
//!
//! Remembers completed operation results by caller-supplied identifier so
//! retried requests get the original result instead of re-executing, with
//! TTL-based sweeping to bound memory.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStats, IdempotencyStore, OperationId};
pub use config::{Config, StoreConfig};
pub use tasks::{spawn_sweeper, CancelSignal};
