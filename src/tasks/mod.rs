//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a store.
//!
//! # Tasks
//! - Sweeper: Removes expired idempotency entries at a fixed period

mod sweeper;

pub use sweeper::{spawn_sweeper, CancelSignal};
