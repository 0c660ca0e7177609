//! Idempotency Store Module
//!
//! Remembers completed operation results by operation identifier, evicting
//! them once they outlive the configured TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats, OperationId};
use crate::config::StoreConfig;
use crate::error::ConfigError;
use crate::tasks::{spawn_sweeper, CancelSignal};

// == Idempotency Store ==
/// Concurrent, time-bounded map from operation identifier to result bytes.
///
/// Callers check before executing an operation and store its result after.
/// Clones share the same entries.
///
/// # Concurrency
/// `check` and `store` are not atomic together. Two callers retrying the same
/// identifier at the same moment can both see nothing, both execute, and both
/// store; the last store wins. Once a result is stored, every later `check`
/// returns it until it expires. Exactly-once execution needs a per-identifier
/// lock layered on top of this store.
#[derive(Debug, Clone)]
pub struct IdempotencyStore {
    /// Entries keyed by operation identifier; value and timestamp together
    entries: Arc<RwLock<HashMap<OperationId, CacheEntry>>>,
    /// Activity counters
    stats: Arc<StatsCounters>,
    /// Age after which entries are swept
    ttl: Duration,
    /// Background sweeper, absent on the sweeper's own handle to the store
    sweeper: Option<Arc<JoinHandle<()>>>,
}

impl IdempotencyStore {
    // == Constructors ==
    /// Creates a store whose sweeper runs for the lifetime of the process.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::start(StoreConfig::new(ttl), None)
    }

    /// Creates a store whose sweeper stops once `cancel` fires.
    ///
    /// The signal fires when `true` is sent or when every sender is dropped.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_cancellation(ttl: Duration, cancel: CancelSignal) -> Self {
        Self::start(StoreConfig::new(ttl), Some(cancel))
    }

    /// Creates a store from a full config and an optional cancellation signal.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_config(
        config: StoreConfig,
        cancel: Option<CancelSignal>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, cancel))
    }

    fn start(config: StoreConfig, cancel: Option<CancelSignal>) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "IdempotencyStore requires a Tokio runtime to spawn its sweeper; \
                 construct it from within #[tokio::main] or #[tokio::test]"
            );
        }

        let mut store = Self::detached(config.ttl);
        let handle = spawn_sweeper(store.clone(), config.sweep_period, cancel);
        store.sweeper = Some(Arc::new(handle));
        store
    }

    fn detached(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(StatsCounters::default()),
            ttl,
            sweeper: None,
        }
    }

    // == Check ==
    /// Returns the result stored for `id`, if any.
    ///
    /// An entry past its TTL stays visible until the sweeper removes it.
    /// Entries are never modified; only the hit/miss counters are updated.
    pub async fn check(&self, id: OperationId) -> Option<Vec<u8>> {
        let result = {
            let entries = self.entries.read().await;
            entries.get(&id).map(|entry| entry.result.clone())
        };

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        result
    }

    // == Store ==
    /// Records `result` for `id`, replacing any previous result.
    ///
    /// The entry's expiry clock restarts on every store.
    pub async fn store(&self, id: OperationId, result: impl Into<Vec<u8>>) {
        let result = result.into();
        let previous = {
            let mut entries = self.entries.write().await;
            entries.insert(id, CacheEntry::new(result))
        };

        let overwrite = previous.is_some();
        self.stats.record_store(overwrite);
        if overwrite {
            debug!(%id, "Replaced stored result");
        }
    }

    // == Sweep Expired ==
    /// Removes every entry older than the TTL and returns how many went.
    ///
    /// Expired identifiers are collected under the shared lock, then removed
    /// in one exclusive pass. An entry re-stored between the two passes is
    /// no longer expired and is kept.
    pub async fn sweep_expired(&self) -> usize {
        let expired: Vec<OperationId> = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .filter(|(_, entry)| entry.is_expired(self.ttl))
                .map(|(id, _)| *id)
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }

        let removed = {
            let mut entries = self.entries.write().await;
            remove_expired(&mut entries, &expired, self.ttl)
        };

        self.stats.record_swept(removed);
        removed
    }

    // == Introspection ==
    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of activity counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len().await)
    }

    /// True once the background sweeper has stopped.
    pub fn sweeper_finished(&self) -> bool {
        self.sweeper
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }
}

/// Removes the entries for `ids` that are still expired.
///
/// `ids` come from an earlier scan; entries re-stored since then are kept.
fn remove_expired(
    entries: &mut HashMap<OperationId, CacheEntry>,
    ids: &[OperationId],
    ttl: Duration,
) -> usize {
    let mut removed = 0;
    for id in ids {
        if entries.get(id).is_some_and(|entry| entry.is_expired(ttl)) {
            entries.remove(id);
            removed += 1;
        }
    }
    removed
}
