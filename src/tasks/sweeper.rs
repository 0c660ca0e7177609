//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired idempotency entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::IdempotencyStore;

/// Cancellation signal for the sweeper.
///
/// Fires when `true` is published or when every sender has been dropped.
pub type CancelSignal = watch::Receiver<bool>;

/// Spawns a background task that sweeps `store` every `period`.
///
/// Each tick runs `IdempotencyStore::sweep_expired`. The loop waits on
/// either the next tick or `cancel`; with no signal supplied only the timer
/// can wake it, so the task lives as long as the runtime.
///
/// # Arguments
/// * `store` - Handle to the store to sweep
/// * `period` - Interval between sweeps; must be non-zero
/// * `cancel` - Optional signal that stops the task
///
/// # Returns
/// A JoinHandle that finishes once the task observes cancellation.
///
/// # Example
/// ```ignore
/// let (cancel_tx, cancel_rx) = watch::channel(false);
/// let handle = spawn_sweeper(store.clone(), Duration::from_millis(100), Some(cancel_rx));
/// // Later, during shutdown:
/// cancel_tx.send(true)?;
/// handle.await?;
/// ```
pub fn spawn_sweeper(
    store: IdempotencyStore,
    period: Duration,
    mut cancel: Option<CancelSignal>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting idempotency sweeper with a period of {}ms (cancellable: {})",
            period.as_millis(),
            cancel.is_some()
        );

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; wait a full period first
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.sweep_expired().await;
                    if removed > 0 {
                        info!("Sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Sweep: no expired entries found");
                    }
                }
                _ = cancelled(&mut cancel) => {
                    info!("Idempotency sweeper stopped");
                    break;
                }
            }
        }
    })
}

/// Resolves once the signal fires; never resolves when there is no signal.
async fn cancelled(cancel: &mut Option<CancelSignal>) {
    match cancel {
        // A closed channel also ends the wait
        Some(rx) => {
            let _ = rx.wait_for(|stop| *stop).await;
        }
        None => std::future::pending::<()>().await,
    }
}
