//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Sweep Handle ==
/// Owner side of a running sweep task.
///
/// Dropping the handle does not stop the task; call [`SweepHandle::stop`]
/// or [`SweepHandle::shutdown`].
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the task to exit at its next wakeup.
    pub fn stop(&self) {
        // notify_one stores a permit, so a signal sent mid-sweep is not lost
        self.shutdown.notify_one();
    }

    /// Signals the task and waits until it has exited.
    pub async fn shutdown(self) {
        self.stop();
        // A JoinError here means the task panicked or was aborted; either way it is gone
        let _ = self.task.await;
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task sleeps for `interval` between runs and takes the write lock only
/// for the duration of a sweep. It holds a weak reference to the store and
/// exits when signalled through the returned handle or once the store has
/// been dropped.
///
/// # Arguments
/// * `runtime` - Runtime the task is spawned on
/// * `cache` - Weak reference to the shared store
/// * `interval` - Time between sweeps
pub fn spawn_sweep_task<T>(
    runtime: &Handle,
    cache: Weak<RwLock<CacheStore<T>>>,
    interval: Duration,
) -> SweepHandle
where
    T: Send + Sync + 'static,
{
    let shutdown = Arc::new(Notify::new());
    let signal = Arc::clone(&shutdown);

    let task = runtime.spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::select! {
                _ = signal.notified() => {
                    info!("TTL sweep task received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let Some(cache) = cache.upgrade() else {
                debug!("TTL sweep task: cache dropped, exiting");
                break;
            };

            let removed = cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .cleanup_expired();

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    });

    SweepHandle { shutdown, task }
}
