//! TTL Cache Module
//!
//! Thread-safe handle over a `CacheStore`, owning the background sweep task.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == TTL Cache ==
/// Generic, thread-safe cache from string keys to values of type `T`.
///
/// Every operation that may touch the map, `get` included, takes the lock in
/// exclusive mode. Only the non-renewing accessors (`len`, `ttl_remaining`)
/// share it.
///
/// The sweep task is stopped when the cache is dropped or [`closed`](Self::close).
/// Share a cache between threads by wrapping it in an `Arc`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::TtlCache;
///
/// # #[tokio::main]
/// # async fn main() -> ttl_cache::Result<()> {
/// let cache = TtlCache::new(Duration::from_secs(60))?;
/// cache.set("answer", 42);
/// assert_eq!(cache.get("answer"), Some(42));
/// cache.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TtlCache<T> {
    store: Arc<RwLock<CacheStore<T>>>,
    config: CacheConfig,
    sweeper: Option<SweepHandle>,
}

impl<T> TtlCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates an empty cache with the given default TTL and starts sweeping
    /// every [`DEFAULT_SWEEP_INTERVAL`](crate::config::DEFAULT_SWEEP_INTERVAL).
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(default_ttl: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::with_ttl(default_ttl))
    }

    /// Creates an empty cache from a full configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let store = Arc::new(RwLock::new(CacheStore::new(
            config.default_ttl,
            config.renewal,
        )));
        let sweeper = spawn_sweep_task(&runtime, Arc::downgrade(&store), config.sweep_interval);

        debug!(
            "TTL cache created: default_ttl={:?}, sweep_interval={:?}, renewal={:?}",
            config.default_ttl, config.sweep_interval, config.renewal
        );

        Ok(Self {
            store,
            config,
            sweeper: Some(sweeper),
        })
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL, replacing any existing entry.
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.write().set(key.into(), value);
    }

    // == Set With TTL ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: T, ttl: Duration) {
        self.write().set_with_ttl(key.into(), value, ttl);
    }

    // == Get ==
    /// Returns a clone of the live value under `key` and renews its expiration.
    ///
    /// Returns `None` when the key is absent or expired; an expired entry is
    /// removed as part of the same critical section.
    pub fn get(&self, key: &str) -> Option<T> {
        self.write().get(key)
    }

    // == Delete ==
    /// Removes `key` if present.
    pub fn delete(&self, key: &str) {
        if self.write().delete(key) {
            debug!("Deleted key {}", key);
        }
    }

    // == Invalidate ==
    /// Removes every expired entry, returning how many were removed.
    ///
    /// This is the same pass the background task runs.
    pub fn invalidate(&self) -> usize {
        self.write().cleanup_expired()
    }
}

impl<T> TtlCache<T> {
    // == Read-only Accessors ==
    /// Time left before `key` expires, without renewing it.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.read().ttl_remaining(key)
    }

    /// Number of stored entries, including expired entries not yet removed.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// TTL applied by `set` and, under the default renewal policy, by `get`.
    pub fn default_ttl(&self) -> Duration {
        self.config.default_ttl
    }

    /// Configuration the cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Lifecycle ==
    /// Returns true while the background sweep task is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .as_ref()
            .is_some_and(|sweeper| !sweeper.is_finished())
    }

    /// Stops the background sweep task and waits for it to exit.
    pub async fn close(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
            debug!("TTL cache closed");
        }
    }

    // == Lock Helpers ==
    // Each mutation is a single map call, so a panic while holding the lock
    // cannot leave the map half-written.
    fn write(&self) -> RwLockWriteGuard<'_, CacheStore<T>> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheStore<T>> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for TtlCache<T> {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.stop();
        }
    }
}
