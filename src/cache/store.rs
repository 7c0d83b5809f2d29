//! Cache Store Module
//!
//! Single-threaded cache engine: HashMap storage with TTL expiration and
//! renewal on read. Thread safety is added by `TtlCache`.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;
use crate::config::RenewalPolicy;

// == Cache Store ==
/// Main cache storage with TTL support.
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// TTL for entries written without an explicit duration
    default_ttl: Duration,
    /// How a successful read extends an entry
    renewal: RenewalPolicy,
}

impl<T> CacheStore<T> {
    // == Constructor ==
    /// Creates an empty CacheStore.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL used by `set` and by `RenewalPolicy::Default`
    /// * `renewal` - Renewal applied on each successful `get`
    pub fn new(default_ttl: Duration, renewal: RenewalPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            renewal,
        }
    }

    // == Set ==
    /// Stores a key-value pair with the default TTL.
    pub fn set(&mut self, key: String, value: T) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    // == Set With TTL ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// An existing entry is replaced outright, value and expiration alike.
    pub fn set_with_ttl(&mut self, key: String, value: T, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl, Instant::now());
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key, renewing its expiration.
    ///
    /// Expired entries are removed and reported as misses.
    pub fn get(&mut self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let now = Instant::now();
        let entry = self.entries.get_mut(key)?;

        if entry.is_expired_at(now) {
            self.entries.remove(key);
            return None;
        }

        match self.renewal {
            RenewalPolicy::Default => entry.renew(self.default_ttl, now),
            RenewalPolicy::Original => entry.renew(entry.ttl, now),
            RenewalPolicy::Disabled => {}
        }

        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all entries expired at a single instant sampled up front.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == TTL Remaining ==
    /// Returns the time left for a live entry without renewing it.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining(now))
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the TTL applied by `set`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
