//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

/// Horizon used when `now + ttl` does not fit in an `Instant` (about 30 years).
pub const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Returns `now + ttl`, saturating to `now + FAR_FUTURE` on overflow.
pub fn deadline(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE)
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Instant after which the entry is expired
    pub expires_at: Instant,
    /// Duration the entry was last written with
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now`.
    pub fn new(value: T, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: deadline(now, ttl),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired only when `now` is strictly
    /// after its expiration instant, so a zero TTL is readable at the instant
    /// it was written.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Renew ==
    /// Pushes the expiration instant to `now + ttl`.
    ///
    /// The write-time duration stored in `self.ttl` is left untouched.
    pub fn renew(&mut self, ttl: Duration, now: Instant) {
        self.expires_at = deadline(now, ttl);
    }

    // == Time To Live ==
    /// Returns the time left before expiration, zero once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", Duration::from_secs(60), now);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.expires_at, now + Duration::from_secs(60));
        assert_eq!(entry.ttl, Duration::from_secs(60));
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, Duration::ZERO, now);

        // Expires exactly at creation time: not yet expired
        assert!(!entry.is_expired_at(now));
        assert!(entry.is_expired_at(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_renew_keeps_write_ttl() {
        let now = Instant::now();
        let mut entry = CacheEntry::new(1, Duration::from_millis(10), now);

        let later = now + Duration::from_millis(5);
        entry.renew(Duration::from_secs(1), later);

        assert_eq!(entry.expires_at, later + Duration::from_secs(1));
        assert_eq!(entry.ttl, Duration::from_millis(10));
        assert!(!entry.is_expired_at(now + Duration::from_millis(20)));
    }

    #[test]
    fn test_max_ttl_saturates() {
        let now = Instant::now();
        let mut entry = CacheEntry::new(1, Duration::MAX, now);

        assert_eq!(entry.expires_at, now + FAR_FUTURE);
        assert_eq!(entry.ttl, Duration::MAX);
        assert!(!entry.is_expired_at(now + Duration::from_secs(86_400 * 365)));

        let later = now + Duration::from_secs(5);
        entry.renew(Duration::MAX, later);
        assert_eq!(entry.expires_at, later + FAR_FUTURE);
    }

    #[test]
    fn test_ttl_remaining() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, Duration::from_secs(10), now);

        assert_eq!(entry.ttl_remaining(now), Duration::from_secs(10));
        assert_eq!(
            entry.ttl_remaining(now + Duration::from_secs(4)),
            Duration::from_secs(6)
        );
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new(1, Duration::from_secs(1), now);

        assert_eq!(entry.ttl_remaining(now + Duration::from_secs(5)), Duration::ZERO);
    }
}
