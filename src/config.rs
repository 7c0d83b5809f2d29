//! Configuration Module
//!
//! Handles loading and validating cache configuration, either from
//! environment variables or from a host application's config file via serde.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default TTL applied by `set` and by renewal on read.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default period between two background sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

// == Renewal Policy ==
/// How a successful `get` pushes an entry's expiration forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalPolicy {
    /// Renew to `now + default_ttl`, even for entries written with `set_with_ttl`.
    ///
    /// A custom TTL therefore only holds until the first read. Pick
    /// `Original` when per-entry durations must survive reads.
    #[default]
    Default,
    /// Renew to `now + ttl` using the duration the entry was last written with.
    Original,
    /// Never renew; entries expire at the instant they were written for.
    Disabled,
}

impl RenewalPolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "original" => Some(Self::Original),
            "disabled" | "off" | "none" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for entries written without an explicit duration
    #[serde(rename = "default_ttl_ms", with = "millis")]
    pub default_ttl: Duration,
    /// Period between background sweeps
    #[serde(rename = "sweep_interval_ms", with = "millis")]
    pub sweep_interval: Duration,
    /// Expiration renewal applied by a successful read
    pub renewal: RenewalPolicy,
}

impl CacheConfig {
    /// Creates a config with the given default TTL and every other value defaulted.
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            ..Self::default()
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Opt-in only: `TtlCache::new` and `TtlCache::with_config` never read
    /// the environment themselves.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep period in milliseconds (default: 10000)
    /// - `CACHE_RENEWAL` - `default`, `original` or `disabled` (default: `default`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env::var("CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_ttl),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_interval),
            renewal: env::var("CACHE_RENEWAL")
                .ok()
                .and_then(|v| RenewalPolicy::parse(&v))
                .unwrap_or(defaults.renewal),
        }
    }

    /// Checks the values the sweeper cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            renewal: RenewalPolicy::Default,
        }
    }
}

/// Serializes durations as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
        assert_eq!(config.renewal, RenewalPolicy::Default);
    }

    #[test]
    fn test_config_with_ttl_keeps_other_defaults() {
        let config = CacheConfig::with_ttl(Duration::from_millis(50));
        assert_eq!(config.default_ttl, Duration::from_millis(50));
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);
    }

    // Single test touching the process environment so parallel tests don't race.
    #[test]
    fn test_config_from_env() {
        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_SWEEP_INTERVAL_MS");
        env::remove_var("CACHE_RENEWAL");
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());

        env::set_var("CACHE_DEFAULT_TTL_MS", "1500");
        env::set_var("CACHE_SWEEP_INTERVAL_MS", "250");
        env::set_var("CACHE_RENEWAL", "Original");
        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, Duration::from_millis(1500));
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.renewal, RenewalPolicy::Original);

        // The cache itself ignores the environment
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let _guard = runtime.enter();
        let cache = crate::TtlCache::<i32>::new(Duration::from_secs(7)).unwrap();
        assert_eq!(cache.config(), &CacheConfig::with_ttl(Duration::from_secs(7)));
        drop(cache);

        env::set_var("CACHE_DEFAULT_TTL_MS", "not-a-number");
        env::set_var("CACHE_RENEWAL", "sometimes");
        let config = CacheConfig::from_env();
        assert_eq!(config.default_ttl, DEFAULT_TTL);
        assert_eq!(config.renewal, RenewalPolicy::Default);

        env::remove_var("CACHE_DEFAULT_TTL_MS");
        env::remove_var("CACHE_SWEEP_INTERVAL_MS");
        env::remove_var("CACHE_RENEWAL");
    }

    #[test]
    fn test_validate_rejects_zero_sweep_interval() {
        let config = CacheConfig {
            sweep_interval: Duration::ZERO,
            ..CacheConfig::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_renewal_policy_parse() {
        assert_eq!(RenewalPolicy::parse(" default "), Some(RenewalPolicy::Default));
        assert_eq!(RenewalPolicy::parse("off"), Some(RenewalPolicy::Disabled));
        assert_eq!(RenewalPolicy::parse(""), None);
    }
}
