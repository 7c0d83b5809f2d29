//! TTL Cache - A generic in-memory cache with time-to-live expiration
//!
//! Entries expire lazily on read and proactively through a background sweep
//! task; a successful read renews an entry's expiration.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::TtlCache;
pub use config::{CacheConfig, RenewalPolicy};
pub use error::{CacheError, Result};
