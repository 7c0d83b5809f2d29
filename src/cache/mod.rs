//! Cache Module
//!
//! Provides a generic in-memory cache with TTL expiration and renewal on read.

mod entry;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use store::CacheStore;
pub use ttl_cache::TtlCache;
