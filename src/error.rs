//! Error types for the TTL cache
//!
//! Data operations never fail; only construction can.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The sweep task needs a tokio runtime to be spawned on
    #[error("TTL cache must be created inside a tokio runtime")]
    NoRuntime,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
