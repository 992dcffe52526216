//! Cache adapter
//!
//! [`CacheStore`] is the boundary to the external key-value cache. Every call
//! reports hit, miss and failure separately; the access layer decides how a
//! failure degrades. [`RedisCache`] talks to Redis, [`MemoryCache`] keeps
//! entries in process.

pub mod keys;
pub mod memory;
pub mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Cache error types
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cache call timed out")]
    Timeout,

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a successful cache lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Vec<u8>),
    Miss,
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// External key-value cache with per-entry TTL
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<CacheLookup>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;

    /// Delete every listed key; keys that do not exist are ignored
    async fn delete(&self, keys: &[String]) -> CacheResult<()>;

    /// Connectivity check
    async fn ping(&self) -> CacheResult<()>;
}
