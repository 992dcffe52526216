//! In-process cache

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use super::{CacheError, CacheLookup, CacheResult, CacheStore};

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// `DashMap`-backed cache with passive expiry
///
/// Expired entries are dropped when read. Time comes from `tokio::time`, so a
/// paused test runtime controls expiry. `set_available(false)` makes every call
/// fail the way an unreachable server would.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<DashMap<String, Entry>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Whether a live entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    fn check_available(&self) -> CacheResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<CacheLookup> {
        self.check_available()?;
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && entry.expires_at > now
        {
            return Ok(CacheLookup::Hit(entry.value.clone()));
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(CacheLookup::Miss)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        self.check_available()?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        self.check_available()?;
        for key in keys {
            self.entries.remove(key);
        }
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check_available()
    }
}
