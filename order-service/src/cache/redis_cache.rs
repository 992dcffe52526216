//! Redis cache adapter

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::{CacheLookup, CacheResult, CacheStore};

/// Redis-backed cache
///
/// The connection is established on first use and then kept by a
/// `ConnectionManager`, which reconnects on its own. A failed first
/// connection leaves the cell empty so the next call tries again.
/// Callers bound each call with their own timeout; dropping a call mid-way
/// is safe.
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
    conn: Arc<OnceCell<ConnectionManager>>,
}

impl RedisCache {
    pub fn new(url: &str) -> CacheResult<Self> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: Arc::new(OnceCell::new()),
        })
    }

    async fn connection(&self) -> CacheResult<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<CacheLookup> {
        let mut conn = self.connection().await?;
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(match value {
            Some(bytes) => CacheLookup::Hit(bytes),
            None => CacheLookup::Miss,
        })
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        let _: () = conn.del(keys).await?;
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_url() {
        assert!(RedisCache::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        // nothing listens on port 1
        let cache = RedisCache::new("redis://127.0.0.1:1/").unwrap();
        let lookup = tokio::time::timeout(Duration::from_secs(5), cache.get("orders:all")).await;
        assert!(!matches!(lookup, Ok(Ok(_))));
        assert!(cache.conn.get().is_none());
    }
}
