//! Cache-aside access to orders
//!
//! Reads try the cache first and fall back to the record store, populating
//! the cache on the way out. Writes go to the store and then delete the
//! affected cache keys; the next read repopulates them.
//!
//! Cache failures never reach the caller: a failed lookup is a miss, a failed
//! population or invalidation is logged and dropped. Stale entries left by a
//! failed invalidation expire with their TTL.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Order, OrderCreate, OrderStats};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{OrderError, Sourced, lifecycle};
use crate::cache::{CacheError, CacheLookup, CacheResult, CacheStore, keys};
use crate::db::{OrderStore, StoreError, StoreResult};

const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(1);

/// Connectivity of both adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    pub database: bool,
    pub cache: bool,
}

/// Single path for reading and writing orders
#[derive(Clone)]
pub struct OrderAccess {
    store: Arc<dyn OrderStore>,
    cache: Arc<dyn CacheStore>,
    store_timeout: Duration,
    cache_timeout: Duration,
}

impl OrderAccess {
    pub fn new(store: Arc<dyn OrderStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            cache,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    /// Bound every store call by `store` and every cache call by `cache`
    pub fn with_timeouts(mut self, store: Duration, cache: Duration) -> Self {
        self.store_timeout = store;
        self.cache_timeout = cache;
        self
    }

    /// All orders, newest first
    pub async fn get_all_orders(&self) -> Result<Sourced<Vec<Order>>, OrderError> {
        if let Some(orders) = self.cached::<Vec<Order>>(keys::ALL_ORDERS).await {
            return Ok(Sourced::cache(orders));
        }

        let orders = self.store_call(self.store.query_all()).await?;
        self.populate(keys::ALL_ORDERS, &orders, keys::ALL_ORDERS_TTL)
            .await;
        Ok(Sourced::store(orders))
    }

    /// A single order by id
    pub async fn get_order(&self, id: i64) -> Result<Sourced<Order>, OrderError> {
        let key = keys::order(id);
        if let Some(order) = self.cached::<Order>(&key).await {
            return Ok(Sourced::cache(order));
        }

        let order = self
            .store_call(self.store.query_by_id(id))
            .await
            .map_err(|e| OrderError::from_store(e, id))?;
        self.populate(&key, &order, keys::ORDER_TTL).await;
        Ok(Sourced::store(order))
    }

    /// Validate, insert, then drop the cached listing
    pub async fn create_order(&self, input: OrderCreate) -> Result<Order, OrderError> {
        let new_order = lifecycle::validate_create(input)?;
        let (id, created_at) = self.store_call(self.store.insert(&new_order)).await?;

        self.invalidate(&[keys::ALL_ORDERS.to_string()]).await;

        let order = new_order.into_order(id, created_at);
        tracing::info!(order_id = order.id, user_id = order.user_id, "Order created");
        Ok(order)
    }

    /// Replace the status, then drop the cached listing and the cached order
    pub async fn update_order_status(
        &self,
        id: i64,
        status: Option<&str>,
    ) -> Result<Order, OrderError> {
        let status = lifecycle::validate_status(status)?;
        let order = self
            .store_call(self.store.update_status(id, &status))
            .await
            .map_err(|e| OrderError::from_store(e, id))?;

        self.invalidate(&keys::affected_by_write(id)).await;

        tracing::info!(order_id = id, status = %order.status, "Order status updated");
        Ok(order)
    }

    /// Count and revenue straight from the store
    pub async fn order_stats(&self) -> Result<OrderStats, OrderError> {
        Ok(self.store_call(self.store.aggregate_stats()).await?)
    }

    /// Ping both adapters
    pub async fn health(&self) -> Connectivity {
        let (database, cache) = tokio::join!(
            self.store_call(self.store.ping()),
            self.cache_call(self.cache.ping())
        );
        if let Err(e) = &database {
            tracing::warn!(error = %e, "Record store ping failed");
        }
        if let Err(e) = &cache {
            tracing::warn!(error = %e, "Cache ping failed");
        }
        Connectivity {
            database: database.is_ok(),
            cache: cache.is_ok(),
        }
    }

    // ========== Adapter calls ==========

    async fn store_call<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .unwrap_or(Err(StoreError::Timeout))
    }

    async fn cache_call<T>(&self, fut: impl Future<Output = CacheResult<T>>) -> CacheResult<T> {
        tokio::time::timeout(self.cache_timeout, fut)
            .await
            .unwrap_or(Err(CacheError::Timeout))
    }

    /// Cached value for `key`; errors and undecodable bytes count as a miss
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache_call(self.cache.get(key)).await {
            Ok(CacheLookup::Hit(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    tracing::debug!(key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!(key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(CacheLookup::Miss) => {
                tracing::debug!(key, "Cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache lookup failed, reading from store");
                None
            }
        }
    }

    async fn populate<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key, error = %e, "Skipping cache population");
                return;
            }
        };
        match self.cache_call(self.cache.set(key, bytes, ttl)).await {
            Ok(()) => tracing::info!(key, ttl_secs = ttl.as_secs(), "Cache populated"),
            Err(e) => tracing::warn!(key, error = %e, "Cache population failed"),
        }
    }

    async fn invalidate(&self, stale: &[String]) {
        match self.cache_call(self.cache.delete(stale)).await {
            Ok(()) => tracing::info!(keys = ?stale, "Cache invalidated"),
            Err(e) => tracing::warn!(keys = ?stale, error = %e, "Cache invalidation failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::db::MemoryOrderStore;
    use crate::orders::Source;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    fn setup() -> (OrderAccess, MemoryOrderStore, MemoryCache) {
        let store = MemoryOrderStore::new();
        let cache = MemoryCache::new();
        let access = OrderAccess::new(Arc::new(store.clone()), Arc::new(cache.clone()));
        (access, store, cache)
    }

    fn create_input(user_id: i64) -> OrderCreate {
        OrderCreate {
            user_id,
            product_id: 5,
            quantity: 2,
            total_price: Decimal::new(1998, 2),
            status: None,
        }
    }

    /// Cache whose every call hangs
    struct StalledCache;

    #[async_trait]
    impl CacheStore for StalledCache {
        async fn get(&self, _key: &str) -> CacheResult<CacheLookup> {
            std::future::pending().await
        }
        async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> CacheResult<()> {
            std::future::pending().await
        }
        async fn delete(&self, _keys: &[String]) -> CacheResult<()> {
            std::future::pending().await
        }
        async fn ping(&self) -> CacheResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_defaults() {
        let (access, _, _) = setup();
        let before = shared::util::now();
        let order = access.create_order(create_input(1)).await.unwrap();
        assert!(order.id > 0);
        assert_eq!(order.status, "pending");
        assert!(order.created_at >= before);
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let (access, store, _) = setup();
        let err = access.create_order(create_input(0)).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert_eq!(store.aggregate_stats().await.unwrap().total_orders, 0);
    }

    #[tokio::test]
    async fn test_get_order_populates_then_hits() {
        let (access, store, cache) = setup();
        let created = access.create_order(create_input(1)).await.unwrap();

        let first = access.get_order(created.id).await.unwrap();
        assert_eq!(first.source, Source::Store);
        assert!(cache.contains(&keys::order(created.id)));

        let second = access.get_order(created.id).await.unwrap();
        assert_eq!(second.source, Source::Cache);
        assert_eq!(second.value, first.value);
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let (access, _, cache) = setup();
        assert!(matches!(
            access.get_order(999_999).await,
            Err(OrderError::NotFound(999_999))
        ));
        assert!(!cache.contains(&keys::order(999_999)));
        assert!(matches!(
            access.update_order_status(999_999, Some("shipped")).await,
            Err(OrderError::NotFound(999_999))
        ));
    }

    #[tokio::test]
    async fn test_create_invalidates_listing() {
        let (access, _, cache) = setup();
        access.create_order(create_input(1)).await.unwrap();
        access.get_all_orders().await.unwrap();
        assert!(cache.contains(keys::ALL_ORDERS));

        access.create_order(create_input(2)).await.unwrap();
        assert!(!cache.contains(keys::ALL_ORDERS));

        let listing = access.get_all_orders().await.unwrap();
        assert_eq!(listing.source, Source::Store);
        assert_eq!(listing.value.len(), 2);
        assert_eq!(listing.value[0].user_id, 2);
    }

    #[tokio::test]
    async fn test_status_update_invalidates_both_keys() {
        let (access, _, cache) = setup();
        let order = access.create_order(create_input(1)).await.unwrap();
        access.get_order(order.id).await.unwrap();
        access.get_all_orders().await.unwrap();

        let updated = access
            .update_order_status(order.id, Some("shipped"))
            .await
            .unwrap();
        assert_eq!(updated.status, "shipped");
        assert!(!cache.contains(keys::ALL_ORDERS));
        assert!(!cache.contains(&keys::order(order.id)));

        let read = access.get_order(order.id).await.unwrap();
        assert_eq!(read.source, Source::Store);
        assert_eq!(read.value.status, "shipped");

        let listing = access.get_all_orders().await.unwrap();
        assert_eq!(listing.source, Source::Store);
        assert_eq!(listing.value[0].status, "shipped");
    }

    #[tokio::test]
    async fn test_missing_status_is_rejected_before_store() {
        let (access, _, _) = setup();
        let order = access.create_order(create_input(1)).await.unwrap();
        assert!(matches!(
            access.update_order_status(order.id, None).await,
            Err(OrderError::InvalidInput(_))
        ));
        assert_eq!(access.get_order(order.id).await.unwrap().value.status, "pending");
    }

    #[tokio::test]
    async fn test_unavailable_cache_degrades_to_store() {
        let (access, store, cache) = setup();
        cache.set_available(false);

        let order = access.create_order(create_input(1)).await.unwrap();
        let listing = access.get_all_orders().await.unwrap();
        assert_eq!(listing.source, Source::Store);
        assert_eq!(listing.value, vec![order.clone()]);

        access
            .update_order_status(order.id, Some("shipped"))
            .await
            .unwrap();
        let read = access.get_order(order.id).await.unwrap();
        assert_eq!(read.value.status, "shipped");
        assert_eq!(store.reads(), 2);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let (access, _, cache) = setup();
        let order = access.create_order(create_input(1)).await.unwrap();
        cache
            .set(&keys::order(order.id), b"not json".to_vec(), keys::ORDER_TTL)
            .await
            .unwrap();

        let read = access.get_order(order.id).await.unwrap();
        assert_eq!(read.source, Source::Store);
        assert_eq!(read.value, order);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_cache_times_out() {
        let store = MemoryOrderStore::new();
        let access = OrderAccess::new(Arc::new(store.clone()), Arc::new(StalledCache))
            .with_timeouts(Duration::from_secs(5), Duration::from_millis(50));

        let order = access.create_order(create_input(1)).await.unwrap();
        let read = access.get_order(order.id).await.unwrap();
        assert_eq!(read.source, Source::Store);

        let health = access.health().await;
        assert!(health.database);
        assert!(!health.cache);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let (access, store, _) = setup();
        store.set_available(false);
        assert!(matches!(
            access.get_all_orders().await,
            Err(OrderError::Store(StoreError::Database(_)))
        ));
        assert!(matches!(
            access.order_stats().await,
            Err(OrderError::Store(_))
        ));
        assert_eq!(
            access.health().await,
            Connectivity {
                database: false,
                cache: true
            }
        );
    }

    #[tokio::test]
    async fn test_order_stats() {
        let (access, _, _) = setup();
        access.create_order(create_input(1)).await.unwrap();
        access.create_order(create_input(2)).await.unwrap();
        let stats = access.order_stats().await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, Decimal::new(3996, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_and_single_order_expire_on_their_own_ttls() {
        let (access, _, _) = setup();
        let order = access.create_order(create_input(1)).await.unwrap();

        // warm both keys
        access.get_all_orders().await.unwrap();
        access.get_order(order.id).await.unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(access.get_all_orders().await.unwrap().source, Source::Store);
        assert_eq!(access.get_order(order.id).await.unwrap().source, Source::Cache);

        tokio::time::advance(Duration::from_secs(240)).await;
        assert_eq!(access.get_order(order.id).await.unwrap().source, Source::Store);
    }

    #[tokio::test]
    async fn test_long_status_and_large_price_are_accepted() {
        let (access, _, _) = setup();
        let mut input = create_input(1);
        input.total_price = Decimal::new(123_456_789_012, 2);
        let order = access.create_order(input).await.unwrap();

        let status = "awaiting-customs-clearance-at-the-regional-distribution-hub";
        assert!(status.len() > 50);
        let updated = access
            .update_order_status(order.id, Some(status))
            .await
            .unwrap();
        assert_eq!(updated.status, status);
        assert_eq!(updated.total_price, Decimal::new(123_456_789_012, 2));
    }
}
