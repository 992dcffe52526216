//! In-process order store, used by tests and local runs without PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{NewOrder, Order, OrderStats};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{OrderStore, StoreError, StoreResult};

#[derive(Default)]
struct Rows {
    next_id: i64,
    orders: BTreeMap<i64, Order>,
}

/// Order store backed by a `BTreeMap`
///
/// Reads are counted so callers can tell whether a request reached the store.
/// `set_available(false)` makes every call fail like a lost connection.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    rows: Arc<RwLock<Rows>>,
    reads: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `query_all` / `query_by_id` calls served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn query_all(&self) -> StoreResult<Vec<Order>> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.read().await;
        Ok(rows.orders.values().rev().cloned().collect())
    }

    async fn query_by_id(&self, id: i64) -> StoreResult<Order> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.read().await;
        rows.orders.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, order: &NewOrder) -> StoreResult<(i64, DateTime<Utc>)> {
        self.check_available()?;
        let mut rows = self.rows.write().await;
        rows.next_id += 1;
        let id = rows.next_id;
        let created_at = shared::util::now();
        rows.orders
            .insert(id, order.clone().into_order(id, created_at));
        Ok((id, created_at))
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Order> {
        self.check_available()?;
        let mut rows = self.rows.write().await;
        let order = rows.orders.get_mut(&id).ok_or(StoreError::NotFound)?;
        order.status = status.to_string();
        Ok(order.clone())
    }

    async fn aggregate_stats(&self) -> StoreResult<OrderStats> {
        self.check_available()?;
        let rows = self.rows.read().await;
        Ok(OrderStats {
            total_orders: rows.orders.len() as i64,
            total_revenue: rows.orders.values().map(|o| o.total_price).sum::<Decimal>(),
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }
}
