//! Record store access layer
//!
//! [`OrderStore`] is the boundary to the system of record. The PostgreSQL
//! implementation lives in [`postgres`]; [`memory`] keeps everything in
//! process for tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{NewOrder, Order, OrderStats};
use thiserror::Error;

/// Record store error types
///
/// `NotFound` is kept apart from connectivity failures so callers can map it
/// to a 404 instead of a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Order not found")]
    NotFound,

    #[error("Record store call timed out")]
    Timeout,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Connectivity or timeout failure (as opposed to a missing row)
    pub fn is_transient(&self) -> bool {
        !matches!(self, StoreError::NotFound)
    }
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// System of record for orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, newest id first
    async fn query_all(&self) -> StoreResult<Vec<Order>>;

    /// A single order; `StoreError::NotFound` when no row matches
    async fn query_by_id(&self, id: i64) -> StoreResult<Order>;

    /// Insert a validated order; the store assigns `id` and `created_at`
    async fn insert(&self, order: &NewOrder) -> StoreResult<(i64, DateTime<Utc>)>;

    /// Replace the status and return the updated row
    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Order>;

    /// Order count and revenue over every row
    async fn aggregate_stats(&self) -> StoreResult<OrderStats>;

    /// Connectivity check
    async fn ping(&self) -> StoreResult<()>;
}
