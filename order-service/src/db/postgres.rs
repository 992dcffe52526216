//! PostgreSQL order store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{NewOrder, Order, OrderStats};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{OrderStore, StoreError, StoreResult};
use crate::config::Config;

#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool, verify connectivity and apply pending migrations
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections)
            .max_lifetime(config.db_max_lifetime)
            .acquire_timeout(config.store_timeout)
            .connect_with(config.pg_connect_options())
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;

        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn query_all(&self) -> StoreResult<Vec<Order>> {
        let rows: Vec<Order> = sqlx::query_as(
            r#"
            SELECT id, user_id, product_id, quantity, total_price, status, created_at
            FROM orders
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn query_by_id(&self, id: i64) -> StoreResult<Order> {
        let row: Option<Order> = sqlx::query_as(
            r#"
            SELECT id, user_id, product_id, quantity, total_price, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn insert(&self, order: &NewOrder) -> StoreResult<(i64, DateTime<Utc>)> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO orders (user_id, product_id, quantity, total_price, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(order.user_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .bind(&order.status)
        .fetch_one(&self.pool)
        .await?;
        Ok((id, created_at))
    }

    async fn update_status(&self, id: i64, status: &str) -> StoreResult<Order> {
        let row: Option<Order> = sqlx::query_as(
            r#"
            UPDATE orders
            SET status = $1
            WHERE id = $2
            RETURNING id, user_id, product_id, quantity, total_price, status, created_at
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn aggregate_stats(&self) -> StoreResult<OrderStats> {
        let (total_orders, total_revenue): (i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS total_orders,
                   COALESCE(SUM(total_price), 0) AS total_revenue
            FROM orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(OrderStats {
            total_orders,
            total_revenue,
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
