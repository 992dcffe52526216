//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status assigned when a create payload leaves it empty
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// Order entity
///
/// `id` and `created_at` are assigned by the record store on insert and never
/// change afterwards. `status` is an open string domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Caller-supplied amount, rendered as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Create order payload
///
/// Accepts snake_case and camelCase field names. Missing numeric fields
/// default to zero and are then rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default, alias = "userId")]
    pub user_id: i64,
    #[serde(default, alias = "productId")]
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default, alias = "totalPrice", with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
}

/// Validated order ready for insertion (no id / created_at yet)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: String,
}

impl NewOrder {
    /// Attach the store-assigned identity
    pub fn into_order(self, id: i64, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity,
            total_price: self.total_price,
            status: self.status,
            created_at,
        }
    }
}

/// Update order status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

/// Aggregate figures over every stored order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}
