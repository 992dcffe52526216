//! Cache key derivation and TTLs

use std::time::Duration;

/// Key of the full order listing
pub const ALL_ORDERS: &str = "orders:all";

/// TTL of a single cached order
pub const ORDER_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL of the cached order listing
pub const ALL_ORDERS_TTL: Duration = Duration::from_secs(60);

/// Key of a single order
pub fn order(id: i64) -> String {
    format!("order:{id}")
}

/// Keys a write to order `id` must invalidate
pub fn affected_by_write(id: i64) -> Vec<String> {
    vec![ALL_ORDERS.to_string(), order(id)]
}
