//! order-service: order management over HTTP with a cache-aside layer
//!
//! Reads go through a Redis cache in front of PostgreSQL; writes go to
//! PostgreSQL and invalidate the affected cache keys.
//!
//! - [`db`]: record store boundary ([`db::OrderStore`])
//! - [`cache`]: cache boundary ([`cache::CacheStore`]) and key scheme
//! - [`orders`]: validation and the cache-aside access layer
//! - [`api`]: axum routes and response records
//! - [`server`]: listener lifecycle and graceful shutdown

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod orders;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{OrderServer, OrderServerHandle};
pub use state::AppState;

/// Name reported by health and stats responses
pub const SERVICE_NAME: &str = "order-service";
