//! Data models
//!
//! Shared between the order service and its API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod order;

// Re-exports
pub use order::*;
