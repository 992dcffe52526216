//! Order domain
//!
//! - [`lifecycle`]: input validation for create and status change
//! - [`access`]: cache-aside reads and invalidate-on-write over the record
//!   store and the cache

pub mod access;
pub mod lifecycle;

pub use access::{Connectivity, OrderAccess};

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::StoreError;

/// Order operation error
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Map a store error for a call keyed by `id`, keeping missing rows apart
    pub(crate) fn from_store(err: StoreError, id: i64) -> Self {
        match err {
            StoreError::NotFound => OrderError::NotFound(id),
            other => OrderError::Store(other),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidInput(msg) => AppError::validation(msg),
            OrderError::NotFound(id) => AppError::order_not_found(id),
            OrderError::Store(StoreError::NotFound) => AppError::new(ErrorCode::OrderNotFound),
            // rendered as a 500, which logs the cause
            OrderError::Store(e) => {
                AppError::database("Database error").with_detail("cause", e.to_string())
            }
        }
    }
}

/// Where a read was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    #[serde(rename = "cache")]
    Cache,
    #[serde(rename = "database")]
    Store,
}

/// A read result tagged with its source
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn cache(value: T) -> Self {
        Self {
            value,
            source: Source::Cache,
        }
    }

    pub fn store(value: T) -> Self {
        Self {
            value,
            source: Source::Store,
        }
    }
}
