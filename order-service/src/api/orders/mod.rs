//! Order API Module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/v1/orders | GET | All orders, cache first |
//! | /api/v1/orders | POST | Create an order |
//! | /api/v1/orders/{id} | GET | One order, cache first |
//! | /api/v1/orders/{id}/status | PATCH | Replace the status |
//! | /api/v1/stats | GET | Order count and revenue |

mod handler;

pub use handler::{OrderListResponse, OrderResponse, OrderWriteResponse, StatsResponse};

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// Order router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/orders", get(handler::list).post(handler::create))
        .route("/api/v1/orders/{id}", get(handler::get_by_id))
        .route("/api/v1/orders/{id}/status", patch(handler::update_status))
        .route("/api/v1/stats", get(handler::stats))
}
