//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::error::AppResult;
use shared::models::{Order, OrderCreate, OrderStats, OrderStatusUpdate};

use crate::api::extract::{JsonBody, OrderId};
use crate::orders::Source;
use crate::state::AppState;

const MSG_CREATED: &str = "Order created successfully";
const MSG_STATUS_UPDATED: &str = "Order status updated successfully";

/// Order listing with where it came from
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub source: Source,
    pub count: usize,
}

/// Single order with where it came from
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
    pub source: Source,
}

/// Result of a create or status change
#[derive(Debug, Serialize)]
pub struct OrderWriteResponse {
    pub order: Order,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub service: &'static str,
    #[serde(flatten)]
    pub stats: OrderStats,
    pub timestamp: DateTime<Utc>,
}

/// List all orders
pub async fn list(State(state): State<AppState>) -> AppResult<Json<OrderListResponse>> {
    let listing = state.orders.get_all_orders().await?;
    Ok(Json(OrderListResponse {
        count: listing.value.len(),
        orders: listing.value,
        source: listing.source,
    }))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> AppResult<Json<OrderResponse>> {
    let found = state.orders.get_order(id).await?;
    Ok(Json(OrderResponse {
        order: found.value,
        source: found.source,
    }))
}

/// Create order
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderWriteResponse>)> {
    let order = state.orders.create_order(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderWriteResponse {
            order,
            message: MSG_CREATED,
        }),
    ))
}

/// Replace an order's status
pub async fn update_status(
    State(state): State<AppState>,
    OrderId(id): OrderId,
    JsonBody(payload): JsonBody<OrderStatusUpdate>,
) -> AppResult<Json<OrderWriteResponse>> {
    let order = state
        .orders
        .update_order_status(id, payload.status.as_deref())
        .await?;
    Ok(Json(OrderWriteResponse {
        order,
        message: MSG_STATUS_UPDATED,
    }))
}

/// Aggregate count and revenue
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.orders.order_stats().await?;
    Ok(Json(StatsResponse {
        service: crate::SERVICE_NAME,
        stats,
        timestamp: shared::util::now(),
    }))
}
