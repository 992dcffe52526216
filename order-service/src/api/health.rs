//! Service descriptor and health check
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | / | GET | Service name, version and endpoint map |
//! | /health | GET | Record store and cache connectivity |

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    service: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    health: &'static str,
    orders: &'static str,
    order: &'static str,
    stats: &'static str,
}

async fn root() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        service: "Order Service",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/health",
            orders: "/api/v1/orders",
            order: "/api/v1/orders/<id>",
            stats: "/api/v1/stats",
        },
    })
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    service: &'static str,
    /// healthy | unhealthy
    status: &'static str,
    database: &'static str,
    redis: &'static str,
    timestamp: DateTime<Utc>,
}

fn connection_label(up: bool) -> &'static str {
    if up { "connected" } else { "disconnected" }
}

/// 503 only when the record store is unreachable; the cache is informative
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connectivity = state.orders.health().await;

    let (code, status) = if connectivity.database {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            service: crate::SERVICE_NAME,
            status,
            database: connection_label(connectivity.database),
            redis: connection_label(connectivity.cache),
            timestamp: shared::util::now(),
        }),
    )
}
