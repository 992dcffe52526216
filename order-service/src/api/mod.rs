//! HTTP API
//!
//! Handlers translate requests into [`OrderAccess`](crate::orders::OrderAccess)
//! calls and results into explicit response records. Errors render as
//! plain-text bodies through [`AppError`](shared::error::AppError).

pub mod extract;
pub mod health;
pub mod orders;

use std::time::Duration;

use axum::Router;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// UUID v4 request id generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Service descriptor and health - public
        .merge(health::router())
        // Orders and stats
        .merge(orders::router())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::new(ErrorCode::NotFound)
}

/// Build the fully configured application
///
/// Used by both the HTTP server and oneshot calls in tests.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .with_state(state)
        // CORS - any origin, method and header
        .layer(CorsLayer::permissive())
        // Bound the whole request
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        // Trace - request spans at INFO
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - outermost so the trace span sees it
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}
