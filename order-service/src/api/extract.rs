//! Request extractors
//!
//! Both reject with [`AppError`] so clients get the same plain-text error
//! bodies as every other failure.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use http::request::Parts;
use serde::de::DeserializeOwned;
use shared::error::AppError;

pub const MSG_INVALID_ORDER_ID: &str = "Invalid order ID";

/// JSON body parsed regardless of `Content-Type`
///
/// An empty body reads as `{}`, so missing fields reach validation instead
/// of failing here.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        serde_json::from_slice(body)
            .map(JsonBody)
            .map_err(|e| AppError::invalid_format(e.to_string()))
    }
}

/// Positive order id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderId(pub i64);

impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_request(MSG_INVALID_ORDER_ID))?;
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(OrderId(id)),
            _ => Err(AppError::invalid_request(MSG_INVALID_ORDER_ID).with_detail("id", raw)),
        }
    }
}
