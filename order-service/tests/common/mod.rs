//! Shared harness: full router over in-memory adapters

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use order_service::cache::MemoryCache;
use order_service::db::MemoryOrderStore;
use order_service::{AppState, Config, api};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub store: MemoryOrderStore,
    pub cache: MemoryCache,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::from_lookup(|_| None);
        let store = MemoryOrderStore::new();
        let cache = MemoryCache::new();
        let state = AppState::new(&config, Arc::new(store.clone()), Arc::new(cache.clone()));
        Self {
            app: api::build_app(state, config.request_timeout),
            store,
            cache,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        into_parts(self.send(Method::GET, uri, None).await).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = self.get(uri).await;
        (status, parse(&bytes))
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let (status, bytes) = into_parts(self.send(Method::POST, uri, Some(body)).await).await;
        (status, parse(&bytes))
    }

    pub async fn patch_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let (status, bytes) = into_parts(self.send(Method::PATCH, uri, Some(body)).await).await;
        (status, parse(&bytes))
    }

    /// Create an order through the API and return its id
    pub async fn create_order(&self, user_id: i64) -> i64 {
        let body = format!(
            r#"{{"user_id":{user_id},"product_id":5,"quantity":2,"total_price":19.98}}"#
        );
        let (status, json) = self.post_json("/api/v1/orders", &body).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["order"]["id"].as_i64().unwrap()
    }
}

pub async fn into_parts(response: Response<Body>) -> (StatusCode, Vec<u8>) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// JSON body, or the plain-text body as a JSON string
pub fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
