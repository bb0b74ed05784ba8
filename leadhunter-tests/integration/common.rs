//! Shared helpers for driving the router in tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use leadhunter_core::config::SearchConfig;
use leadhunter_core::{InMemoryLeadStore, LeadStore};
use leadhunter_search::LeadSearchAdapter;
use leadhunter_web::{AppState, build_router};
use serde_json::Value;
use tower::ServiceExt;

/// Router with no provider credentials, so every search serves generated data.
pub fn offline_app(store: Arc<dyn LeadStore>, static_dir: Option<&Path>) -> Router {
    let adapter = LeadSearchAdapter::from_config(&SearchConfig::default());
    build_router(AppState::new(Arc::new(adapter), store), static_dir)
}

pub fn memory_app() -> Router {
    offline_app(Arc::new(InMemoryLeadStore::new()), None)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, hyper::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

pub async fn post_json(app: Router, uri: &str, body: impl Into<Body>) -> (StatusCode, hyper::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}
