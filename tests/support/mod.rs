//! Shared helpers: an in-process router over [`MemoryStore`] and a tiny
//! request driver.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use catalog::store::MemoryStore;
use catalog::{Router, routes};
use serde_json::Value;

pub type App = Router<Arc<MemoryStore>>;

pub fn app() -> (Arc<MemoryStore>, App) {
    let store = Arc::new(MemoryStore::new());
    let router = routes::router(Arc::clone(&store)).cors(true);
    (store, router)
}

/// Sends one request and returns the status and the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &App, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
    let body = body.map(|b| Bytes::from(b.to_string())).unwrap_or_default();
    let req = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .expect("valid request");

    let res = app.dispatch(req).await;
    let json = if res.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(res.body()).expect("JSON response body")
    };
    (res.status_code(), json)
}

pub async fn create_category(app: &App, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/categories", Some(serde_json::json!({ "name": name }))).await;
    assert_eq!(status, 200, "create category failed: {body}");
    body["id"].as_i64().expect("category id")
}

pub async fn create_product(app: &App, name: &str, category_id: i64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(serde_json::json!({ "name": name, "category_id": category_id })),
    )
    .await;
    assert_eq!(status, 200, "create product failed: {body}");
    body["id"].as_i64().expect("product id")
}
