#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use reelbase::{
    AppState,
    config::{Config, ErrorMode},
    db,
    store::Store,
};
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_app(error_mode: ErrorMode) -> Router {
    let database_url = "sqlite::memory:".to_string();
    let db = db::connect_and_migrate(&database_url)
        .await
        .expect("Failed to setup test database");
    let config = Config { addr: "127.0.0.1:0".parse().unwrap(), database_url, error_mode };
    reelbase::app(Arc::new(AppState { config: Arc::new(config), store: Store::new(db) }))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn location(&self) -> &str {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok()).unwrap_or_default()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, headers, body }
}

/// POSTs `body` to `collection` and returns the path of the created item.
pub async fn create(app: &Router, collection: &str, body: Value) -> String {
    let resp = send(app, "POST", collection, Some(body)).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.body.is_empty());
    resp.location().to_string()
}
