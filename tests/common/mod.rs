//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use todo_api::http_server::{build_router, TodoState};
use todo_api::store::{Connector, Database, MemoryCollection, MemoryConnector};

pub const COLLECTION: &str = "todos";

/// A well-formed ObjectId that is never inserted
pub const ABSENT_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw: Vec<u8>,
}

pub fn app_with<C: Connector>(connector: C) -> Router {
    build_router(Arc::new(TodoState::new(connector, COLLECTION)))
}

/// Router over a fresh memory store, plus the connector for inspection
pub fn memory_app() -> (Router, MemoryConnector) {
    let connector = MemoryConnector::new();
    (app_with(connector.clone()), connector)
}

pub fn todos(connector: &MemoryConnector) -> MemoryCollection {
    connector.database().collection(COLLECTION)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    let body = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&raw).unwrap()
    };

    Response {
        status,
        headers,
        body,
        raw,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: &str) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: &str) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Create a todo and return its id
pub async fn create(app: &Router, body: &str) -> String {
    let response = post(app, "/todos", body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body["data"]["_id"].as_str().unwrap().to_string()
}

pub fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

pub fn assert_error(response: &Response, status: StatusCode, error: &str) {
    assert_eq!(response.status, status);
    assert_eq!(
        response.body,
        serde_json::json!({"success": false, "error": error})
    );
    assert_cors(&response.headers);
}
