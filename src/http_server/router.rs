//! # Router / Dispatcher
//!
//! Route table plus the layers every request passes through, outermost
//! first:
//!
//! 1. request tracing (one span per request with a generated id)
//! 2. cross-origin header injection (on every response, faults included)
//! 3. fault guard: a panicking handler becomes a 500 envelope
//! 4. method guard: `OPTIONS` on any path answers an empty 200 right here;
//!    `HEAD` is not routed (axum would otherwise serve it from `GET`)
//! 5. route match, first match wins; anything unmatched is a 404 envelope

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use uuid::Uuid;

use crate::observability::Event;
use crate::store::Connector;

use super::errors::ApiError;
use super::handlers::{
    create_todo, delete_todo, describe_service, get_todo, list_todos, route_not_found,
    update_todo, TodoState,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Route table without middleware
pub fn todo_routes<C: Connector>(state: Arc<TodoState<C>>) -> Router {
    Router::new()
        .route("/", get(describe_service).fallback(route_not_found))
        .route(
            "/todos",
            get(list_todos::<C>)
                .post(create_todo::<C>)
                .fallback(route_not_found),
        )
        .route(
            "/todos/:id",
            get(get_todo::<C>)
                .put(update_todo::<C>)
                .delete(delete_todo::<C>)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .with_state(state)
}

/// Route table wrapped in the full middleware stack
pub fn build_router<C: Connector>(state: Arc<TodoState<C>>) -> Router {
    todo_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ))
            .layer(CatchPanicLayer::custom(fault_response))
            .layer(middleware::from_fn(method_guard)),
    )
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Answer preflight and unrouted methods before the route table
async fn method_guard(request: Request, next: Next) -> Response {
    match *request.method() {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::HEAD => ApiError::RouteNotFound.into_response(),
        _ => next.run(request).await,
    }
}

/// Top-level guard: turn an escaped fault into a 500 envelope
fn fault_response(fault: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = fault.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = fault.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    tracing::error!(event = %Event::RequestFault, error = %message, "handler fault");
    ApiError::Internal(message).into_response()
}
