//! Helpers for driving the assembled application router in integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use todo_rest::persistence::in_memory_todo_store::InMemoryTodoStore;
use todo_rest::{SharedData, build_router};
use tower::ServiceExt;

/// Builds the application router with todos kept in memory
pub fn in_memory_app() -> Router {
    build_router(SharedData {
        todo_store: Box::new(InMemoryTodoStore::new()),
    })
}

/// Status code and raw body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parses the body as JSON, failing the test if it isn't
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|err| {
            panic!(
                "Response body was not JSON! Error: {}, Received body: {:?}",
                err,
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}

/// Sends a single request through the router. Pass [None] as the body for requests without one.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("could not build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router failed to respond");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read response body")
        .to_vec();

    TestResponse { status, body }
}
