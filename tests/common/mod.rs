// Shared harness: builds the real router over a fresh in-memory store and
// drives it in-process, one request at a time.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use jobtrack_api::app::app;
use jobtrack_api::config::SecurityConfig;
use jobtrack_api::state::AppState;
use jobtrack_api::store::MemStore;

/// Signing secret the test router is built with; tests that mint their own
/// tokens must use the same one.
pub const TEST_SECRET: &str = "test-signing-secret";

pub const TEST_TTL_DAYS: i64 = 15;

/// A router over its own empty store. Every test gets an isolated world.
pub fn test_app() -> Router {
    let security = SecurityConfig {
        token_secret: TEST_SECRET.to_string(),
        token_ttl_days: TEST_TTL_DAYS,
    };

    app(AppState::new(&security, Arc::new(MemStore::new())))
}

/// Sends one request and returns (status, parsed JSON body).
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, body)
}

/// Registers an account and returns (access token, user object from the
/// response).
pub async fn register(app: &Router, full_name: &str, email: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        Method::POST,
        "/create-account",
        None,
        Some(json!({
            "fullName": full_name,
            "email": email,
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    assert_eq!(body["error"], json!(false));

    let token = body["accessToken"]
        .as_str()
        .expect("accessToken in response")
        .to_string();

    (token, body["user"].clone())
}

/// Adds a job for the given token and returns the created job object.
pub async fn add_job(app: &Router, token: &str, fields: Value) -> Value {
    let (status, body) = send(app, Method::POST, "/add-job", Some(token), Some(fields)).await;
    assert_eq!(status, StatusCode::OK, "add-job failed: {body}");

    body["job"].clone()
}
