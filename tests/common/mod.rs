// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use mfblog::config::Config;
use mfblog::db::MemoryStore;
use mfblog::routes::create_router;
use mfblog::storage::ImageStore;
use mfblog::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if the Firestore emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// The in-memory store used by the test app, for direct seeding/asserts.
#[allow(dead_code)]
pub fn test_store() -> MemoryStore {
    MemoryStore::new()
}

/// Create a test app over in-memory backends.
/// Returns the router, the shared state, and the store for direct access.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    let config = Config::test_default();
    let store = MemoryStore::new();
    let images = ImageStore::in_memory();

    let state = Arc::new(AppState::new(config, Arc::new(store.clone()), images));

    (create_router(state.clone()), state, store)
}

/// Create a session token directly, bypassing the signup route.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    mfblog::middleware::auth::create_jwt(uid, signing_key).expect("JWT creation failed")
}

/// Drive the signup route and return (uid, token).
#[allow(dead_code)]
pub async fn signup(
    app: &axum::Router,
    email: &str,
    password: &str,
    nickname: Option<&str>,
) -> (String, String) {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "nickname": nickname,
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signup")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "signup should succeed");

    let body = read_json(response).await;
    (
        body["uid"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Send an authenticated JSON request and return the response.
#[allow(dead_code)]
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
