// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Post workflow tests: the nickname gate, the ownership gate, and the
//! immutability of author fields, driven end-to-end through the router.

use axum::http::StatusCode;
use mfblog::db::BlogStore;

mod common;
use common::{create_test_app, read_json, send_json, signup};

fn draft(title: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "content": content,
        "category": "Daily",
    })
}

#[tokio::test]
async fn test_create_without_profile_hits_nickname_gate() {
    let (app, _state, store) = create_test_app();
    let (_uid, token) = signup(&app, "u1@example.com", "password123", None).await;

    let response = send_json(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(draft("Hello", "World")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["error"], "nickname_required");

    // The gate fires before the repository: nothing was persisted.
    assert_eq!(store.post_count(), 0);
}

#[tokio::test]
async fn test_create_snapshots_nickname_and_computes_excerpt() {
    let (app, _state, _store) = create_test_app();
    let (uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let response = send_json(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(draft("Hello", "World")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let post = read_json(response).await;
    assert_eq!(post["author"], "Sion");
    assert_eq!(post["author_id"], uid);
    assert_eq!(post["excerpt"], "World");
    assert_eq!(post["category"], "Daily");
    assert!(post["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(post["created_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_excerpt_is_first_150_chars_of_trimmed_content() {
    let (app, _state, _store) = create_test_app();
    let (_uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let content = format!("  {}  ", "x".repeat(400));
    let response = send_json(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(draft("Long", &content)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let post = read_json(response).await;
    assert_eq!(post["excerpt"], "x".repeat(150));
}

#[tokio::test]
async fn test_update_by_non_author_is_forbidden() {
    let (app, _state, store) = create_test_app();
    let (_u1, token1) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;
    let (_u2, token2) = signup(&app, "u2@example.com", "password123", Some("Mallory")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token1),
            Some(draft("Hello", "World")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = send_json(
        &app,
        "PUT",
        &format!("/api/posts/{}", id),
        Some(&token2),
        Some(serde_json::json!({"title": "Hijacked"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["error"], "forbidden");

    // Stored post is unchanged.
    let stored = store.get_post(id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Hello");
}

#[tokio::test]
async fn test_delete_by_non_author_is_forbidden() {
    let (app, _state, store) = create_test_app();
    let (_u1, token1) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;
    let (_u2, token2) = signup(&app, "u2@example.com", "password123", Some("Mallory")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token1),
            Some(draft("Hello", "World")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = send_json(
        &app,
        "DELETE",
        &format!("/api/posts/{}", id),
        Some(&token2),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.post_count(), 1);
}

#[tokio::test]
async fn test_update_cannot_change_author_fields() {
    let (app, _state, _store) = create_test_app();
    let (uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token),
            Some(draft("Hello", "World")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    let created_at = created["created_at"].as_str().unwrap().to_string();

    // The patch includes author fields; they are not part of the patch
    // schema and must be ignored.
    let response = send_json(
        &app,
        "PUT",
        &format!("/api/posts/{}", id),
        Some(&token),
        Some(serde_json::json!({
            "title": "Hello again",
            "author_id": "someone-else",
            "author": "Mallory",
            "created_at": "1970-01-01T00:00:00Z",
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["title"], "Hello again");
    assert_eq!(updated["author_id"], uid);
    assert_eq!(updated["author"], "Sion");
    assert_eq!(updated["created_at"], created_at);
    assert!(updated["updated_at"].as_str().is_some());
}

#[tokio::test]
async fn test_update_recomputes_excerpt_only_when_content_changes() {
    let (app, _state, _store) = create_test_app();
    let (_uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token),
            Some(draft("Hello", "original content")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    // Title-only edit leaves the excerpt alone.
    let updated = read_json(
        send_json(
            &app,
            "PUT",
            &format!("/api/posts/{}", id),
            Some(&token),
            Some(serde_json::json!({"title": "New title"})),
        )
        .await,
    )
    .await;
    assert_eq!(updated["excerpt"], "original content");

    // Content edit recomputes it.
    let updated = read_json(
        send_json(
            &app,
            "PUT",
            &format!("/api/posts/{}", id),
            Some(&token),
            Some(serde_json::json!({"content": "rewritten content"})),
        )
        .await,
    )
    .await;
    assert_eq!(updated["excerpt"], "rewritten content");
}

#[tokio::test]
async fn test_nickname_rename_does_not_touch_old_posts() {
    let (app, _state, _store) = create_test_app();
    let (_uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token),
            Some(draft("Hello", "World")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = send_json(
        &app,
        "PUT",
        "/api/me/nickname",
        Some(&token),
        Some(serde_json::json!({"nickname": "NewSion"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old post keeps the snapshot; a new post carries the new name.
    let old = read_json(send_json(&app, "GET", &format!("/api/posts/{}", id), None, None).await).await;
    assert_eq!(old["author"], "Sion");

    let new = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token),
            Some(draft("Second", "Post")),
        )
        .await,
    )
    .await;
    assert_eq!(new["author"], "NewSion");
}

#[tokio::test]
async fn test_delete_removes_post() {
    let (app, _state, store) = create_test_app();
    let (_uid, token) = signup(&app, "u1@example.com", "password123", Some("Sion")).await;

    let created = read_json(
        send_json(
            &app,
            "POST",
            "/api/posts",
            Some(&token),
            Some(draft("Hello", "World")),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = send_json(&app, "DELETE", &format!("/api/posts/{}", id), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body.get("warning").is_none());

    assert_eq!(store.post_count(), 0);

    let response = send_json(&app, "GET", &format!("/api/posts/{}", id), None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
