// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Post routes: public reads, authenticated mutations, image upload.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Category, NewPost, Post, PostPatch};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Public routes (no auth required).
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/{id}", get(get_post))
}

/// Mutation routes (auth required; the middleware is applied in
/// routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", post(create_post))
        .route("/api/posts/{id}", put(update_post).delete(delete_post))
        .route("/api/posts/images", post(upload_image))
}

// ─── Reading ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Category filter. Empty or absent returns all posts.
    category: Option<String>,
}

/// List posts, newest first.
async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>> {
    let category = match query.category.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            Category::from_str(raw)
                .map_err(|_| AppError::Validation(format!("unknown category: {}", raw)))?,
        ),
    };

    let posts = state.posts.list(category).await?;
    Ok(Json(posts))
}

/// Get a single post.
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>> {
    Ok(Json(state.posts.get(&id).await?))
}

// ─── Writing ─────────────────────────────────────────────────

/// Create a post through the workflow.
async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<NewPost>,
) -> Result<Json<Post>> {
    let post = state.posts.create(&user.uid, draft).await?;
    Ok(Json(post))
}

/// Edit a post through the workflow.
async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>> {
    let post = state.posts.update(&user.uid, &id, patch).await?;
    Ok(Json(post))
}

/// Response for post deletion.
#[derive(Serialize)]
pub struct DeletePostResponse {
    pub success: bool,
    /// Set when the record was deleted but the cover image could not be
    /// removed from storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Delete a post through the workflow.
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletePostResponse>> {
    let outcome = state.posts.delete(&user.uid, &id).await?;

    Ok(Json(DeletePostResponse {
        success: true,
        warning: outcome
            .image_cleanup_failed
            .then(|| "image_cleanup_failed".to_string()),
    }))
}

// ─── Images ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UploadImageResponse {
    pub url: String,
}

/// Upload a cover image; returns its durable public URL.
///
/// Takes the first file field of the multipart body. Retry policy is the
/// client's call; nothing is retried here.
async fn upload_image(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {}", e)))?
    {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let mime = mime_guess::from_path(&name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(AppError::Validation(format!(
                "only image uploads are accepted, got {}",
                mime
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {}", e)))?;
        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let url = state.images.upload(data, &name, &user.uid).await?;
        return Ok(Json(UploadImageResponse { url }));
    }

    Err(AppError::Validation(
        "multipart body contains no file".to_string(),
    ))
}
