// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Profile routes for the authenticated user.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Profile routes (auth required; the middleware is applied in
/// routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/nickname", put(set_nickname))
}

/// Current user response.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub uid: String,
    pub nickname: String,
    pub email: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<crate::models::UserProfile> for ProfileResponse {
    fn from(profile: crate::models::UserProfile) -> Self {
        Self {
            uid: profile.uid,
            nickname: profile.nickname,
            email: profile.email,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Get the current user's profile.
///
/// 404 until nickname setup is complete; the frontend treats that as the
/// signal to show the setup page.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .profiles
        .get(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not set up".to_string()))?;

    Ok(Json(profile.into()))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetNicknameRequest {
    #[validate(length(min = 1, max = 30))]
    pub nickname: String,
}

/// Set or replace the current user's nickname.
///
/// Existing posts keep the nickname they were created under; only future
/// posts carry the new one.
async fn set_nickname(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SetNicknameRequest>,
) -> Result<Json<ProfileResponse>> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // The profile snapshots the account email at setup time.
    let account = state
        .db
        .get_account(&user.uid)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let profile = state
        .profiles
        .set_nickname(&user.uid, &account.email, &req.nickname)
        .await?;

    Ok(Json(profile.into()))
}
