// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Email/password authentication routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::Account;
use crate::time_utils;
use crate::AppState;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Optional: completes nickname setup in the same call
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session response returned by signup and login.
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub uid: String,
    pub email: String,
    /// Present once nickname setup is complete
    pub nickname: Option<String>,
}

/// Create an account, optionally set the nickname, start a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let email = req.email.trim().to_lowercase();

    if state.db.get_account_by_email(&email).await?.is_some() {
        return Err(AppError::Validation(
            "email is already registered".to_string(),
        ));
    }

    let account = Account {
        uid: uuid::Uuid::new_v4().to_string(),
        email: email.clone(),
        password_hash: hash_password(&req.password)?,
        created_at: time_utils::now_rfc3339(),
    };
    state.db.upsert_account(&account).await?;

    tracing::info!(uid = %account.uid, "Account created");

    // The signup form collects a nickname too; setting it here saves the
    // redirect through the setup page. Users who skip it hit the nickname
    // gate on their first post instead.
    let nickname = match req.nickname.as_deref() {
        Some(nickname) => Some(
            state
                .profiles
                .set_nickname(&account.uid, &email, nickname)
                .await?
                .nickname,
        ),
        None => None,
    };

    let token = create_jwt(&account.uid, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let response = SessionResponse {
        token: token.clone(),
        uid: account.uid,
        email,
        nickname,
    };

    Ok((jar.add(session_cookie(token)), Json(response)))
}

/// Verify credentials and start a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let email = req.email.trim().to_lowercase();

    // A missing account and a wrong password report identically, so the
    // endpoint cannot be used to probe which emails are registered.
    let account = state
        .db
        .get_account_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &account.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let nickname = state
        .profiles
        .get(&account.uid)
        .await?
        .map(|p| p.nickname);

    let token = create_jwt(&account.uid, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(uid = %account.uid, "Login successful");

    let response = SessionResponse {
        token: token.clone(),
        uid: account.uid,
        email,
        nickname,
    };

    Ok((jar.add(session_cookie(token)), Json(response)))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// End the session by expiring the cookie. Bearer-token clients just drop
/// their copy; the token itself stays valid until `exp`.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build();

    (jar.add(removal), Json(LogoutResponse { success: true }))
}

/// Session cookie with attributes matching the removal cookie in `logout`.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(30))
        .build()
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
