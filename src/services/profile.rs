// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Profile management: nickname setup and lookup.

use crate::db::BlogStore;
use crate::error::AppError;
use crate::models::UserProfile;
use crate::time_utils;
use std::sync::Arc;

/// Maps an account uid to its display profile.
#[derive(Clone)]
pub struct ProfileService {
    db: Arc<dyn BlogStore>,
}

impl ProfileService {
    pub fn new(db: Arc<dyn BlogStore>) -> Self {
        Self { db }
    }

    pub async fn get(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.db.get_profile(uid).await
    }

    /// Create or replace the profile for `uid` with the given nickname.
    ///
    /// The nickname is trimmed and must be non-empty and not already held
    /// by another account. `created_at` is stamped on first write only;
    /// later rewrites stamp `updated_at` and keep everything else.
    pub async fn set_nickname(
        &self,
        uid: &str,
        email: &str,
        nickname: &str,
    ) -> Result<UserProfile, AppError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(AppError::Validation(
                "nickname must not be empty".to_string(),
            ));
        }

        // Best-effort uniqueness: Firestore has no unique index, so an
        // equality query before the write is the strongest check available.
        if let Some(existing) = self.db.find_profile_by_nickname(nickname).await? {
            if existing.uid != uid {
                return Err(AppError::Validation(
                    "nickname is already taken".to_string(),
                ));
            }
        }

        let now = time_utils::now_rfc3339();
        let profile = match self.db.get_profile(uid).await? {
            Some(mut profile) => {
                profile.nickname = nickname.to_string();
                profile.updated_at = Some(now);
                profile
            }
            None => UserProfile {
                uid: uid.to_string(),
                nickname: nickname.to_string(),
                email: email.to_string(),
                created_at: now,
                updated_at: None,
            },
        };

        self.db.upsert_profile(&profile).await?;

        tracing::info!(uid = %uid, nickname = %profile.nickname, "Nickname set");
        Ok(profile)
    }
}
