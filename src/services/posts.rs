// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! The post workflow.
//!
//! Every create/edit/delete funnels through here: the nickname gate, input
//! validation, the ownership check, excerpt computation, and best-effort
//! image cleanup are all decided in this one place. Handlers stay thin and
//! the stores stay dumb.

use crate::db::BlogStore;
use crate::error::AppError;
use crate::models::post::excerpt_of;
use crate::models::{Category, NewPost, Post, PostPatch, UserProfile};
use crate::storage::ImageStore;
use crate::time_utils;
use std::sync::Arc;

/// True iff `uid` is the recorded author of `post`.
///
/// The ownership gate. Pure; callers decide what denial means.
pub fn can_mutate(post: &Post, uid: &str) -> bool {
    post.author_id == uid
}

/// Outcome of a delete, carrying the cleanup warning when the post record
/// was removed but its image could not be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub image_cleanup_failed: bool,
}

/// Orchestrates post creation, editing, and deletion.
#[derive(Clone)]
pub struct PostService {
    db: Arc<dyn BlogStore>,
    images: ImageStore,
}

impl PostService {
    pub fn new(db: Arc<dyn BlogStore>, images: ImageStore) -> Self {
        Self { db, images }
    }

    /// Create a post for `uid`.
    ///
    /// The nickname gate runs before anything is persisted; the returned
    /// post is the stored record, with the id and timestamps assigned
    /// here rather than echoed from the input.
    pub async fn create(&self, uid: &str, draft: NewPost) -> Result<Post, AppError> {
        let profile = self.nickname_gate(uid).await?;

        let title = draft.title.trim();
        let content = draft.content.trim();
        validate_required(title, content)?;

        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: content.to_string(),
            excerpt: excerpt_of(&draft.content),
            category: draft.category,
            image_url: draft.image_url,
            author: profile.nickname,
            author_id: uid.to_string(),
            created_at: time_utils::now_rfc3339(),
            updated_at: None,
        };

        self.db.upsert_post(&post).await?;

        tracing::info!(post_id = %post.id, author_id = %uid, "Post created");
        Ok(post)
    }

    /// Apply a partial edit to a post owned by `uid`.
    ///
    /// The patch carries no author/id/created_at fields and the merge is
    /// fetch-modify-write, so those stay exactly as created. The excerpt
    /// is recomputed only when the content changes.
    pub async fn update(&self, uid: &str, id: &str, patch: PostPatch) -> Result<Post, AppError> {
        self.nickname_gate(uid).await?;

        let mut post = self.get(id).await?;
        if !can_mutate(&post, uid) {
            return Err(AppError::Forbidden(
                "only the author may edit this post".to_string(),
            ));
        }

        if let Some(title) = &patch.title {
            post.title = title.trim().to_string();
        }
        if let Some(content) = &patch.content {
            post.content = content.trim().to_string();
            post.excerpt = excerpt_of(content);
        }
        validate_required(&post.title, &post.content)?;

        if let Some(category) = patch.category {
            post.category = category;
        }
        if let Some(image_url) = patch.image_url {
            post.image_url = Some(image_url);
        }
        post.updated_at = Some(time_utils::now_rfc3339());

        self.db.upsert_post(&post).await?;

        tracing::info!(post_id = %id, author_id = %uid, "Post updated");
        Ok(post)
    }

    /// Delete a post owned by `uid`.
    ///
    /// The record goes first; image cleanup is best-effort afterwards. A
    /// cleanup failure never rolls back or fails the delete, it only
    /// surfaces in the outcome.
    pub async fn delete(&self, uid: &str, id: &str) -> Result<DeleteOutcome, AppError> {
        let post = self.get(id).await?;
        if !can_mutate(&post, uid) {
            return Err(AppError::Forbidden(
                "only the author may delete this post".to_string(),
            ));
        }

        self.db.delete_post(id).await?;
        tracing::info!(post_id = %id, author_id = %uid, "Post deleted");

        let mut image_cleanup_failed = false;
        if let Some(url) = &post.image_url {
            if let Err(e) = self.images.remove(url).await {
                tracing::warn!(post_id = %id, error = %e, "Post deleted but image cleanup failed");
                image_cleanup_failed = true;
            }
        }

        Ok(DeleteOutcome {
            image_cleanup_failed,
        })
    }

    /// List posts, newest first, optionally filtered by category.
    pub async fn list(&self, category: Option<Category>) -> Result<Vec<Post>, AppError> {
        self.db.list_posts(category).await
    }

    /// Fetch a post or return `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Post, AppError> {
        self.db
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", id)))
    }

    /// The nickname gate: authoring requires a profile with a non-empty
    /// nickname. Absence of a profile is the canonical "not set up" signal.
    async fn nickname_gate(&self, uid: &str) -> Result<UserProfile, AppError> {
        match self.db.get_profile(uid).await? {
            Some(profile) if !profile.nickname.trim().is_empty() => Ok(profile),
            _ => Err(AppError::NicknameRequired),
        }
    }
}

fn validate_required(title: &str, content: &str) -> Result<(), AppError> {
    if title.is_empty() || content.is_empty() {
        return Err(AppError::Validation(
            "title and content must not be empty".to_string(),
        ));
    }
    Ok(())
}
