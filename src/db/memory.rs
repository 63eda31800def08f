// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! In-memory [`BlogStore`] for tests and offline development.
//!
//! Mirrors the Firestore backend's observable behavior: upserts replace
//! whole documents, lookups by absent id return `None`, and listing sorts
//! by `created_at` descending with ties left in map order.

use crate::db::BlogStore;
use crate::error::AppError;
use crate::models::{Account, Category, Post, UserProfile};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Process-local document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    profiles: Arc<DashMap<String, UserProfile>>,
    accounts: Arc<DashMap<String, Account>>,
    posts: Arc<DashMap<String, Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts. Test helper.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    // ─── Profiles ────────────────────────────────────────────────

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.get(uid).map(|p| p.clone()))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        self.profiles.insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    async fn find_profile_by_nickname(
        &self,
        nickname: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        Ok(self
            .profiles
            .iter()
            .find(|entry| entry.value().nickname == nickname)
            .map(|entry| entry.value().clone()))
    }

    // ─── Accounts ────────────────────────────────────────────────

    async fn get_account(&self, uid: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.get(uid).map(|a| a.clone()))
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_account(&self, account: &Account) -> Result<(), AppError> {
        self.accounts.insert(account.uid.clone(), account.clone());
        Ok(())
    }

    // ─── Posts ───────────────────────────────────────────────────

    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts.get(id).map(|p| p.clone()))
    }

    async fn upsert_post(&self, post: &Post) -> Result<(), AppError> {
        self.posts.insert(post.id.clone(), post.clone());
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        self.posts.remove(id);
        Ok(())
    }

    async fn list_posts(&self, category: Option<Category>) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| category.is_none_or(|c| entry.value().category == c))
            .map(|entry| entry.value().clone())
            .collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}
