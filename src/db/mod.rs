// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Database layer.
//!
//! [`BlogStore`] is the persistence contract; [`FirestoreDb`] backs it in
//! production and [`MemoryStore`] backs it in tests and offline
//! development. The stores are thin: ownership checks, nickname gating,
//! and field stamping all live in the service layer.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Account, Category, Post, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACCOUNTS: &str = "accounts";
    pub const POSTS: &str = "posts";
}

/// Persistence contract for profiles, accounts, and posts.
#[async_trait]
pub trait BlogStore: Send + Sync {
    // ─── Profiles ────────────────────────────────────────────────

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), AppError>;

    /// Equality lookup used for nickname uniqueness checks.
    async fn find_profile_by_nickname(
        &self,
        nickname: &str,
    ) -> Result<Option<UserProfile>, AppError>;

    // ─── Accounts ────────────────────────────────────────────────

    async fn get_account(&self, uid: &str) -> Result<Option<Account>, AppError>;

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    async fn upsert_account(&self, account: &Account) -> Result<(), AppError>;

    // ─── Posts ───────────────────────────────────────────────────

    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError>;

    /// Insert or replace a whole post document. Partial updates are done
    /// by fetch-modify-write in the service layer, which is what keeps the
    /// immutable fields immutable.
    async fn upsert_post(&self, post: &Post) -> Result<(), AppError>;

    async fn delete_post(&self, id: &str) -> Result<(), AppError>;

    /// List posts, newest first. `category` is an exact-equality filter;
    /// `None` returns everything.
    async fn list_posts(&self, category: Option<Category>) -> Result<Vec<Post>, AppError>;
}
