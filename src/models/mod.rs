// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Data models for the application.

pub mod post;
pub mod user;

pub use post::{Category, NewPost, Post, PostPatch};
pub use user::{Account, UserProfile};
