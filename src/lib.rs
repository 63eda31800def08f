// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! MF Blog: a personal markdown blog backend.
//!
//! This crate provides the API for accounts, nickname-gated authoring,
//! and markdown posts with optional cover images, over Firestore and GCS.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use db::BlogStore;
use services::{PostService, ProfileService};
use std::sync::Arc;
use storage::ImageStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn BlogStore>,
    pub images: ImageStore,
    pub posts: PostService,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire up the services over a store and image storage.
    pub fn new(config: Config, db: Arc<dyn BlogStore>, images: ImageStore) -> Self {
        Self {
            posts: PostService::new(db.clone(), images.clone()),
            profiles: ProfileService::new(db.clone()),
            config,
            db,
            images,
        }
    }
}
