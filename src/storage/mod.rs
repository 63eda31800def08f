// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Object storage for cover images.
//!
//! Wraps an [`object_store::ObjectStore`] (GCS in production, in-memory in
//! tests) behind key generation and public-URL mapping. The store itself is
//! a pass-through: no resizing or transcoding happens here.

use crate::error::AppError;
use crate::time_utils;
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;

/// Image storage client.
#[derive(Clone)]
pub struct ImageStore {
    store: Arc<dyn ObjectStore>,
    /// URL prefix under which stored objects are publicly reachable
    public_base: String,
}

impl ImageStore {
    /// Connect to a GCS bucket. Credentials come from the environment
    /// (service account on Cloud Run, `GOOGLE_APPLICATION_CREDENTIALS`
    /// locally).
    pub fn gcs(bucket: &str) -> Result<Self, AppError> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| AppError::Storage(format!("Failed to open GCS bucket: {}", e)))?;

        tracing::info!(bucket, "Connected to GCS");

        Ok(Self {
            store: Arc::new(store),
            public_base: format!("https://storage.googleapis.com/{}", bucket),
        })
    }

    /// In-memory store for tests and offline development.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            public_base: "memory://images".to_string(),
        }
    }

    /// Store image bytes and return the durable public URL.
    ///
    /// The key combines the uploader's uid, the current time in millis, and
    /// the (sanitized) client file name, so concurrent uploads by different
    /// users never collide.
    pub async fn upload(
        &self,
        data: Bytes,
        suggested_name: &str,
        uid: &str,
    ) -> Result<String, AppError> {
        let key = upload_key(uid, suggested_name, time_utils::now_millis());
        let location = Path::from(key.clone());

        self.store
            .put(&location, data.into())
            .await
            .map_err(|e| AppError::Storage(format!("Image upload failed: {}", e)))?;

        Ok(format!("{}/{}", self.public_base, key))
    }

    /// Delete an object by its public URL.
    ///
    /// URLs that were not produced by this store are skipped with a
    /// warning rather than treated as failures; actual transport errors
    /// are returned so the caller can decide how loudly to surface them.
    pub async fn remove(&self, url: &str) -> Result<(), AppError> {
        let prefix = format!("{}/", self.public_base);
        let Some(key) = url.strip_prefix(&prefix) else {
            tracing::warn!(url, "Image URL does not belong to this bucket, skipping delete");
            return Ok(());
        };

        self.store
            .delete(&Path::from(key))
            .await
            .map_err(|e| AppError::Storage(format!("Image delete failed: {}", e)))
    }
}

/// Build a collision-resistant storage key: `posts/{uid}_{millis}_{name}`.
fn upload_key(uid: &str, suggested_name: &str, millis: i64) -> String {
    let name: String = suggested_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("posts/{}_{}_{}", uid, millis, name)
}
