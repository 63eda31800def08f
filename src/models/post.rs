// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Post model and the fixed category set.

use serde::{Deserialize, Serialize};

/// Maximum excerpt length in characters.
pub const EXCERPT_MAX_CHARS: usize = 150;

/// The closed set of post categories.
///
/// Shared between validation and serialization: any value outside this set
/// is rejected at the serde boundary, so handlers never see a stray string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Daily,
    Game,
    Hobby,
    Project,
}

impl Category {
    /// All categories, in sidebar order.
    pub const ALL: [Category; 4] = [
        Category::Daily,
        Category::Game,
        Category::Hobby,
        Category::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Daily => "Daily",
            Category::Game => "Game",
            Category::Hobby => "Hobby",
            Category::Project => "Project",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// A blog post stored in Firestore.
///
/// `author` is a snapshot of the author's nickname at creation time and is
/// never back-filled when the user renames. `author_id` and `created_at`
/// are likewise immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Document ID (v4 UUID assigned at creation)
    pub id: String,
    pub title: String,
    /// Markdown body
    pub content: String,
    /// First 150 characters of the trimmed content
    pub excerpt: String,
    pub category: Category,
    /// Public URL of the cover image, if one was uploaded
    pub image_url: Option<String>,
    /// Nickname snapshot at creation time
    pub author: String,
    /// Account uid of the creator
    pub author_id: String,
    /// RFC3339, set once at creation
    pub created_at: String,
    /// RFC3339, stamped on every mutation
    pub updated_at: Option<String>,
}

/// Draft fields for creating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Category,
    /// URL previously returned by the image upload endpoint
    pub image_url: Option<String>,
}

/// Partial fields for editing a post. Absent fields stay unchanged.
///
/// Deliberately carries no `author`, `author_id`, `id`, or `created_at` so
/// those fields cannot change through an update, whatever the client sends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
}

/// Compute a post excerpt: the first 150 characters of the trimmed content.
///
/// Counted in characters, not bytes, so multibyte text never splits.
pub fn excerpt_of(content: &str) -> String {
    content.trim().chars().take(EXCERPT_MAX_CHARS).collect()
}
