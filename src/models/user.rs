// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! User profile and account models for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// A profile exists for a uid if and only if that user has completed
/// nickname setup; its absence is what triggers the nickname gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account uid (also used as document ID)
    pub uid: String,
    /// Unique display name shown on posts
    pub nickname: String,
    /// Email address, copied from the account at setup time
    pub email: String,
    /// When nickname setup was first completed
    pub created_at: String,
    /// Last profile change
    pub updated_at: Option<String>,
}

/// Login credentials stored in Firestore, separate from the profile.
///
/// Kept in its own collection so credential documents never travel with
/// profile reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// v4 UUID minted at signup (also used as document ID)
    pub uid: String,
    /// Normalized (trimmed, lowercased) email address
    pub email: String,
    /// Argon2 PHC-format hash
    pub password_hash: String,
    pub created_at: String,
}
