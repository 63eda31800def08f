// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Services module - business logic layer.

pub mod posts;
pub mod profile;

pub use posts::{can_mutate, DeleteOutcome, PostService};
pub use profile::ProfileService;
