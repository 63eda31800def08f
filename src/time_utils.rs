// SPDX-License-Identifier: MIT
// Copyright 2026 Sion Kang <sion@mfblog.dev>

//! Shared helpers for timestamp formatting.
//!
//! All stored timestamps use RFC3339 UTC with a `Z` suffix at second
//! precision. The fixed width keeps Firestore's lexicographic string
//! ordering identical to chronological ordering.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current time, formatted for storage.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Milliseconds since the Unix epoch, used in storage key generation.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_is_fixed_width_utc() {
        let date = Utc.with_ymd_and_hms(2026, 3, 9, 7, 5, 3).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2026-03-09T07:05:03Z");
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert!(format_utc_rfc3339(earlier) < format_utc_rfc3339(later));
    }
}
