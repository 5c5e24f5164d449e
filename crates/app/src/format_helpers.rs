//! Shared formatting utilities for the UI layer.
//!
//! Report timestamps arrive in UTC and are shown in Bogotá time (UTC−5, no
//! daylight saving).

use chrono::{DateTime, FixedOffset, Utc};

const BOGOTA_OFFSET_SECS: i32 = 5 * 3600;

fn bogota() -> Option<FixedOffset> {
    FixedOffset::west_opt(BOGOTA_OFFSET_SECS)
}

/// Format a UTC timestamp as "Jan 20, 2026 4:35 PM" in Bogotá time.
pub fn format_datetime_bogota(at: &DateTime<Utc>) -> String {
    match bogota() {
        Some(offset) => at.with_timezone(&offset).format("%b %-d, %Y %-I:%M %p").to_string(),
        None => at.format("%b %-d, %Y %-I:%M %p UTC").to_string(),
    }
}

/// Like [`format_datetime_bogota`], with an em dash for a missing value.
pub fn format_optional_datetime(at: Option<&DateTime<Utc>>) -> String {
    at.map(format_datetime_bogota)
        .unwrap_or_else(|| "—".to_string())
}
