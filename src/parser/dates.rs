//! Free-text date normalization
//!
//! Press pages spell dates in several layouts. This module tries a fixed
//! ordered list of known layouts and reformats the first one that parses
//! the whole trimmed input into canonical `YYYY-MM-DD` form. Text that
//! matches no layout passes through unchanged so callers can still show
//! it; consumers must tolerate non-canonical date strings.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // January 15, 2025
    "%B %d %Y",  // January 15 2025
    "%d %B %Y",  // 15 January 2025
    "%Y-%m-%d",  // 2025-01-15
    "%b %d, %Y", // Jan 15, 2025
];

/// Datetime layouts, tried after the date-only layouts
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",  // ISO datetime
    "%Y-%m-%dT%H:%M:%SZ", // ISO datetime with zone marker
];

/// Normalize a free-text date fragment to `YYYY-MM-DD`
///
/// Returns the empty string for empty input, the canonical form when one
/// of the known layouts matches, and the trimmed input unchanged otherwise.
///
/// # Examples
///
/// ```
/// use presswatch::parser::dates::normalize;
///
/// assert_eq!(normalize("January 5, 2024"), "2024-01-05");
/// assert_eq!(normalize("5 January 2024"), "2024-01-05");
/// assert_eq!(normalize("not a date"), "not a date");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }

    trimmed.to_string()
}
