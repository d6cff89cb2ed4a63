// Core data structures for the presswatch scanner

use serde::{Deserialize, Serialize};

/// A fetched document: raw markup plus the URL it was fetched from
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub html: String,
}

impl RawPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// A press release extracted from a single detail page
///
/// The link doubles as the record's primary key. Title is never empty
/// (a slug-derived fallback fills it when the markup has no usable
/// heading), date is either canonical `YYYY-MM-DD` or whatever text the
/// page offered, and description is capped at 300 characters.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PressRecord {
    pub link: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub category: String,
}

/// A press record annotated with reconciliation results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciledRecord {
    #[serde(flatten)]
    pub record: PressRecord,

    /// Not present in the previously known identifier set
    pub is_new: bool,

    /// Date used for ordering, or the undated sentinel
    pub sort_key: String,
}

/// A detail page that was discovered but could not be extracted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedItem {
    pub url: String,
    pub reason: String,
}

/// Outcome summary for one scan run
///
/// A run always terminates with a report, even when discovery came up
/// empty or individual detail pages were skipped.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Records produced by extraction
    pub total_records: usize,

    /// Records not present in the known identifier set
    pub new_records: usize,

    /// Listing pages actually fetched during discovery
    pub pages_visited: u32,

    /// Detail pages skipped with the reason for each
    pub skipped: Vec<SkippedItem>,
}
