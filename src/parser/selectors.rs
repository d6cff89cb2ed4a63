//! CSS selectors and text patterns for press-release detail pages
//!
//! Newsroom markup varies between site revisions, so every field is
//! resolved through an ordered list of candidate selectors with the most
//! specific first. Adding a new fallback is a data change here, not a
//! logic change in the extractor.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Selector;

// Helper macro to parse selectors safely at startup
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Title candidates, most specific heading shapes first
    static ref TITLE: Vec<Selector> = vec![
        parse_selector!("h1"),
        parse_selector!("h2.entry-title"),
        parse_selector!(".entry-title"),
        parse_selector!("article h1"),
        parse_selector!("article h2"),
    ];

    // Paragraph scopes scanned for a usable description
    static ref DESCRIPTION: Vec<Selector> = vec![
        parse_selector!("article p"),
        parse_selector!(".entry-content p"),
        parse_selector!("main p"),
        parse_selector!(".content p"),
    ];

    // Machine-readable publication timestamp
    static ref TIME: Selector = parse_selector!("time");

    // Textual date patterns scanned over the full page text, in priority order
    static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}"
        ).expect("invalid date pattern"),
        Regex::new(
            r"\d{1,2}\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{4}"
        ).expect("invalid date pattern"),
        Regex::new(r"\d{4}-\d{2}-\d{2}").expect("invalid date pattern"),
    ];
}

/// Selector tables used by the field extractor
pub struct RecordSelectors {
    pub title: Vec<Selector>,
    pub description: Vec<Selector>,
    pub time: Selector,
}

impl RecordSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: TITLE.clone(),
            description: DESCRIPTION.clone(),
            time: TIME.clone(),
        }
    }
}

impl Default for RecordSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Textual date patterns in priority order
#[must_use]
pub fn date_patterns() -> &'static [Regex] {
    &DATE_PATTERNS
}
