//! Press-release field extraction with ordered fallbacks
//!
//! Each field is resolved independently by walking a prioritized list of
//! candidate sources until one matches. A field with no match takes its
//! documented default; extraction never fails on gaps in the markup.

use scraper::{ElementRef, Html};

use crate::models::{PressRecord, RawPage};
use crate::parser::dates;
use crate::parser::selectors::{date_patterns, RecordSelectors};

/// Category label applied to every record
pub const DEFAULT_CATEGORY: &str = "Press Release";

/// Paragraphs shorter than this are treated as boilerplate, not descriptions
const MIN_DESCRIPTION_LEN: usize = 50;

/// Descriptions longer than this are truncated with an ellipsis
const MAX_DESCRIPTION_LEN: usize = 300;

/// Detail-page field extractor
///
/// Pure over its input: the same markup and URL always produce the same
/// record, and nothing outside the returned value is touched.
pub struct FieldExtractor {
    selectors: RecordSelectors,
}

impl FieldExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: RecordSelectors::new(),
        }
    }

    /// Extract a press record from a fetched detail page
    ///
    /// # Examples
    ///
    /// ```
    /// use presswatch::models::RawPage;
    /// use presswatch::parser::FieldExtractor;
    ///
    /// let page = RawPage::new(
    ///     "https://example.com/newsroom/series-b",
    ///     "<html><body><h1>Series B Raised</h1></body></html>",
    /// );
    /// let record = FieldExtractor::new().extract(&page);
    /// assert_eq!(record.title, "Series B Raised");
    /// ```
    #[must_use]
    pub fn extract(&self, page: &RawPage) -> PressRecord {
        let document = Html::parse_document(&page.html);

        let title = self
            .extract_title(&document)
            .unwrap_or_else(|| title_from_slug(&page.url));
        let date = self.extract_date(&document);
        let description = self.extract_description(&document).unwrap_or_default();

        PressRecord {
            link: page.url.clone(),
            title,
            date,
            description,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// First non-empty heading text across the title selectors
    fn extract_title(&self, document: &Html) -> Option<String> {
        for selector in &self.selectors.title {
            if let Some(element) = document.select(selector).next() {
                let text = element_text(&element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Date from the text scan, overridden by a machine-readable time marker
    ///
    /// The `datetime` attribute of a `<time>` element always wins over the
    /// text-scan result when present. The element's visible text is used
    /// only when it lacks the attribute and the scan found nothing.
    fn extract_date(&self, document: &Html) -> String {
        let page_text: String = document.root_element().text().collect();

        let mut date = String::new();
        for pattern in date_patterns() {
            if let Some(found) = pattern.find(&page_text) {
                date = dates::normalize(found.as_str());
                break;
            }
        }

        if let Some(time_el) = document.select(&self.selectors.time).next() {
            if let Some(machine) = time_el.value().attr("datetime") {
                date = dates::normalize(machine);
            } else if date.is_empty() {
                date = dates::normalize(&element_text(&time_el));
            }
        }

        date
    }

    /// First paragraph long enough to be a real description, truncated
    fn extract_description(&self, document: &Html) -> Option<String> {
        for scope in &self.selectors.description {
            for element in document.select(scope) {
                let text = element_text(&element);
                if text.chars().count() > MIN_DESCRIPTION_LEN {
                    return Some(truncate_description(&text));
                }
            }
        }
        None
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect an element's text with whitespace collapsed and trimmed
fn element_text(element: &ElementRef) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap a description at the maximum length, marking the cut with an ellipsis
fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        let truncated: String = text.chars().take(MAX_DESCRIPTION_LEN).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Derive a display title from the final path segment of an identifier
///
/// `.../big-funding-announcement` becomes `Big Funding Announcement`.
fn title_from_slug(url: &str) -> String {
    let slug = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    let title = slug
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        // Degenerate identifier; better an ugly title than an empty one
        url.to_string()
    } else {
        title
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
