//! Press-release link discovery and run-scoped deduplication
//!
//! The collector scans listing-page anchors for links under the
//! configured newsroom path, normalizes each candidate to an absolute
//! canonical identifier, and tracks everything it has seen across the
//! whole run so repeated listings yield each link exactly once.

use std::collections::HashSet;

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

use crate::error::ConfigError;
use crate::models::RawPage;

lazy_static! {
    // Anchors only; href attributes on <link> or <area> are not entries
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("Invalid CSS selector: a[href]");
}

/// Cumulative link collector for one scan run
///
/// State is scoped to the run: a fresh collector starts with an empty
/// seen-set, and links already yielded earlier in the run are never
/// yielded again, whichever page repeats them.
pub struct LinkCollector {
    /// Scheme and host the listing lives under, without a trailing slash
    origin: String,

    /// Listing path used to recognize detail links, e.g. `/newsroom`
    listing_path: String,

    /// Every canonical link yielded so far in this run
    seen: HashSet<String>,
}

impl LinkCollector {
    /// Build a collector from the configured listing URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` when the URL does not parse,
    /// lacks a host, or has no path component to recognize links by.
    pub fn new(listing_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(listing_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: listing_url.to_string(),
            reason: e.to_string(),
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidBaseUrl {
                url: listing_url.to_string(),
                reason: "missing host".to_string(),
            })?;

        let listing_path = parsed.path().trim_end_matches('/').to_string();
        if listing_path.is_empty() {
            return Err(ConfigError::InvalidBaseUrl {
                url: listing_url.to_string(),
                reason: "listing URL must have a path".to_string(),
            });
        }

        let origin = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };

        Ok(Self {
            origin,
            listing_path,
            seen: HashSet::new(),
        })
    }

    /// Collect unseen press-release links from a listing page
    ///
    /// Returns links in the order they first appear in the markup. Links
    /// seen on an earlier page of this run are skipped.
    pub fn observe(&mut self, page: &RawPage) -> Vec<String> {
        let document = Html::parse_document(&page.html);
        let mut fresh = Vec::new();

        for anchor in document.select(&ANCHOR) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            let Some(canonical) = self.canonicalize(href) else {
                continue;
            };

            if self.seen.insert(canonical.clone()) {
                fresh.push(canonical);
            }
        }

        fresh
    }

    /// Number of distinct links yielded so far in this run
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Normalize an href to an absolute canonical identifier
    ///
    /// Accepts only paths strictly under the listing root: the listing
    /// path must be followed by a `/` and a non-empty slug, so the bare
    /// listing page and sibling paths that merely share the prefix
    /// (`/newsroom-archive`, `/newsroom.css`) are rejected. Trailing
    /// slashes are stripped so the same page linked with and without one
    /// dedups to a single identifier.
    fn canonicalize(&self, href: &str) -> Option<String> {
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.origin, href)
        };

        let absolute = absolute.trim_end_matches('/').to_string();

        let parsed = Url::parse(&absolute).ok()?;
        let path = parsed.path().trim_end_matches('/');

        let rest = path.strip_prefix(self.listing_path.as_str())?;
        if !rest.starts_with('/') {
            // Prefix match without a segment boundary is a different page
            return None;
        }

        let slug = rest.trim_matches('/');
        if slug.is_empty() {
            // The listing page linking to itself is not a press release
            return None;
        }

        Some(absolute)
    }
}
