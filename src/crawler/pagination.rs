//! Listing pagination with diminishing-returns cutoff
//!
//! Listing pages are walked sequentially from page 1 up to a hard
//! ceiling. The walk stops early when a follow-up page contributes no
//! links beyond what earlier pages already yielded, and treats any fetch
//! failure past page 1 as the natural end of the listing.

use tracing::{debug, info, warn};

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::links::LinkCollector;
use crate::error::ConfigError;

/// Default hard ceiling on listing pages per run
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Result of walking the listing
#[derive(Debug, Default)]
pub struct Discovery {
    /// Distinct press-release links in first-seen order
    pub entries: Vec<String>,

    /// Listing pages fetched successfully
    pub pages_visited: u32,
}

/// Sequential listing walker
pub struct PaginationDriver {
    base_url: String,
    max_pages: u32,
    stop_threshold: usize,
}

impl PaginationDriver {
    /// Build a driver for the given listing URL
    ///
    /// `max_pages` is the hard ceiling; `stop_threshold` is the number of
    /// fresh links at or below which a follow-up page ends the walk
    /// (zero reproduces the plain "nothing new" cutoff).
    #[must_use]
    pub fn new(base_url: &str, max_pages: u32, stop_threshold: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            max_pages,
            stop_threshold,
        }
    }

    /// URL of the n-th listing page
    ///
    /// Page 1 is the bare listing; later pages carry a query parameter.
    #[must_use]
    pub fn listing_url(&self, page: u32) -> String {
        if page <= 1 {
            self.base_url.clone()
        } else {
            format!("{}?page={}", self.base_url, page)
        }
    }

    /// Walk the listing and collect distinct press-release links
    ///
    /// A failure on page 1 means the newsroom is unreachable and yields
    /// an empty discovery rather than an error; a failure on a later page
    /// is indistinguishable from running out of pages and just ends the
    /// walk with what was gathered so far.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only when the listing URL itself is unusable.
    pub async fn discover(&self, fetcher: &dyn PageFetcher) -> Result<Discovery, ConfigError> {
        let mut collector = LinkCollector::new(&self.base_url)?;
        let mut discovery = Discovery::default();

        for page in 1..=self.max_pages {
            let url = self.listing_url(page);

            let raw = match fetcher.fetch_page(&url).await {
                Ok(raw) => raw,
                Err(e) if page == 1 => {
                    warn!(url = %url, error = %e, "listing unreachable, nothing to scan");
                    return Ok(discovery);
                }
                Err(e) => {
                    debug!(page, error = %e, "listing page fetch failed, ending walk");
                    break;
                }
            };

            discovery.pages_visited += 1;

            let fresh = collector.observe(&raw);
            debug!(page, fresh = fresh.len(), "listing page scanned");

            let exhausted = page > 1 && fresh.len() <= self.stop_threshold;
            discovery.entries.extend(fresh);

            if exhausted {
                debug!(page, "no further links, ending walk");
                break;
            }

            if page == self.max_pages {
                warn!(
                    max_pages = self.max_pages,
                    "page ceiling reached with links still arriving"
                );
            }
        }

        info!(
            links = discovery.entries.len(),
            pages = discovery.pages_visited,
            "listing walk complete"
        );

        Ok(discovery)
    }
}
