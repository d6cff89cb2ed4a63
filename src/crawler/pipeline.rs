//! Concurrent detail-page extraction
//!
//! Discovered links are fetched and extracted with bounded concurrency.
//! A failing or slow item is recorded as skipped and never aborts the
//! rest of the batch; results come back in discovery order regardless of
//! completion order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

use crate::crawler::fetcher::PageFetcher;
use crate::models::{PressRecord, SkippedItem};
use crate::parser::FieldExtractor;

/// Tuning knobs for the extraction stage
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum detail pages in flight at once
    pub concurrency: usize,

    /// Per-item budget covering fetch and extraction
    pub item_timeout: Duration,

    /// Optional budget for the whole batch; items past it are skipped
    pub overall_deadline: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            item_timeout: Duration::from_secs(20),
            overall_deadline: None,
        }
    }
}

/// What the extraction stage produced for one batch of links
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Successfully extracted records, in input order
    pub records: Vec<PressRecord>,

    /// Items that produced no record, with the reason for each
    pub skipped: Vec<SkippedItem>,
}

/// Bounded-concurrency fetch-and-extract stage
pub struct ExtractionPipeline {
    config: PipelineConfig,
    extractor: Arc<FieldExtractor>,
}

impl ExtractionPipeline {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            extractor: Arc::new(FieldExtractor::new()),
        }
    }

    /// Fetch and extract every URL in the batch
    ///
    /// Records preserve the input order of their URLs. An item that fails
    /// to fetch, times out, or starts after the overall deadline becomes
    /// a skip entry instead.
    pub async fn run(&self, fetcher: Arc<dyn PageFetcher>, urls: Vec<String>) -> PipelineOutput {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let deadline = self.config.overall_deadline.map(|d| Instant::now() + d);

        let tasks = urls.into_iter().map(|url| {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&fetcher);
            let extractor = Arc::clone(&self.extractor);
            let item_timeout = self.config.item_timeout;

            async move {
                // Holding the permit bounds how many fetches run at once;
                // the semaphore is never closed
                let _permit = semaphore.acquire().await.ok();

                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        return Err(SkippedItem {
                            url,
                            reason: "overall deadline exceeded".to_string(),
                        });
                    }
                }

                match timeout(item_timeout, fetcher.fetch_page(&url)).await {
                    Ok(Ok(page)) => {
                        let record = extractor.extract(&page);
                        debug!(url = %url, title = %record.title, "extracted");
                        Ok(record)
                    }
                    Ok(Err(e)) => {
                        warn!(url = %url, error = %e, "detail fetch failed, skipping");
                        Err(SkippedItem {
                            url,
                            reason: e.to_string(),
                        })
                    }
                    Err(_) => {
                        warn!(url = %url, "detail fetch timed out, skipping");
                        Err(SkippedItem {
                            url,
                            reason: "item timeout exceeded".to_string(),
                        })
                    }
                }
            }
        });

        let mut output = PipelineOutput::default();
        for result in join_all(tasks).await {
            match result {
                Ok(record) => output.records.push(record),
                Err(skip) => output.skipped.push(skip),
            }
        }

        output
    }
}
