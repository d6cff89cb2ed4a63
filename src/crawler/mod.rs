//! Newsroom scanning: discovery, extraction, reconciliation
//!
//! The scanner wires the stages together for one run: walk the listing
//! for press-release links, fetch and extract each detail page, then
//! reconcile the batch against the previously known identifier set.

pub mod fetcher;
pub mod links;
pub mod pagination;
pub mod pipeline;
pub mod status;

pub use fetcher::{NewsroomFetcher, PageFetcher};
pub use links::LinkCollector;
pub use pagination::{Discovery, PaginationDriver};
pub use pipeline::{ExtractionPipeline, PipelineConfig, PipelineOutput};
pub use status::{RunState, RunTracker};

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::ScanError;
use crate::models::{ReconciledRecord, ScanReport};
use crate::reconcile;

/// Everything one run produced
#[derive(Debug)]
pub struct ScanOutcome {
    /// Reconciled records, newest first
    pub records: Vec<ReconciledRecord>,

    /// Indices into `records` of records new this run
    pub new_positions: Vec<usize>,

    /// Run summary
    pub report: ScanReport,
}

/// One-shot newsroom scanner
pub struct Scanner {
    config: Config,
    fetcher: Arc<dyn PageFetcher>,
}

impl Scanner {
    /// Build a scanner with the real HTTP fetcher
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Config` for invalid configuration and
    /// `ScanError::Fetch` when the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, ScanError> {
        config.validate()?;

        let fetcher = NewsroomFetcher::with_config(
            config.fetch.rate_limit,
            config.fetch.max_retries,
            config.request_timeout(),
        )?;

        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
        })
    }

    /// Build a scanner around an existing page fetcher
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Config` for invalid configuration.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    /// Run one complete scan against a known identifier set
    ///
    /// Always terminates with an outcome: an unreachable newsroom or
    /// skipped detail pages shrink the result instead of failing it.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Config` when the listing URL turns out to be
    /// unusable for link collection.
    pub async fn run(&self, known: &HashSet<String>) -> Result<ScanOutcome, ScanError> {
        info!(base_url = %self.config.newsroom.base_url, "scan starting");

        let driver = PaginationDriver::new(
            &self.config.newsroom.base_url,
            self.config.newsroom.max_pages,
            self.config.newsroom.stop_threshold,
        );
        let discovery = driver.discover(self.fetcher.as_ref()).await?;

        let pipeline = ExtractionPipeline::new(PipelineConfig {
            concurrency: self.config.extract.concurrency,
            item_timeout: self.config.item_timeout(),
            overall_deadline: self.config.overall_deadline(),
        });
        let output = pipeline
            .run(Arc::clone(&self.fetcher), discovery.entries)
            .await;

        let (records, new_count) = reconcile::reconcile(output.records, known);
        let new_positions = reconcile::new_positions(&records);

        let report = ScanReport {
            total_records: records.len(),
            new_records: new_count,
            pages_visited: discovery.pages_visited,
            skipped: output.skipped,
        };

        info!(
            total = report.total_records,
            new = report.new_records,
            pages = report.pages_visited,
            skipped = report.skipped.len(),
            "scan complete"
        );

        Ok(ScanOutcome {
            records,
            new_positions,
            report,
        })
    }
}
