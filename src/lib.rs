//! presswatch - Newsroom press-release scanner
//!
//! Discovers press-release links from a paginated newsroom listing,
//! extracts structured records from each detail page, and reconciles
//! them against the identifiers seen in previous runs.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and validation
//! - [`crawler`] - Listing discovery and detail-page extraction
//! - [`parser`] - HTML parsing, field extraction, date normalization
//! - [`reconcile`] - Newness flags and deterministic ordering
//! - [`models`] - Core data structures and types
//! - [`storage`] - Known-identifier set and snapshot output
//!
//! # Example
//!
//! ```no_run
//! use presswatch::config::Config;
//! use presswatch::crawler::Scanner;
//! use std::collections::HashSet;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let scanner = Scanner::new(config)?;
//!     let outcome = scanner.run(&HashSet::new()).await?;
//!     println!("{} records, {} new", outcome.report.total_records, outcome.report.new_records);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod reconcile;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{PageFetcher, RunTracker, ScanOutcome, Scanner};
    pub use crate::error::{ConfigError, FetchError, ScanError};
    pub use crate::models::{PressRecord, RawPage, ReconciledRecord, ScanReport};
    pub use crate::storage::{JsonSnapshot, KnownIds, RecordSink};
}

// Direct re-exports for convenience
pub use models::{PressRecord, RawPage, ReconciledRecord, ScanReport};
