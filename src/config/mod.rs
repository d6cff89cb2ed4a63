//! Configuration management for the presswatch scanner
//!
//! This module handles loading and validating configuration from
//! environment variables and TOML files. Validation runs before any
//! network work so a bad target fails the run up front.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Newsroom target and pagination limits
    pub newsroom: NewsroomConfig,

    /// HTTP fetch behavior
    pub fetch: FetchConfig,

    /// Detail-page extraction behavior
    pub extract: ExtractConfig,

    /// On-disk state locations
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Newsroom target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsroomConfig {
    /// Listing URL the scan starts from
    pub base_url: String,

    /// Hard ceiling on listing pages per run
    pub max_pages: u32,

    /// Fresh-link count at or below which a later page stops the walk
    pub stop_threshold: usize,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Rate limit (requests per second)
    pub rate_limit: u32,

    /// Maximum retry attempts for a failed request
    pub max_retries: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Extraction-stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Maximum detail pages fetched concurrently
    pub concurrency: usize,

    /// Per-item fetch-and-extract budget in seconds
    pub item_timeout_secs: u64,

    /// Optional whole-run budget in seconds
    pub overall_deadline_secs: Option<u64>,
}

/// On-disk state configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Known-identifier set carried between runs
    pub known_path: PathBuf,

    /// Snapshot document written per run
    pub snapshot_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PRESSWATCH_BASE_URL")
            .unwrap_or_else(|_| String::from("https://www.opsera.ai/newsroom"));

        let max_pages = std::env::var("PRESSWATCH_MAX_PAGES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let stop_threshold = std::env::var("PRESSWATCH_STOP_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);

        let rate_limit = std::env::var("PRESSWATCH_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(2);

        let max_retries = std::env::var("PRESSWATCH_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let request_timeout_secs = std::env::var("PRESSWATCH_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let concurrency = std::env::var("PRESSWATCH_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(4);

        let item_timeout_secs = std::env::var("PRESSWATCH_ITEM_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(20);

        let overall_deadline_secs = std::env::var("PRESSWATCH_OVERALL_DEADLINE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        let known_path = std::env::var("PRESSWATCH_KNOWN_PATH")
            .unwrap_or_else(|_| String::from("data/known.json"))
            .into();

        let snapshot_path = std::env::var("PRESSWATCH_SNAPSHOT_PATH")
            .unwrap_or_else(|_| String::from("data/snapshot.json"))
            .into();

        let log_level =
            std::env::var("PRESSWATCH_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("PRESSWATCH_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            newsroom: NewsroomConfig {
                base_url,
                max_pages,
                stop_threshold,
            },
            fetch: FetchConfig {
                rate_limit,
                max_retries,
                request_timeout_secs,
            },
            extract: ExtractConfig {
                concurrency,
                item_timeout_secs,
                overall_deadline_secs,
            },
            storage: StorageConfig {
                known_path,
                snapshot_path,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found; nothing downstream runs
    /// after a validation failure.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.newsroom.base_url.is_empty() {
            return Err(ConfigError::Missing("newsroom.base_url"));
        }

        let parsed =
            Url::parse(&self.newsroom.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
                url: self.newsroom.base_url.clone(),
                reason: e.to_string(),
            })?;

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.newsroom.base_url.clone(),
                reason: "missing host".to_string(),
            });
        }

        if parsed.path().trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.newsroom.base_url.clone(),
                reason: "listing URL must have a path".to_string(),
            });
        }

        if self.newsroom.max_pages == 0 {
            return Err(ConfigError::Invalid {
                name: "newsroom.max_pages",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.fetch.rate_limit == 0 {
            return Err(ConfigError::Invalid {
                name: "fetch.rate_limit",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.extract.concurrency == 0 {
            return Err(ConfigError::Invalid {
                name: "extract.concurrency",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.request_timeout_secs)
    }

    /// Get per-item extraction timeout as Duration
    #[must_use]
    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.extract.item_timeout_secs)
    }

    /// Get overall run deadline as Duration, when configured
    #[must_use]
    pub fn overall_deadline(&self) -> Option<Duration> {
        self.extract.overall_deadline_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newsroom: NewsroomConfig {
                base_url: String::from("https://www.opsera.ai/newsroom"),
                max_pages: 5,
                stop_threshold: 0,
            },
            fetch: FetchConfig {
                rate_limit: 2,
                max_retries: 3,
                request_timeout_secs: 30,
            },
            extract: ExtractConfig {
                concurrency: 4,
                item_timeout_secs: 20,
                overall_deadline_secs: None,
            },
            storage: StorageConfig {
                known_path: PathBuf::from("data/known.json"),
                snapshot_path: PathBuf::from("data/snapshot.json"),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
