//! Error types for the presswatch scanner
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Target page does not exist
    #[error("page unavailable: {0}")]
    Unavailable(String),

    /// Server error with status code
    #[error("server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("request timeout")]
    Timeout,

    /// Maximum retry attempts exceeded
    #[error("maximum retry attempts exceeded")]
    MaxRetriesExceeded,
}

/// Fatal configuration errors, raised before any pipeline work starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    /// The newsroom base URL cannot be used
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A setting has an out-of-range or malformed value
    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Top-level scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// Fetch error
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A scan is already in progress
    #[error("a scan is already running")]
    AlreadyRunning,
}
