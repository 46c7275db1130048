//! Error types for pipeline operations.
//!
//! This module defines the main error type [`NewslinkError`] which represents
//! all possible errors that can occur while fetching article details, loading
//! taxonomy configuration, and writing report snapshots.
//!
//! Per-article failures are deliberately not errors: a fetch that fails yields
//! an [`Article`](crate::Article) with `status: Failed` and the batch carries
//! on. Only batch-level conditions surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Error, Debug)]
pub enum NewslinkError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems during detail fetching.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when a detail fetch exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Taxonomy configuration errors.
    ///
    /// Returned when a chapter-rule file is missing required fields or is
    /// otherwise unusable.
    #[error("Taxonomy configuration error: {0}")]
    ConfigError(String),

    /// Taxonomy file not found.
    #[error("Taxonomy file not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode errors for candidates, taxonomy, and snapshots.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The batch produced no fetched articles at all.
    ///
    /// Individual failures never abort a run; this is raised only when the
    /// whole input collapses to nothing, so the caller can decide whether an
    /// empty day is an error.
    #[error("No fetched articles in this batch")]
    EmptyBatch,
}

/// Result type alias for NewslinkError.
pub type Result<T> = std::result::Result<T, NewslinkError>;
