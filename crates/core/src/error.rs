//! Error types for chapterdown operations.
//!
//! The conversion itself never fails: an unrecognised page degrades to an
//! empty [`ConversionResult`](crate::ConversionResult). [`ChapterError`]
//! covers everything around it: acquiring the page, loading configuration,
//! writing output and talking to the clipboard.
//!
//! # Example
//!
//! ```rust
//! use chapterdown_core::{ChapterError, Result};
//!
//! fn require_content(markdown: &str) -> Result<&str> {
//!     if markdown.is_empty() {
//!         return Err(ChapterError::NoContent);
//!     }
//!     Ok(markdown)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for page acquisition, configuration and output.
#[derive(Error, Debug)]
pub enum ChapterError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page has no recognisable content container.
    #[error("No content found on this page.")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON (de)serialisation errors.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The clipboard could not be written.
    #[error("Failed to copy to clipboard: {0}")]
    ClipboardError(String),
}

/// Result type alias for ChapterError.
pub type Result<T> = std::result::Result<T, ChapterError>;
