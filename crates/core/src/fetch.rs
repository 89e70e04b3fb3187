//! Page acquisition from URLs, files, and stdin.
//!
//! The converter needs the reader page's HTML. This module retrieves it
//! from an HTTP/HTTPS URL (feature `fetch`), a saved file, or standard input.

use std::fs;
use std::path::PathBuf;

use crate::{ChapterError, Result};

/// HTTP client configuration for fetching reader pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; chapterdown/1.0)".to_string() }
    }
}

/// Fetches HTML content from a URL.
///
/// Performs an HTTP GET request and returns the response body as text.
/// Redirects are followed and the configured timeout is enforced.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    let parsed_url = Url::parse(url).map_err(|e| ChapterError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(ChapterError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(ChapterError::HttpError)?;

    tracing::debug!(url = %parsed_url, timeout = config.timeout, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ChapterError::Timeout { timeout: config.timeout }
            } else {
                ChapterError::HttpError(e)
            }
        })?;

    let content = response.error_for_status()?.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file, such as a saved reader page.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ChapterError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(ChapterError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(ChapterError::from)?;

    Ok(buffer)
}
