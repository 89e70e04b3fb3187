//! Converter configuration.
//!
//! [`ConvertConfig`] names the reader layout being targeted (the content
//! container id and the index-term marker classes) plus a few output
//! options. It can be built in code with [`ConvertConfig::builder`] or
//! loaded from a JSON file.
//!
//! # Example
//!
//! ```rust
//! use chapterdown_core::ConvertConfig;
//!
//! let config = ConvertConfig::builder()
//!     .container_id("book-content")
//!     .fallback_title("Untitled")
//!     .build();
//! assert_eq!(config.container_id, "book-content");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::{ChapterError, Result};

/// Id of the element that holds the reader's chapter content.
pub const DEFAULT_CONTAINER_ID: &str = "sbo-rt-content";

/// Class marking index-term anchors embedded in the text.
pub const DEFAULT_INDEX_TERM_CLASS: &str = "indexterm";

/// Title used when neither a heading nor a `<title>` is available.
pub const DEFAULT_FALLBACK_TITLE: &str = "Content";

/// Configuration for the converter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    /// Id of the content container (default: `sbo-rt-content`).
    pub container_id: String,

    /// Class names that mark index-term elements (default: `["indexterm"]`).
    pub index_term_classes: Vec<String>,

    /// Title used when the content has no heading and the page no title.
    pub fallback_title: String,

    /// Base URL for resolving relative `href` and `src` values.
    ///
    /// When `None` attribute values are emitted exactly as written.
    pub base_url: Option<Url>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            index_term_classes: vec![DEFAULT_INDEX_TERM_CLASS.to_string()],
            fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
            base_url: None,
        }
    }
}

/// On-disk form of [`ConvertConfig`]. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    container_id: Option<String>,
    index_term_classes: Option<Vec<String>>,
    fallback_title: Option<String>,
    base_url: Option<String>,
}

impl ConvertConfig {
    /// Creates a new builder for ConvertConfig.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder::new()
    }

    /// Default location of the config file: `<config_dir>/chapterdown/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("chapterdown").join("config.json"))
    }

    /// Loads a configuration file, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::FileNotFound`] if the file does not exist and
    /// [`ChapterError::ConfigError`] if it is not valid JSON, contains unknown
    /// fields, or has an unparseable `base_url`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChapterError::FileNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw).map_err(|e| ChapterError::ConfigError(e.to_string()))?;
        let mut builder = ConvertConfigBuilder::new();

        if let Some(id) = file.container_id {
            builder = builder.container_id(id);
        }
        if let Some(classes) = file.index_term_classes {
            builder = builder.index_term_classes(classes);
        }
        if let Some(title) = file.fallback_title {
            builder = builder.fallback_title(title);
        }
        if let Some(base) = file.base_url {
            let url = Url::parse(&base).map_err(|e| ChapterError::ConfigError(format!("base_url: {}", e)))?;
            builder = builder.base_url(url);
        }

        Ok(builder.build())
    }

    /// Loads the default config file if one exists, else returns defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Builder for ConvertConfig.
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ConvertConfig::default() }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Sets the content container id.
    pub fn container_id(mut self, value: impl Into<String>) -> Self {
        self.config.container_id = value.into();
        self
    }

    /// Replaces the index-term marker classes.
    pub fn index_term_classes(mut self, value: Vec<String>) -> Self {
        self.config.index_term_classes = value;
        self
    }

    /// Sets the fallback title.
    pub fn fallback_title(mut self, value: impl Into<String>) -> Self {
        self.config.fallback_title = value.into();
        self
    }

    /// Sets the base URL for resolving relative links and images.
    pub fn base_url(mut self, value: Url) -> Self {
        self.config.base_url = Some(value);
        self
    }

    /// Builds the config.
    pub fn build(self) -> ConvertConfig {
        self.config
    }
}

impl Default for ConvertConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
