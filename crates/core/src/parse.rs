//! HTML parsing and read-only DOM access.
//!
//! This module provides the [`Document`] type, a thin wrapper over
//! `scraper::Html` that exposes only the lookups the converter needs:
//! the content container by id, CSS selection and the page `<title>`.
//!
//! # Example
//!
//! ```rust
//! use chapterdown_core::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Chapter 1</title></head>
//!         <body><div id="sbo-rt-content"><p>Body</p></div></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Chapter 1".to_string()));
//! assert!(doc.element_by_id("sbo-rt-content").is_some());
//! ```

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::{ChapterError, Result};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Represents a parsed HTML document.
///
/// The tree is built once by [`Document::parse`] and never mutated afterwards.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed markup, so parsing itself
    /// cannot fail.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the `<html>` element.
    pub fn root_element(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Finds the first element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ChapterError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chapterdown_core::Document;
    ///
    /// let doc = Document::parse(r#"<p class="a">First</p><p class="a">Second</p>"#);
    /// assert_eq!(doc.select("p.a").unwrap().len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).collect())
    }

    /// Gets the title of the document.
    ///
    /// Returns the whitespace-collapsed text of the `<title>` element, or
    /// `None` when it is missing or blank.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|title| !title.is_empty())
    }
}

/// Parses a CSS selector, mapping failures into [`ChapterError::HtmlParseError`].
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ChapterError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Collapses every whitespace run to one space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Concatenates every descendant text node, like the DOM's `textContent`.
pub fn text_content(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text().map(|t| &**t))
        .collect()
}
