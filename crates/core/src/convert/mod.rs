//! Chapter-to-Markdown conversion.
//!
//! The [`Converter`] walks a read-only DOM subtree and renders it as
//! Markdown. Block constructs (headings, paragraphs, lists, tables, quotes,
//! code, figures) each become one block string; inline markup inside them
//! is rendered separately and whitespace-collapsed. Blocks are finally
//! joined with blank lines and normalised.
//!
//! # Example
//!
//! ```rust
//! use chapterdown_core::{Converter, Document, NoSelection};
//!
//! let html = r#"
//!     <html><body><div id="sbo-rt-content">
//!         <h1>Getting Started</h1>
//!         <p>Install with <code>cargo</code>.</p>
//!     </div></body></html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let result = Converter::new().run(&doc, &NoSelection);
//! assert_eq!(result.title, "Getting Started");
//! assert_eq!(result.markdown, "# Getting Started\n\nInstall with `cargo`.\n");
//! ```

mod blocks;
mod inline;
mod list;
mod scope;
mod table;
mod title;

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{ElementRef, Node};
use serde::Serialize;

use crate::config::ConvertConfig;
use crate::parse::{Document, collapse_whitespace};
use crate::selection::{NoSelection, SelectionSource};
use crate::tidy::normalize;
use crate::visibility::{StyleVisibility, Visibility};

pub use scope::resolve_scope;
pub use title::resolve_title;

static HEADING_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+").unwrap());

/// The outcome of converting one chapter.
///
/// Both fields are empty when the page has no content container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// The rendered Markdown, ending in a single newline.
    pub markdown: String,
    /// The resolved chapter title.
    pub title: String,
}

impl ConversionResult {
    /// Returns `true` when nothing was converted.
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty()
    }
}

/// Converts reader content into Markdown.
///
/// The converter is stateless between calls. Visibility of elements is
/// decided by the `V` oracle, [`StyleVisibility`] unless replaced with
/// [`Converter::with_visibility`].
pub struct Converter<V = StyleVisibility> {
    config: ConvertConfig,
    visibility: V,
}

impl Converter {
    /// Creates a converter with default settings.
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    /// Creates a converter with a custom configuration.
    pub fn with_config(config: ConvertConfig) -> Self {
        Self { config, visibility: StyleVisibility }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Visibility> Converter<V> {
    /// Replaces the visibility oracle.
    pub fn with_visibility<W: Visibility>(self, visibility: W) -> Converter<W> {
        Converter { config: self.config, visibility }
    }

    /// Gets the active configuration.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Locates the content container and converts it.
    ///
    /// Returns an empty [`ConversionResult`] when the document has no
    /// element with the configured container id.
    pub fn run(&self, document: &Document, selection: &dyn SelectionSource) -> ConversionResult {
        match resolve_scope(document, &self.config.container_id, selection) {
            Some(root) => self.convert(document, root),
            None => {
                tracing::debug!(container_id = %self.config.container_id, "no content container found");
                ConversionResult::default()
            }
        }
    }

    /// Converts the subtree under `root`.
    pub fn convert(&self, document: &Document, root: ElementRef<'_>) -> ConversionResult {
        let title = resolve_title(document, root, &self.config.fallback_title);

        let mut blocks = vec![format!("# {}", title)];
        for child in root.children() {
            self.walk(child, &mut blocks);
        }

        if duplicates_title(blocks.get(1), &title) {
            tracing::debug!("dropping in-content heading that repeats the title");
            blocks.remove(1);
        }

        tracing::debug!(title = %title, blocks = blocks.len(), "converted content");

        let mut markdown = normalize(&blocks.join("\n\n"));
        markdown.push('\n');

        ConversionResult { markdown, title }
    }

    fn is_hidden(&self, element: &ElementRef<'_>) -> bool {
        self.visibility.is_hidden(element)
    }

    fn is_index_term(&self, element: &ElementRef<'_>) -> bool {
        element
            .value()
            .classes()
            .any(|class| self.config.index_term_classes.iter().any(|marker| marker == class))
    }

    /// `true` if `element` or any ancestor strictly below `root` is hidden
    /// or an index term.
    fn excluded_within(&self, element: ElementRef<'_>, root: ElementRef<'_>) -> bool {
        let root_id = (*root).id();
        std::iter::once(*element)
            .chain(element.ancestors())
            .take_while(|node| node.id() != root_id)
            .filter_map(ElementRef::wrap)
            .any(|el| self.is_hidden(&el) || self.is_index_term(&el))
    }

    /// Text of the visible, non-index-term part of `node`, whitespace-collapsed.
    fn visible_text(&self, node: NodeRef<'_, Node>) -> String {
        let mut text = String::new();
        self.gather_text(node, &mut text);
        collapse_whitespace(&text)
    }

    fn gather_text(&self, node: NodeRef<'_, Node>, out: &mut String) {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(_) => {
                if ElementRef::wrap(node).is_some_and(|el| self.is_hidden(&el) || self.is_index_term(&el)) {
                    return;
                }
                for child in node.children() {
                    self.gather_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Resolves `value` against the configured base URL, if any.
    fn resolve_url(&self, value: &str) -> String {
        match &self.config.base_url {
            Some(base) => base.join(value).map(|url| url.to_string()).unwrap_or_else(|_| value.to_string()),
            None => value.to_string(),
        }
    }
}

/// Converts an HTML page with the given configuration and no selection.
pub fn convert_html(html: &str, config: &ConvertConfig) -> ConversionResult {
    let document = Document::parse(html);
    Converter::with_config(config.clone()).run(&document, &NoSelection)
}

fn duplicates_title(block: Option<&String>, title: &str) -> bool {
    match block {
        Some(block) if HEADING_PREFIX.is_match(block) => HEADING_PREFIX.replace(block, "").trim() == title.trim(),
        _ => false,
    }
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

fn descendant_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn is_list(node: &NodeRef<'_, Node>) -> bool {
    node.value().as_element().is_some_and(|el| matches!(el.name(), "ul" | "ol"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectorAnchor;

    fn chapter(body: &str) -> String {
        format!(
            r#"<html><head><title>Book Page</title></head><body><div id="sbo-rt-content">{}</div></body></html>"#,
            body
        )
    }

    fn convert(body: &str) -> ConversionResult {
        convert_html(&chapter(body), &ConvertConfig::default())
    }

    #[test]
    fn test_missing_container_is_empty() {
        let result = convert_html("<html><body><p>Elsewhere</p></body></html>", &ConvertConfig::default());
        assert_eq!(result, ConversionResult { markdown: String::new(), title: String::new() });
        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicate_title_is_dropped() {
        let result = convert("<h1>Chapter 1</h1><p>Text</p>");
        assert_eq!(result.title, "Chapter 1");
        assert_eq!(result.markdown, "# Chapter 1\n\nText\n");
    }

    #[test]
    fn test_backtick_line_in_code_keeps_blank_lines_collapsed() {
        let result = convert("<h1>T</h1><pre>Use\n```\nto fence</pre><p></p><p></p><p>after   x</p><p>b</p>");
        assert_eq!(result.markdown, "# T\n\n````\nUse\n```\nto fence\n````\n\nafter x\n\nb\n");
        assert!(!result.markdown.contains("\n\n\n"));
    }

    #[test]
    fn test_figure_caption_ignores_hidden_and_index_terms() {
        let result = convert(
            r#"<h1>T</h1><figure><img src="a.png"><figcaption>Cap<span class="indexterm">IDX</span> <span hidden>gone</span></figcaption></figure>"#,
        );
        assert_eq!(result.markdown, "# T\n\n![Cap](a.png)\n\n*Cap*\n");
    }

    #[test]
    fn test_different_first_heading_is_kept() {
        let result = convert("<div class=\"title\">Part One</div><h2>Intro</h2><p>Text</p>");
        assert_eq!(result.title, "Part One");
        assert_eq!(result.markdown, "# Part One\n\nPart One\n\n## Intro\n\nText\n");
    }

    #[test]
    fn test_title_falls_back_to_document_title() {
        let result = convert("<p>Only text</p>");
        assert_eq!(result.title, "Book Page");
        assert_eq!(result.markdown, "# Book Page\n\nOnly text\n");
    }

    #[test]
    fn test_fallback_title() {
        let html = r#"<html><body><div id="sbo-rt-content"><p>x</p></div></body></html>"#;
        let result = convert_html(html, &ConvertConfig::default());
        assert_eq!(result.title, "Content");
    }

    #[test]
    fn test_duplicate_check_only_inspects_first_block() {
        let result = convert("<p>Lead</p><h1>Chapter 1</h1>");
        assert_eq!(result.markdown, "# Chapter 1\n\nLead\n\n# Chapter 1\n");
    }

    #[test]
    fn test_custom_container_id() {
        let html = r#"<html><body><main id="book"><h2>Hello</h2></main></body></html>"#;
        let config = ConvertConfig::builder().container_id("book").build();
        let result = convert_html(html, &config);
        assert_eq!(result.markdown, "# Hello\n");
    }

    #[test]
    fn test_selection_inside_container() {
        let doc = Document::parse(&chapter("<h1>T</h1><p id=\"sel\">Picked</p>"));
        let result = Converter::new().run(&doc, &SelectorAnchor::new("#sel"));
        assert_eq!(result.markdown, "# T\n\nPicked\n");
    }

    #[test]
    fn test_custom_visibility_oracle() {
        fn hide_notes(el: &ElementRef<'_>) -> bool {
            el.value().classes().any(|c| c == "note")
        }

        let doc = Document::parse(&chapter("<h1>T</h1><p class=\"note\">Secret</p><p>Shown</p>"));
        let result = Converter::new().with_visibility(hide_notes).run(&doc, &NoSelection);
        assert!(!result.markdown.contains("Secret"));
        assert!(result.markdown.contains("Shown"));
    }

    #[test]
    fn test_base_url_resolution() {
        let config = ConvertConfig::builder()
            .base_url(url::Url::parse("https://learning.example.com/library/view/book/ch01.html").unwrap())
            .build();
        let html = chapter(r#"<h1>T</h1><p><a href="ch02.html">Next</a></p><img src="../images/fig1.png" alt="Fig">"#);
        let result = convert_html(&html, &config);
        assert!(result.markdown.contains("[Next](https://learning.example.com/library/view/book/ch02.html)"));
        assert!(result.markdown.contains("![Fig](https://learning.example.com/library/view/images/fig1.png)"));
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        let result = convert("<h1>T</h1><p>a</p>\n\n\n<p>b</p>\n\n");
        assert!(result.markdown.ends_with("b\n"));
        assert!(!result.markdown.ends_with("\n\n"));
        assert!(!result.markdown.contains("\n\n\n"));
    }
}
