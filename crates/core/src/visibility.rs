//! Hidden-element detection.
//!
//! The converter never inspects styles itself; it asks a [`Visibility`]
//! oracle whether an element is hidden. [`StyleVisibility`] is the default
//! and works from markup alone. Any `Fn(&ElementRef) -> bool` function is
//! also an oracle, which keeps tests independent of a rendering engine.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").unwrap());

/// Elements a user agent renders with `display: none` by default.
const HIDDEN_BY_DEFAULT: &[&str] = &["head", "script", "style", "template", "noscript", "title", "meta", "link"];

/// Decides whether an element is hidden from the reader.
pub trait Visibility {
    /// Returns `true` when the element is hidden by `display: none` or
    /// `visibility: hidden`.
    fn is_hidden(&self, element: &ElementRef<'_>) -> bool;
}

impl<F> Visibility for F
where
    F: Fn(&ElementRef<'_>) -> bool,
{
    fn is_hidden(&self, element: &ElementRef<'_>) -> bool {
        self(element)
    }
}

/// Markup-based visibility: inline `style`, the `hidden` attribute and
/// elements that are never rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleVisibility;

impl Visibility for StyleVisibility {
    fn is_hidden(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();

        if HIDDEN_BY_DEFAULT.contains(&el.name()) {
            return true;
        }

        if el.attr("hidden").is_some() {
            return true;
        }

        el.attr("style").is_some_and(|style| HIDDEN_STYLE.is_match(style))
    }
}
