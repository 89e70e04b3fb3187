//! Text-selection anchors.
//!
//! When the user has selected text inside the reader, conversion is scoped
//! to the content container enclosing that selection. A [`SelectionSource`]
//! reports the node the selection is anchored at.

use ego_tree::NodeRef;
use scraper::Node;

use crate::parse::{Document, parse_selector};

/// Supplies the node at which the current text selection is anchored.
pub trait SelectionSource {
    /// Returns the anchor node, or `None` when nothing is selected.
    fn anchor<'a>(&self, document: &'a Document) -> Option<NodeRef<'a, Node>>;
}

/// No selection: conversion always covers the whole container.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl SelectionSource for NoSelection {
    fn anchor<'a>(&self, _document: &'a Document) -> Option<NodeRef<'a, Node>> {
        None
    }
}

/// Uses the first element matching a CSS selector as the selection anchor.
///
/// An invalid selector or one that matches nothing behaves like
/// [`NoSelection`].
#[derive(Debug, Clone)]
pub struct SelectorAnchor {
    selector: String,
}

impl SelectorAnchor {
    pub fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into() }
    }
}

impl SelectionSource for SelectorAnchor {
    fn anchor<'a>(&self, document: &'a Document) -> Option<NodeRef<'a, Node>> {
        let selector = match parse_selector(&self.selector) {
            Ok(sel) => sel,
            Err(e) => {
                tracing::warn!(selector = %self.selector, error = %e, "ignoring selection anchor");
                return None;
            }
        };
        document.html().select(&selector).next().map(|el| *el)
    }
}
