use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::{Converter, descendant_elements};
use crate::parse::text_content;
use crate::tidy::{code_fence_marker, collapse, normalize, tidy};
use crate::visibility::Visibility;

impl<V: Visibility> Converter<V> {
    /// Renders a node as a sequence of Markdown blocks in document order.
    pub fn render_blocks(&self, node: NodeRef<'_, Node>) -> Vec<String> {
        let mut blocks = Vec::new();
        self.walk(node, &mut blocks);
        blocks
    }

    /// Appends the blocks contributed by `node` to `blocks`.
    pub(super) fn walk(&self, node: NodeRef<'_, Node>, blocks: &mut Vec<String>) {
        match node.value() {
            Node::Text(text) => {
                let text = collapse(text);
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(text.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(node) {
                    self.walk_element(el, blocks);
                }
            }
            _ => {}
        }
    }

    fn walk_element(&self, el: ElementRef<'_>, blocks: &mut Vec<String>) {
        let tag = el.value().name();

        if self.is_hidden(&el) {
            tracing::trace!(tag, "skipping hidden element");
            return;
        }
        if self.is_index_term(&el) {
            return;
        }

        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                blocks.push(format!("{} {}", "#".repeat(level), self.block_inline(el)));
            }
            "p" => blocks.push(self.block_inline(el)),
            "blockquote" => blocks.push(self.blockquote(el)),
            "pre" => blocks.push(code_fence(el)),
            "ul" | "ol" => self.list(el, tag == "ol", blocks),
            "img" => blocks.extend(self.image(el, None)),
            "figure" => self.figure(el, blocks),
            "hr" => blocks.push("---".to_string()),
            "table" => blocks.extend(self.table(el)),
            _ => {
                for child in el.children() {
                    self.walk(child, blocks);
                }
            }
        }
    }

    /// Inline rendering of an element's children, tidied.
    pub(super) fn block_inline(&self, el: ElementRef<'_>) -> String {
        tidy(&self.inline_children(*el))
    }

    /// Walks every child of `el` into a fresh block sequence.
    fn nested_blocks(&self, el: ElementRef<'_>) -> Vec<String> {
        let mut local = Vec::new();
        for child in el.children() {
            self.walk(child, &mut local);
        }
        local
    }

    fn blockquote(&self, el: ElementRef<'_>) -> String {
        let merged = normalize(&self.nested_blocks(el).join("\n\n"));
        merged.split('\n').map(|line| format!("> {}", line)).collect::<Vec<_>>().join("\n")
    }

    /// `![alt](src)`, or `None` when the image has no source.
    fn image(&self, img: ElementRef<'_>, fallback_alt: Option<&str>) -> Option<String> {
        let src = img.value().attr("src").filter(|src| !src.is_empty())?;
        let alt = img.value().attr("alt").filter(|alt| !alt.is_empty()).or(fallback_alt).unwrap_or("");
        Some(format!("![{}]({})", alt, self.resolve_url(src)))
    }

    fn figure(&self, el: ElementRef<'_>, blocks: &mut Vec<String>) {
        let image = descendant_elements(el).find(|d| d.value().name() == "img" && !self.excluded_within(*d, el));
        let caption = descendant_elements(el)
            .find(|d| d.value().name() == "figcaption" && !self.excluded_within(*d, el))
            .map(|c| self.visible_text(*c))
            .filter(|c| !c.is_empty());

        match image {
            Some(img) => blocks.extend(self.image(img, caption.as_deref())),
            None => {
                let local = self.nested_blocks(el);
                if !local.is_empty() {
                    blocks.push(local.join("\n\n"));
                }
            }
        }

        if let Some(caption) = caption {
            blocks.push(format!("*{}*", caption));
        }
    }
}

/// Fenced code block holding the element's raw text.
fn code_fence(el: ElementRef<'_>) -> String {
    let text = text_content(*el);
    let fence = code_fence_marker(&text);
    format!("{fence}\n{}\n{fence}", text.trim_end_matches('\n'))
}
