use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::Converter;
use crate::tidy::{collapse, tidy};
use crate::visibility::Visibility;

impl<V: Visibility> Converter<V> {
    /// Renders a node as an inline Markdown fragment.
    ///
    /// Text is whitespace-collapsed but not trimmed; trimming happens where
    /// the fragment becomes part of a block.
    pub fn render_inline(&self, node: NodeRef<'_, Node>) -> String {
        match node.value() {
            Node::Text(text) => collapse(text),
            Node::Element(_) => ElementRef::wrap(node).map(|el| self.inline_element(el)).unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Concatenates the inline rendering of every child of `node`.
    pub(super) fn inline_children(&self, node: NodeRef<'_, Node>) -> String {
        node.children().map(|child| self.render_inline(child)).collect()
    }

    fn inline_element(&self, el: ElementRef<'_>) -> String {
        if self.is_index_term(&el) || self.is_hidden(&el) {
            return String::new();
        }

        match el.value().name() {
            "em" | "i" => format!("*{}*", self.inline_children(*el)),
            "strong" | "b" => format!("**{}**", self.inline_children(*el)),
            "code" => format!("`{}`", self.inline_children(*el)),
            "a" => {
                let text = tidy(&self.inline_children(*el));
                match el.value().attr("href").filter(|href| !href.is_empty()) {
                    Some(href) => format!("[{}]({})", text, self.resolve_url(href)),
                    None => text,
                }
            }
            "br" => "  \n".to_string(),
            _ => self.inline_children(*el),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Converter, Document};
    use rstest::rstest;

    fn inline(html: &str) -> String {
        let doc = Document::parse(&format!(r#"<p id="t">{}</p>"#, html));
        let p = doc.element_by_id("t").unwrap();
        Converter::new().inline_children(*p)
    }

    #[rstest]
    #[case("plain  text\n here", "plain text here")]
    #[case("<em>a</em> and <i>b</i>", "*a* and *b*")]
    #[case("<strong>a</strong> and <b>b</b>", "**a** and **b**")]
    #[case("run <code>cargo test</code>", "run `cargo test`")]
    #[case("<span>plain <span>nested</span></span>", "plain nested")]
    #[case(r#"<a href="https://example.com">  the
        site </a>"#, "[the site](https://example.com)")]
    #[case("<a>text</a>", "text")]
    #[case(r#"<a href="">text</a>"#, "text")]
    #[case("one<br>two", "one  \ntwo")]
    fn test_inline(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(inline(html), expected);
    }

    #[test]
    fn test_emphasis_composition() {
        assert_eq!(
            inline("<strong>outer <em>inner</em> text</strong>"),
            "**outer *inner* text**"
        );
    }

    #[test]
    fn test_index_term_is_invisible() {
        assert_eq!(
            inline(r#"Ownership<a class="indexterm" id="ix1">ownership</a> rules"#),
            "Ownership rules"
        );
        assert_eq!(inline(r#"a<span class="indexterm"><b>b</b></span>c"#), "ac");
    }

    #[test]
    fn test_hidden_inline_is_skipped() {
        assert_eq!(inline(r#"shown <span style="display:none">hidden</span>"#), "shown ");
    }

    #[test]
    fn test_text_is_not_trimmed() {
        assert_eq!(inline("  padded  "), " padded ");
    }
}
