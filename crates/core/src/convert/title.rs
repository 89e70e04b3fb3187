use scraper::{ElementRef, Selector};

use crate::parse::{Document, collapse_whitespace};

const TITLE_SELECTORS: &str = "h1, h2, h3, .title h1, .title h2, .title";

/// Resolves the chapter title.
///
/// Uses the text of the first `h1`-`h3` or `.title` element under `root`,
/// then the document `<title>`, then `fallback`. The result is
/// whitespace-collapsed.
pub fn resolve_title(document: &Document, root: ElementRef<'_>, fallback: &str) -> String {
    let heading = Selector::parse(TITLE_SELECTORS).ok().and_then(|selector| {
        root.select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    });

    let title = heading.or_else(|| document.title()).unwrap_or_else(|| fallback.to_string());
    collapse_whitespace(&title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn title_of(html: &str) -> String {
        let doc = Document::parse(html);
        let root = doc.element_by_id("c").unwrap();
        resolve_title(&doc, root, "Content")
    }

    #[rstest]
    #[case(r#"<div id="c"><h2>Second</h2><h1>First</h1></div>"#, "Second")]
    #[case(r#"<div id="c"><h4>Deep</h4><h3> Three   words </h3></div>"#, "Three words")]
    #[case(r#"<div id="c"><p class="title">Styled <b>Title</b></p></div>"#, "Styled Title")]
    #[case(r#"<div id="c"><h1>
        Multi
        Line</h1></div>"#, "Multi Line")]
    fn test_heading_title(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(title_of(html), expected);
    }

    #[test]
    fn test_empty_heading_falls_through() {
        let html = r#"<html><head><title>Page</title></head><body><div id="c"><h1> </h1></div></body></html>"#;
        assert_eq!(title_of(html), "Page");
    }

    #[test]
    fn test_document_title_fallback() {
        let html = r#"<html><head><title>Page  Title</title></head><body><div id="c"><p>x</p></div></body></html>"#;
        assert_eq!(title_of(html), "Page Title");
    }

    #[test]
    fn test_literal_fallback() {
        assert_eq!(title_of(r#"<div id="c"><p>x</p></div>"#), "Content");
    }
}
