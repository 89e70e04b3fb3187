use scraper::ElementRef;

use crate::parse::Document;
use crate::selection::SelectionSource;

/// Finds the root element to convert.
///
/// Returns `None` when the document has no element with `container_id`.
/// When the selection anchor lies inside a container, the nearest enclosing
/// container is used; otherwise the first container in the document.
pub fn resolve_scope<'a>(
    document: &'a Document,
    container_id: &str,
    selection: &dyn SelectionSource,
) -> Option<ElementRef<'a>> {
    let container = document.element_by_id(container_id)?;

    let Some(anchor) = selection.anchor(document) else {
        return Some(container);
    };

    // Text anchors start the search at their parent element.
    let start = if anchor.value().is_element() { Some(anchor) } else { anchor.parent() };

    let enclosing = start.and_then(|node| {
        std::iter::once(node)
            .chain(node.ancestors())
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(container_id))
    });

    tracing::debug!(from_selection = enclosing.is_some(), "resolved conversion scope");

    Some(enclosing.unwrap_or(container))
}
