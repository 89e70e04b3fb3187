use scraper::ElementRef;

use super::{Converter, child_elements, is_list};
use crate::tidy::tidy;
use crate::visibility::Visibility;

impl<V: Visibility> Converter<V> {
    /// Emits one block per list item head and one block per nested list.
    ///
    /// Only one level of nesting is modelled: nested items become
    /// two-space-indented lines, and deeper lists are flattened into their
    /// item's text. Nested ordered items are all numbered `1.`.
    pub(super) fn list(&self, list: ElementRef<'_>, ordered: bool, blocks: &mut Vec<String>) {
        let mut index = 1;

        for item in child_elements(list) {
            if item.value().name() != "li" || self.is_hidden(&item) {
                continue;
            }

            let head: String = item
                .children()
                .filter(|child| !is_list(child))
                .map(|child| self.render_inline(child))
                .collect();
            let head = tidy(&head);

            if !head.is_empty() {
                let bullet = if ordered { format!("{}. ", index) } else { "- ".to_string() };
                blocks.push(format!("{}{}", bullet, head));
            }

            for nested in child_elements(item).filter(|child| is_list(child)) {
                if self.is_hidden(&nested) {
                    continue;
                }
                if let Some(lines) = self.nested_list(nested) {
                    blocks.push(lines);
                }
            }

            index += 1;
        }
    }

    fn nested_list(&self, nested: ElementRef<'_>) -> Option<String> {
        let marker = if nested.value().name() == "ol" { "1. " } else { "- " };

        let lines: Vec<String> = child_elements(nested)
            .filter(|item| item.value().name() == "li" && !self.is_hidden(item))
            .map(|item| tidy(&self.inline_children(*item)))
            .filter(|text| !text.is_empty())
            .map(|text| format!("  {}{}", marker, text))
            .collect();

        if lines.is_empty() { None } else { Some(lines.join("\n")) }
    }
}
