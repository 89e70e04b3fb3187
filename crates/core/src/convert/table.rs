use scraper::ElementRef;

use super::{Converter, child_elements, descendant_elements};
use crate::tidy::tidy;
use crate::visibility::Visibility;

impl<V: Visibility> Converter<V> {
    /// Renders a pipe table, or `None` when the table has no rows.
    ///
    /// Rows are gathered from the whole subtree, so rows wrapped in
    /// `thead`/`tbody` are found, and rows of nested tables are flattened
    /// into this one. The first row is the header.
    pub(super) fn table(&self, table: ElementRef<'_>) -> Option<String> {
        let rows: Vec<Vec<String>> = descendant_elements(table)
            .filter(|el| el.value().name() == "tr" && !self.excluded_within(*el, table))
            .map(|row| self.row_cells(row))
            .collect();

        let (header, body) = rows.split_first()?;

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(pipe_row(header));
        lines.push(pipe_row(&vec!["---".to_string(); header.len()]));
        lines.extend(body.iter().map(|cells| pipe_row(cells)));

        Some(lines.join("\n"))
    }

    fn row_cells(&self, row: ElementRef<'_>) -> Vec<String> {
        child_elements(row).map(|cell| tidy(&self.render_inline(*cell))).collect()
    }
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
