//! Tree Utilities
//!
//! Helpers for rendering the nested row tree.

use crate::models::{Cell, Row};
use std::collections::HashSet;

/// Pixel offset of one nesting level, applied to a row's first text field.
pub fn indent_px(level: u32) -> u32 {
    level * 24
}

/// Flatten the nested row tree in pre-order (parent before its children).
///
/// A row id that was already emitted is skipped, so a server response that
/// serves the same row twice renders it once instead of duplicating or
/// looping over its subtree.
pub fn flatten_rows(rows: &[Row]) -> Vec<Row> {
    fn collect(rows: &[Row], seen: &mut HashSet<u32>, out: &mut Vec<Row>) {
        for row in rows {
            if !seen.insert(row.id) {
                continue;
            }
            out.push(row.clone());
            collect(&row.children, seen, out);
        }
    }

    let mut out = Vec::new();
    collect(rows, &mut HashSet::new(), &mut out);
    out
}

/// Total number of rows in the tree, descendants included.
pub fn count_rows(rows: &[Row]) -> usize {
    rows.iter().map(|row| 1 + count_rows(&row.children)).sum()
}

/// The cell of `row` for `period_id`, if the server sent one.
pub fn find_cell(row: &Row, period_id: u32) -> Option<&Cell> {
    row.cells.iter().find(|cell| cell.period_id == period_id)
}
