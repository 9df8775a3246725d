//! Sortable, filterable table views of dashboard rows.
//!
//! A [`TableView`] holds the display text of each cell, the way the rendered
//! table does. Sorting compares numerically whenever both cells contain a
//! parseable number once currency symbols and separators are stripped, and
//! falls back to string order otherwise. Filtering toggles row visibility
//! instead of removing rows, so clearing the filter is lossless.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// One table row: cell text plus a visibility flag driven by the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
    pub visible: bool,
}

impl Row {
    fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Extract a sortable number from display text like `$1,200.50` or `12 h`.
fn numeric_key(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

impl TableView {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows
            .push(Row::new(cells.into_iter().map(Into::into).collect()));
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows not hidden by the current filter, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.visible)
    }

    /// Stable sort on one column. Missing cells sort before present ones.
    pub fn sort_by_column(&mut self, column: usize, order: SortOrder) {
        self.rows.sort_by(|a, b| {
            let av = a.cells.get(column).map(String::as_str).unwrap_or("");
            let bv = b.cells.get(column).map(String::as_str).unwrap_or("");
            let ord = match (numeric_key(av), numeric_key(bv)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => av.cmp(bv),
            };
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    /// Hide rows whose joined text does not contain `needle`
    /// (case-insensitive). An empty needle restores every row.
    pub fn filter(&mut self, needle: &str) {
        let needle = needle.to_lowercase();
        for row in &mut self.rows {
            row.visible =
                needle.is_empty() || row.cells.join(" ").to_lowercase().contains(&needle);
        }
    }

    pub fn clear_filter(&mut self) {
        for row in &mut self.rows {
            row.visible = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_key_strips_currency_noise() {
        assert_eq!(numeric_key("$1,200.50"), Some(1200.50));
        assert_eq!(numeric_key("-3"), Some(-3.0));
        assert_eq!(numeric_key("Acme GmbH"), None);
    }
}
