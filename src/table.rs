use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A single displayable cell. Listing endpoints return strings and
/// numbers only; anything else is stringified upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// One record in a listing, keyed by column key. Rows with missing
/// keys render as empty cells rather than erroring.
pub type Row = HashMap<String, CellValue>;

#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The derived page handed to the renderer. `page` is the clamped
/// page actually shown, which may differ from the requested one.
#[derive(Debug)]
pub struct TableSlice<'a> {
    pub visible_rows: Vec<&'a Row>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Generic search/sort/paginate engine shared by every listing
/// screen. Owns its search, sort and page state for the lifetime of
/// the screen; rows and columns are fixed at construction.
#[derive(Debug)]
pub struct TabularView {
    rows: Vec<Row>,
    columns: Vec<Column>,
    searchable_keys: Vec<String>,
    rows_per_page: usize,
    search: String,
    sort: Option<(String, SortDirection)>,
    page: usize,
}

impl TabularView {
    pub fn new(rows: Vec<Row>, columns: Vec<Column>, rows_per_page: usize) -> Self {
        let searchable_keys = columns.iter().map(|c| c.key.clone()).collect();
        Self {
            rows,
            columns,
            searchable_keys,
            rows_per_page: rows_per_page.max(1),
            search: String::new(),
            sort: None,
            page: 1,
        }
    }

    /// Restrict free-text search to a subset of the column keys.
    pub fn with_searchable_keys(mut self, keys: &[&str]) -> Self {
        self.searchable_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(k, d)| (k.as_str(), *d))
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Replace the search string. A new search invalidates the old
    /// page context, so the page resets to 1.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.page = 1;
    }

    /// Toggle sort on a column header: same key flips the direction,
    /// a new key starts ascending. The page is intentionally left
    /// alone; re-ordering the same filtered set should not move the
    /// user back to page 1.
    pub fn set_sort(&mut self, key: &str) {
        self.sort = match &self.sort {
            Some((current, SortDirection::Ascending)) if current == key => {
                Some((key.to_string(), SortDirection::Descending))
            }
            _ => Some((key.to_string(), SortDirection::Ascending)),
        };
    }

    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.page = page.clamp(1, total);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn total_pages(&self) -> usize {
        let count = self.filtered_indices().len();
        (count.div_ceil(self.rows_per_page)).max(1)
    }

    fn matches_search(&self, row: &Row) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        self.searchable_keys.iter().any(|key| {
            row.get(key)
                .map(|v| v.display())
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
    }

    fn filtered_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches_search(row))
            .map(|(i, _)| i)
            .collect()
    }

    /// Derive the current page: filter, then stable sort, then slice.
    /// Pure with respect to the view's state; requested pages that
    /// fell out of range are clamped here, not just on navigation.
    pub fn derive(&self) -> TableSlice<'_> {
        let mut indices = self.filtered_indices();

        if let Some((key, direction)) = &self.sort {
            // sort_by is stable, so ties keep their original relative
            // order in both directions.
            indices.sort_by(|&a, &b| {
                let cmp = compare_cells(self.rows[a].get(key), self.rows[b].get(key));
                match direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }

        let total_count = indices.len();
        let total_pages = (total_count.div_ceil(self.rows_per_page)).max(1);
        let page = self.page.clamp(1, total_pages);

        let start = (page - 1) * self.rows_per_page;
        let visible_rows = indices
            .iter()
            .skip(start)
            .take(self.rows_per_page)
            .map(|&i| &self.rows[i])
            .collect();

        TableSlice {
            visible_rows,
            page,
            total_pages,
            total_count,
        }
    }
}

/// Numbers compare numerically when both sides are numeric; anything
/// else falls back to the string form. A missing cell reads as the
/// empty string.
fn compare_cells(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a.and_then(|v| v.as_number()), b.and_then(|v| v.as_number())) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => {
            let sa = a.map(|v| v.display()).unwrap_or_default();
            let sb = b.map(|v| v.display()).unwrap_or_default();
            sa.cmp(&sb)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn payment_rows() -> Vec<Row> {
        (1..=11)
            .map(|i| {
                row(&[
                    ("id", CellValue::from(i as i64)),
                    ("user", CellValue::from(format!("user{}", i))),
                    ("amount", CellValue::from((i * 100) as i64)),
                    (
                        "status",
                        CellValue::from(if i % 2 == 0 { "Paid" } else { "Pending" }),
                    ),
                ])
            })
            .collect()
    }

    fn payment_columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID"),
            Column::new("user", "User"),
            Column::new("amount", "Amount"),
            Column::new("status", "Status"),
        ]
    }

    #[test]
    fn test_eleven_rows_paginate_into_three_pages() {
        let view = TabularView::new(payment_rows(), payment_columns(), 5);
        let slice = view.derive();
        assert_eq!(slice.total_count, 11);
        assert_eq!(slice.total_pages, 3);
        assert_eq!(slice.visible_rows.len(), 5);
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_page(3);
        let slice = view.derive();
        assert_eq!(slice.page, 3);
        assert_eq!(slice.visible_rows.len(), 1);
        assert_eq!(slice.visible_rows[0]["id"], CellValue::from(11i64));
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let rows = vec![
            row(&[("status", "Paid".into())]),
            row(&[("status", "Pending".into())]),
            row(&[("status", "Paid".into())]),
            row(&[("status", "Overdue".into())]),
            row(&[("status", "Cancelled".into())]),
        ];
        let mut view = TabularView::new(rows, vec![Column::new("status", "Status")], 10);
        view.set_search("paid");
        let slice = view.derive();
        assert_eq!(slice.total_count, 2);
        for r in &slice.visible_rows {
            assert_eq!(r["status"], CellValue::from("Paid"));
        }
    }

    #[test]
    fn test_every_visible_row_matches_the_search() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 20);
        view.set_search("pend");
        let slice = view.derive();
        assert_eq!(slice.total_count, 6);
        for r in &slice.visible_rows {
            assert!(r["status"].display().to_lowercase().contains("pend"));
        }
    }

    #[test]
    fn test_empty_search_passes_all_rows() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 20);
        view.set_search("paid");
        view.set_search("");
        assert_eq!(view.derive().total_count, 11);
    }

    #[test]
    fn test_search_only_scans_searchable_keys() {
        let rows = vec![
            row(&[("name", "alice".into()), ("email", "bob@x.com".into())]),
            row(&[("name", "bob".into()), ("email", "alice@x.com".into())]),
        ];
        let columns = vec![Column::new("name", "Name"), Column::new("email", "Email")];
        let mut view = TabularView::new(rows, columns, 10).with_searchable_keys(&["name"]);
        view.set_search("bob");
        let slice = view.derive();
        assert_eq!(slice.total_count, 1);
        assert_eq!(slice.visible_rows[0]["name"], CellValue::from("bob"));
    }

    #[test]
    fn test_search_resets_page_to_one() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_page(3);
        view.set_search("paid");
        let slice = view.derive();
        assert_eq!(slice.page, 1);
        assert_eq!(slice.total_pages, 1);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_page(2);
        view.set_sort("amount");
        assert_eq!(view.derive().page, 2);
    }

    #[test]
    fn test_sort_toggles_direction_on_same_key() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_sort("amount");
        assert_eq!(view.sort(), Some(("amount", SortDirection::Ascending)));
        view.set_sort("amount");
        assert_eq!(view.sort(), Some(("amount", SortDirection::Descending)));
        view.set_sort("amount");
        assert_eq!(view.sort(), Some(("amount", SortDirection::Ascending)));
    }

    #[test]
    fn test_sort_on_new_key_starts_ascending() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_sort("amount");
        view.set_sort("amount");
        view.set_sort("status");
        assert_eq!(view.sort(), Some(("status", SortDirection::Ascending)));
    }

    #[test]
    fn test_numeric_sort_orders_numerically() {
        let rows = vec![
            row(&[("amount", CellValue::from(900i64))]),
            row(&[("amount", CellValue::from(25i64))]),
            row(&[("amount", CellValue::from(100i64))]),
        ];
        let mut view = TabularView::new(rows, vec![Column::new("amount", "Amount")], 10);
        view.set_sort("amount");
        let ordered: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["amount"].display())
            .collect();
        assert_eq!(ordered, vec!["25", "100", "900"]);
    }

    #[test]
    fn test_equal_values_keep_insertion_order() {
        let rows = vec![
            row(&[("id", "a".into()), ("amount", CellValue::from(500i64))]),
            row(&[("id", "b".into()), ("amount", CellValue::from(500i64))]),
            row(&[("id", "c".into()), ("amount", CellValue::from(500i64))]),
        ];
        let columns = vec![Column::new("id", "ID"), Column::new("amount", "Amount")];
        let mut view = TabularView::new(rows, columns, 10);
        view.set_sort("amount");
        let ids: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_descending_keeps_tie_order() {
        let rows = vec![
            row(&[("id", "a".into()), ("amount", CellValue::from(500i64))]),
            row(&[("id", "b".into()), ("amount", CellValue::from(500i64))]),
            row(&[("id", "c".into()), ("amount", CellValue::from(100i64))]),
        ];
        let columns = vec![Column::new("id", "ID"), Column::new("amount", "Amount")];
        let mut view = TabularView::new(rows, columns, 10);
        view.set_sort("amount");
        view.set_sort("amount");
        let ids: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        // Strict pairs invert, the 500/500 tie does not.
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_toggling_direction_twice_restores_order() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 20);
        view.set_sort("status");
        let first: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        view.set_sort("status");
        view.set_sort("status");
        let third: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        assert_eq!(first, third);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_sort("amount");
        view.set_search("paid");
        let a: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        let b: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["id"].display())
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_matches_still_reports_one_page() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_search("no such thing");
        let slice = view.derive();
        assert_eq!(slice.total_count, 0);
        assert_eq!(slice.total_pages, 1);
        assert!(slice.visible_rows.is_empty());
        assert_eq!(slice.page, 1);
    }

    #[test]
    fn test_empty_row_set_reports_one_page() {
        let view = TabularView::new(vec![], payment_columns(), 5);
        let slice = view.derive();
        assert_eq!(slice.total_pages, 1);
        assert!(slice.visible_rows.is_empty());
    }

    #[test]
    fn test_set_page_clamps_both_ends() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.set_page(99);
        assert_eq!(view.derive().page, 3);
        view.set_page(0);
        assert_eq!(view.derive().page, 1);
    }

    #[test]
    fn test_page_never_exceeds_rows_per_page() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 4);
        for page in 1..=4 {
            view.set_page(page);
            assert!(view.derive().visible_rows.len() <= 4);
        }
    }

    #[test]
    fn test_next_and_previous_page_clamp() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 5);
        view.previous_page();
        assert_eq!(view.derive().page, 1);
        for _ in 0..10 {
            view.next_page();
        }
        assert_eq!(view.derive().page, 3);
    }

    #[test]
    fn test_missing_keys_read_as_empty_cells() {
        let rows = vec![
            row(&[("name", "alice".into()), ("role", "admin".into())]),
            row(&[("name", "bob".into())]),
        ];
        let columns = vec![Column::new("name", "Name"), Column::new("role", "Role")];
        let mut view = TabularView::new(rows, columns, 10);
        view.set_sort("role");
        let names: Vec<String> = view
            .derive()
            .visible_rows
            .iter()
            .map(|r| r["name"].display())
            .collect();
        // Empty string sorts before "admin".
        assert_eq!(names, vec!["bob", "alice"]);

        view.set_search("admin");
        assert_eq!(view.derive().total_count, 1);
    }

    #[test]
    fn test_filter_then_sort_then_paginate_compose() {
        let mut view = TabularView::new(payment_rows(), payment_columns(), 2);
        view.set_search("pending");
        view.set_sort("amount");
        view.set_sort("amount"); // descending
        view.set_page(1);
        let slice = view.derive();
        assert_eq!(slice.total_count, 6);
        assert_eq!(slice.total_pages, 3);
        let amounts: Vec<String> = slice
            .visible_rows
            .iter()
            .map(|r| r["amount"].display())
            .collect();
        assert_eq!(amounts, vec!["1100", "900"]);
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from(42i64).display(), "42");
        assert_eq!(CellValue::from(4.5).display(), "4.5");
        assert_eq!(CellValue::from("hello").display(), "hello");
    }

    #[test]
    fn test_cell_value_decodes_from_json() {
        let v: CellValue = serde_json::from_str("\"Paid\"").unwrap();
        assert_eq!(v, CellValue::from("Paid"));
        let n: CellValue = serde_json::from_str("12").unwrap();
        assert_eq!(n, CellValue::from(12i64));
    }
}
