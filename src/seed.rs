use crate::table::{CellValue, Column, Row, TabularView};
use chrono::NaiveDate;

pub const ROWS_PER_PAGE: usize = 8;

fn row(pairs: Vec<(&str, CellValue)>) -> Row {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> CellValue {
    let text = NaiveDate::from_ymd_opt(y, m, d)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    CellValue::Text(text)
}

/// Dummy user accounts for the admin view.
pub fn users_view() -> TabularView {
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("plan", "Plan"),
        Column::new("joined", "Joined"),
    ];
    let rows = vec![
        row(vec![
            ("id", 1.into()),
            ("name", "Alice Hart".into()),
            ("email", "alice@example.com".into()),
            ("plan", "Premium".into()),
            ("joined", date(2025, 1, 12)),
        ]),
        row(vec![
            ("id", 2.into()),
            ("name", "Ben Okafor".into()),
            ("email", "ben@example.com".into()),
            ("plan", "Free".into()),
            ("joined", date(2025, 2, 3)),
        ]),
        row(vec![
            ("id", 3.into()),
            ("name", "Clara Voss".into()),
            ("email", "clara@example.com".into()),
            ("plan", "Premium".into()),
            ("joined", date(2025, 2, 19)),
        ]),
        row(vec![
            ("id", 4.into()),
            ("name", "Deepak Rao".into()),
            ("email", "deepak@example.com".into()),
            ("plan", "Free".into()),
            ("joined", date(2025, 3, 7)),
        ]),
        row(vec![
            ("id", 5.into()),
            ("name", "Elena Petrov".into()),
            ("email", "elena@example.com".into()),
            ("plan", "Free".into()),
            ("joined", date(2025, 4, 1)),
        ]),
        row(vec![
            ("id", 6.into()),
            ("name", "Farid Nasser".into()),
            ("email", "farid@example.com".into()),
            ("plan", "Premium".into()),
            ("joined", date(2025, 4, 28)),
        ]),
        row(vec![
            ("id", 7.into()),
            ("name", "Grace Lin".into()),
            ("email", "grace@example.com".into()),
            ("plan", "Free".into()),
            ("joined", date(2025, 5, 16)),
        ]),
        row(vec![
            ("id", 8.into()),
            ("name", "Hugo Meyer".into()),
            ("email", "hugo@example.com".into()),
            ("plan", "Free".into()),
            ("joined", date(2025, 6, 2)),
        ]),
        row(vec![
            ("id", 9.into()),
            ("name", "Iris Kato".into()),
            ("email", "iris@example.com".into()),
            ("plan", "Premium".into()),
            ("joined", date(2025, 6, 24)),
        ]),
    ];
    TabularView::new(rows, columns, ROWS_PER_PAGE).with_searchable_keys(&["name", "email", "plan"])
}

/// Uploaded course PDFs.
pub fn files_view() -> TabularView {
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("name", "File"),
        Column::new("folder", "Folder"),
        Column::new("size_kb", "Size (KB)"),
        Column::new("uploaded", "Uploaded"),
    ];
    let rows = vec![
        row(vec![
            ("id", 1.into()),
            ("name", "linear-algebra-notes.pdf".into()),
            ("folder", "Mathematics".into()),
            ("size_kb", 842.into()),
            ("uploaded", date(2025, 5, 2)),
        ]),
        row(vec![
            ("id", 2.into()),
            ("name", "organic-chem-ch3.pdf".into()),
            ("folder", "Chemistry".into()),
            ("size_kb", 1520.into()),
            ("uploaded", date(2025, 5, 9)),
        ]),
        row(vec![
            ("id", 3.into()),
            ("name", "rust-ownership.pdf".into()),
            ("folder", "Programming".into()),
            ("size_kb", 310.into()),
            ("uploaded", date(2025, 5, 21)),
        ]),
        row(vec![
            ("id", 4.into()),
            ("name", "microeconomics-week4.pdf".into()),
            ("folder", "Economics".into()),
            ("size_kb", 978.into()),
            ("uploaded", date(2025, 6, 3)),
        ]),
        row(vec![
            ("id", 5.into()),
            ("name", "signals-and-systems.pdf".into()),
            ("folder", "Engineering".into()),
            ("size_kb", 2044.into()),
            ("uploaded", date(2025, 6, 15)),
        ]),
        row(vec![
            ("id", 6.into()),
            ("name", "world-history-1900s.pdf".into()),
            ("folder", "History".into()),
            ("size_kb", 655.into()),
            ("uploaded", date(2025, 7, 1)),
        ]),
    ];
    TabularView::new(rows, columns, ROWS_PER_PAGE).with_searchable_keys(&["name", "folder"])
}

/// Shared and private folders.
pub fn folders_view() -> TabularView {
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("name", "Folder"),
        Column::new("owner", "Owner"),
        Column::new("files", "Files"),
        Column::new("visibility", "Visibility"),
    ];
    let rows = vec![
        row(vec![
            ("id", 1.into()),
            ("name", "Mathematics".into()),
            ("owner", "Alice Hart".into()),
            ("files", 14.into()),
            ("visibility", "Public".into()),
        ]),
        row(vec![
            ("id", 2.into()),
            ("name", "Chemistry".into()),
            ("owner", "Ben Okafor".into()),
            ("files", 9.into()),
            ("visibility", "Private".into()),
        ]),
        row(vec![
            ("id", 3.into()),
            ("name", "Programming".into()),
            ("owner", "Clara Voss".into()),
            ("files", 22.into()),
            ("visibility", "Public".into()),
        ]),
        row(vec![
            ("id", 4.into()),
            ("name", "Economics".into()),
            ("owner", "Deepak Rao".into()),
            ("files", 6.into()),
            ("visibility", "Public".into()),
        ]),
        row(vec![
            ("id", 5.into()),
            ("name", "Engineering".into()),
            ("owner", "Elena Petrov".into()),
            ("files", 11.into()),
            ("visibility", "Private".into()),
        ]),
        row(vec![
            ("id", 6.into()),
            ("name", "History".into()),
            ("owner", "Grace Lin".into()),
            ("files", 4.into()),
            ("visibility", "Public".into()),
        ]),
    ];
    TabularView::new(rows, columns, ROWS_PER_PAGE).with_searchable_keys(&["name", "owner", "visibility"])
}

/// Subscription payments; the amount/status columns back the payment
/// scenarios in the table tests.
pub fn subscriptions_view() -> TabularView {
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("user", "User"),
        Column::new("plan", "Plan"),
        Column::new("amount", "Amount"),
        Column::new("status", "Status"),
        Column::new("renewed", "Renewed"),
    ];
    let rows = vec![
        row(vec![
            ("id", 1.into()),
            ("user", "Alice Hart".into()),
            ("plan", "Premium Annual".into()),
            ("amount", 99.into()),
            ("status", "Paid".into()),
            ("renewed", date(2025, 1, 12)),
        ]),
        row(vec![
            ("id", 2.into()),
            ("user", "Clara Voss".into()),
            ("plan", "Premium Monthly".into()),
            ("amount", 12.into()),
            ("status", "Paid".into()),
            ("renewed", date(2025, 8, 1)),
        ]),
        row(vec![
            ("id", 3.into()),
            ("user", "Farid Nasser".into()),
            ("plan", "Premium Monthly".into()),
            ("amount", 12.into()),
            ("status", "Pending".into()),
            ("renewed", date(2025, 8, 3)),
        ]),
        row(vec![
            ("id", 4.into()),
            ("user", "Iris Kato".into()),
            ("plan", "Premium Annual".into()),
            ("amount", 99.into()),
            ("status", "Overdue".into()),
            ("renewed", date(2024, 9, 24)),
        ]),
        row(vec![
            ("id", 5.into()),
            ("user", "Hugo Meyer".into()),
            ("plan", "Premium Monthly".into()),
            ("amount", 12.into()),
            ("status", "Cancelled".into()),
            ("renewed", date(2025, 6, 2)),
        ]),
    ];
    TabularView::new(rows, columns, ROWS_PER_PAGE).with_searchable_keys(&["user", "plan", "status"])
}

/// Recent activity log entries.
pub fn logs_view() -> TabularView {
    let columns = vec![
        Column::new("id", "ID"),
        Column::new("when", "When"),
        Column::new("user", "User"),
        Column::new("action", "Action"),
        Column::new("target", "Target"),
    ];
    let rows = vec![
        row(vec![
            ("id", 1.into()),
            ("when", date(2025, 8, 28)),
            ("user", "Alice Hart".into()),
            ("action", "upload".into()),
            ("target", "linear-algebra-notes.pdf".into()),
        ]),
        row(vec![
            ("id", 2.into()),
            ("when", date(2025, 8, 28)),
            ("user", "Ben Okafor".into()),
            ("action", "share".into()),
            ("target", "Chemistry".into()),
        ]),
        row(vec![
            ("id", 3.into()),
            ("when", date(2025, 8, 29)),
            ("user", "Clara Voss".into()),
            ("action", "generate-quiz".into()),
            ("target", "rust-ownership.pdf".into()),
        ]),
        row(vec![
            ("id", 4.into()),
            ("when", date(2025, 8, 29)),
            ("user", "Grace Lin".into()),
            ("action", "collect".into()),
            ("target", "Programming".into()),
        ]),
        row(vec![
            ("id", 5.into()),
            ("when", date(2025, 8, 30)),
            ("user", "Deepak Rao".into()),
            ("action", "delete".into()),
            ("target", "old-syllabus.pdf".into()),
        ]),
        row(vec![
            ("id", 6.into()),
            ("when", date(2025, 8, 30)),
            ("user", "Iris Kato".into()),
            ("action", "login".into()),
            ("target", "-".into()),
        ]),
    ];
    TabularView::new(rows, columns, ROWS_PER_PAGE).with_searchable_keys(&["user", "action", "target"])
}

/// The demo document a quiz runs against when no backend row was
/// picked.
pub const DEMO_DOCUMENT_ID: &str = "3";
pub const DEMO_DOCUMENT_NAME: &str = "rust-ownership.pdf";
pub const DEMO_NUM_QUESTIONS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listing_has_rows_and_columns() {
        for view in [
            users_view(),
            files_view(),
            folders_view(),
            subscriptions_view(),
            logs_view(),
        ] {
            assert!(!view.columns().is_empty());
            assert!(view.derive().total_count > 0);
        }
    }

    #[test]
    fn test_subscription_status_search_finds_paid_rows() {
        let mut view = subscriptions_view();
        view.set_search("paid");
        assert_eq!(view.derive().total_count, 2);
    }

    #[test]
    fn test_seed_rows_resolve_every_column_key() {
        let view = users_view();
        let keys: Vec<String> = view.columns().iter().map(|c| c.key.clone()).collect();
        for r in view.derive().visible_rows {
            for key in &keys {
                assert!(r.contains_key(key), "missing key {}", key);
            }
        }
    }
}
