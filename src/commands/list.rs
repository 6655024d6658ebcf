use anyhow::Result;
use chrono::NaiveDate;

use crate::board::{filter_upcoming, focus_label, order_list, relative_label};
use crate::commands::{short_id, truncate};
use crate::dates::{decode_key, encode_key};
use crate::db::BlobStore;
use crate::models::Assignment;
use crate::store::AssignmentStore;

const TITLE_WIDTH: usize = 40;

/// The todo list: open assignments in list order, optionally only those due
/// on `on`. With `all`, finished ones are listed too.
pub fn run<B: BlobStore>(
    store: &AssignmentStore<B>,
    today: NaiveDate,
    on: Option<&str>,
    all: bool,
) -> Result<()> {
    let focus = on.map(|key| decode_key(key.trim())).transpose()?;
    let ordered = order_list(&store.all());

    let shown = if all {
        ordered
            .into_iter()
            .filter(|a| focus.map_or(true, |day| a.due == day))
            .collect()
    } else {
        filter_upcoming(&ordered, focus)
    };

    println!("{}", focus_label(focus));
    if shown.is_empty() {
        println!("No assignments found.");
        return Ok(());
    }

    for a in &shown {
        println!("{}", format_row(a, today));
    }

    Ok(())
}

pub fn format_row(a: &Assignment, today: NaiveDate) -> String {
    let marker = if a.pinned { "*" } else { " " };
    let when = if a.done {
        "[done]".to_string()
    } else {
        relative_label(a.due, today).to_string()
    };
    format!(
        "{:<8} {}{:<4} {:<width$} {} {}",
        short_id(&a.id),
        marker,
        a.subject,
        truncate(&a.title, TITLE_WIDTH),
        encode_key(a.due),
        when,
        width = TITLE_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn test_list_empty() {
        let (store, _) = setup_store();
        assert!(run(&store, day("2024-03-11"), None, false).is_ok());
    }

    #[test]
    fn test_list_with_focus() {
        let (mut store, _) = setup_store();
        add(&mut store, "Essay", "ANJ", "2024-03-11");
        assert!(run(&store, day("2024-03-11"), Some("2024-03-11"), false).is_ok());
        assert!(run(&store, day("2024-03-11"), Some("2024-03-11"), true).is_ok());
    }

    #[test]
    fn test_list_bad_focus_date() {
        let (store, _) = setup_store();
        assert!(run(&store, day("2024-03-11"), Some("March 11"), false).is_err());
    }

    #[test]
    fn test_format_row_open() {
        let (mut store, _) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-12");
        let row = format_row(&a, day("2024-03-11"));

        assert!(row.starts_with(short_id(&a.id)));
        assert!(row.contains(" ANJ  Essay"));
        assert!(row.contains("2024-03-12 Tomorrow"));
    }

    #[test]
    fn test_format_row_overdue_and_pinned() {
        let (mut store, _) = setup_store();
        let mut a = add(&mut store, "Worksheet", "MAT", "2024-03-01");
        a.pinned = true;
        let row = format_row(&a, day("2024-03-11"));
        assert!(row.contains("*MAT"));
        assert!(row.ends_with("Overdue"));
    }

    #[test]
    fn test_format_row_done() {
        let (mut store, _) = setup_store();
        let mut a = add(&mut store, "Worksheet", "MAT", "2024-03-20");
        a.done = true;
        assert!(format_row(&a, day("2024-03-11")).ends_with("[done]"));
    }

    #[test]
    fn test_format_row_truncates_long_title() {
        let (mut store, _) = setup_store();
        let a = add(&mut store, &"x".repeat(60), "MAT", "2024-03-20");
        let row = format_row(&a, day("2024-03-11"));
        assert!(row.contains(&format!("{}...", "x".repeat(37))));
        assert!(row.ends_with("9 days"));
    }
}
