use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::board::{
    bucket_by_day, filter_upcoming, focus_label, order_list, toggle_focus, BoardCell, BoardWindow,
};
use crate::commands::list::format_row;
use crate::dates::{decode_key, format_day_month, format_short};
use crate::db::BlobStore;
use crate::store::AssignmentStore;
use crate::timetable::Timetable;

/// Entries drawn per day before collapsing into "+N more".
pub const MAX_PER_CELL: usize = 3;

/// Prints the two-week board starting `weeks` weeks from the current one,
/// followed by the todo list for the focused day (or everything upcoming).
pub fn run<B: BlobStore>(
    store: &AssignmentStore<B>,
    timetable: &Timetable,
    today: NaiveDate,
    weeks: i64,
    on: &[String],
) -> Result<()> {
    let focus = focus_from(on)?;
    let window = match BoardWindow::current(today).shift(weeks) {
        Some(window) => window,
        None => bail!("Week offset out of range"),
    };
    let all = store.all();
    let cells = window.cells(&bucket_by_day(&all), today, focus);

    print!("{}", render(&window, &cells, timetable));

    println!();
    println!("{}", focus_label(focus));
    if let Some(note) = focus_note(&window, focus) {
        println!("{}", note);
    }
    let upcoming = filter_upcoming(&order_list(&all), focus);
    if upcoming.is_empty() {
        println!("Nothing due.");
    }
    for a in &upcoming {
        println!("{}", format_row(a, today));
    }
    Ok(())
}

/// Applies each `--on` date in turn, so naming the focused day again clears
/// it.
fn focus_from(keys: &[String]) -> Result<Option<NaiveDate>> {
    let mut focus = None;
    for key in keys {
        focus = toggle_focus(focus, decode_key(key.trim())?);
    }
    Ok(focus)
}

fn focus_note(window: &BoardWindow, focus: Option<NaiveDate>) -> Option<String> {
    match focus {
        Some(day) if !window.contains(day) => {
            Some(format!("({} is not on this board)", format_short(day)))
        }
        _ => None,
    }
}

pub fn render(window: &BoardWindow, cells: &[BoardCell], timetable: &Timetable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", window.label());

    for (i, cell) in cells.iter().enumerate() {
        if i % 7 == 0 {
            out.push('\n');
        }

        let mut marks = Vec::new();
        if cell.is_today {
            marks.push("today");
        }
        if cell.is_focused {
            marks.push("focus");
        }
        let marks = if marks.is_empty() {
            String::new()
        } else {
            format!(" ({})", marks.join(", "))
        };
        let _ = writeln!(
            out,
            "{} {}{}",
            cell.date.format("%a"),
            format_day_month(cell.date),
            marks
        );

        for a in cell.assignments.iter().take(MAX_PER_CELL) {
            let pin = if a.pinned { "*" } else { " " };
            let _ = writeln!(
                out,
                "  {}{:<4} {} {}",
                pin,
                a.subject,
                a.title,
                timetable.color_for(&a.subject)
            );
        }
        if cell.assignments.len() > MAX_PER_CELL {
            let _ = writeln!(out, "   +{} more", cell.assignments.len() - MAX_PER_CELL);
        }
    }

    out
}
