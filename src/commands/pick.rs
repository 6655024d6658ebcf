use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::dates::{decode_key, encode_key, format_day_month, format_short};
use crate::schedule::{default_week, grid, resolve, shift_week, week_label, PickerRow};
use crate::timetable::Timetable;

const COLUMN_WIDTH: usize = 12;

/// Shows the week's timetable with `subject`'s lessons highlighted and lists
/// the dates it could be due on.
pub fn run(
    timetable: &Timetable,
    subject: &str,
    today: NaiveDate,
    week: Option<&str>,
    weeks: i64,
) -> Result<()> {
    let subject = subject.trim();
    if !timetable.subject_set().contains(subject) {
        bail!("Subject '{}' is not in the timetable. See 'remindme subjects'", subject);
    }

    let focus = week.map(|w| decode_key(w.trim())).transpose()?;
    let week_start = match shift_week(default_week(focus, today), weeks) {
        Some(start) => start,
        None => bail!("Week offset out of range"),
    };

    println!("{}", week_label(timetable, week_start));
    println!("Subject: {}\n", subject);
    print!("{}", render_grid(timetable, &grid(timetable, subject, week_start)));
    println!();

    let available: Vec<String> = resolve(timetable, subject, week_start)
        .into_iter()
        .filter(|c| c.enabled)
        .map(|c| format!("{} {} ({})", c.day, format_short(c.date), encode_key(c.date)))
        .collect();

    if available.is_empty() {
        println!("{} has no lessons this week.", subject);
    } else {
        println!("Available: {}", available.join(", "));
    }
    Ok(())
}

pub fn render_grid(timetable: &Timetable, rows: &[PickerRow]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<w$}", "", w = COLUMN_WIDTH);
    for slot in &timetable.slots {
        let _ = write!(out, "{:<w$}", slot.label, w = COLUMN_WIDTH);
    }
    out = out.trim_end().to_string();
    out.push('\n');

    for row in rows {
        let mut line = format!(
            "{:<w$}",
            format!("{} {}", row.day, format_day_month(row.date)),
            w = COLUMN_WIDTH
        );
        for cell in &row.cells {
            let text = match (&cell.subject, cell.enabled) {
                (Some(s), true) => format!("[{}]", s),
                (Some(s), false) => s.clone(),
                (None, _) => "-".to_string(),
            };
            let _ = write!(line, "{:<w$}", text, w = COLUMN_WIDTH);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
