//! Turning "the next MAT lesson" into a concrete due date.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::dates::{add_days, checked_add_days, encode_key, format, monday_of};
use crate::timetable::{SchoolDay, Timetable};

/// One weekday of the picker week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCandidate {
    pub day: SchoolDay,
    pub date: NaiveDate,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerCell {
    pub slot: String,
    pub subject: Option<String>,
    pub enabled: bool,
}

/// A picker row: one weekday across every slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow {
    pub day: SchoolDay,
    pub date: NaiveDate,
    pub cells: Vec<PickerCell>,
}

/// A resolved pick, ready to store as the due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub due: NaiveDate,
    pub picked_from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    NoClass {
        subject: String,
        day: SchoolDay,
        date: NaiveDate,
    },
}

impl Display for PickError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoClass { subject, day, date } => write!(
                f,
                "{} has no class on {} ({})",
                subject,
                day,
                encode_key(*date)
            ),
        }
    }
}

impl Error for PickError {}

/// Monday through Friday of `week_start`, each marked by whether `subject`
/// is taught that day. `week_start` must be a Monday.
pub fn resolve(timetable: &Timetable, subject: &str, week_start: NaiveDate) -> Vec<DayCandidate> {
    SchoolDay::ALL
        .iter()
        .map(|&day| DayCandidate {
            day,
            date: add_days(week_start, day.index()),
            enabled: timetable.slot_for(day, subject),
        })
        .collect()
}

/// Week the picker opens on. On a weekend the current week has no school
/// days left, so it jumps to the next one.
pub fn default_week(focus: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    let base = focus.unwrap_or(today);
    let base = match SchoolDay::from_weekday(base.weekday()) {
        Some(_) => base,
        None => add_days(base, 7),
    };
    monday_of(base)
}

/// `None` when the shifted week's school days leave the calendar.
pub fn shift_week(week_start: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let start = checked_add_days(week_start, weeks.checked_mul(7)?)?;
    checked_add_days(start, SchoolDay::Fri.index())?;
    Some(start)
}

/// The full timetable for the week with `subject`'s lessons enabled.
pub fn grid(timetable: &Timetable, subject: &str, week_start: NaiveDate) -> Vec<PickerRow> {
    let subject = subject.trim();
    resolve(timetable, subject, week_start)
        .into_iter()
        .map(|candidate| PickerRow {
            day: candidate.day,
            date: candidate.date,
            cells: timetable
                .slots
                .iter()
                .zip(timetable.subjects_on(candidate.day))
                .map(|(slot, taught)| {
                    PickerCell {
                        slot: slot.label.clone(),
                        subject: taught.map(str::to_string),
                        enabled: !subject.is_empty() && taught == Some(subject),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Resolves a weekday of the picker week into a due date and provenance.
pub fn pick(
    timetable: &Timetable,
    subject: &str,
    week_start: NaiveDate,
    day: SchoolDay,
) -> Result<Pick, PickError> {
    let date = add_days(week_start, day.index());
    if !timetable.slot_for(day, subject) {
        return Err(PickError::NoClass {
            subject: subject.trim().to_string(),
            day,
            date,
        });
    }
    Ok(Pick {
        due: date,
        picked_from: format!("{} • {}", timetable.week_name, encode_key(date)),
    })
}

pub fn week_label(timetable: &Timetable, week_start: NaiveDate) -> String {
    format!(
        "{} • {} - {}",
        timetable.week_name,
        format(week_start),
        format(add_days(week_start, 4))
    )
}
