use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::commands::short_id;
use crate::dates::{decode_key, format};
use crate::db::BlobStore;
use crate::models::NewAssignment;
use crate::schedule::{default_week, pick};
use crate::store::AssignmentStore;
use crate::timetable::{SchoolDay, Timetable};

/// How the due date was given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueSpec<'a> {
    /// A literal `YYYY-MM-DD`.
    Date(&'a str),
    /// The subject's lesson on `day` in the week containing `week`
    /// (the current week when absent).
    Lesson { day: &'a str, week: Option<&'a str> },
}

/// Turns a [`DueSpec`] into a date plus the provenance label to store.
/// A literal date has no label; the store fills in "manual".
pub fn resolve_due(
    timetable: &Timetable,
    subject: &str,
    spec: DueSpec<'_>,
    today: NaiveDate,
) -> Result<(NaiveDate, Option<String>)> {
    match spec {
        DueSpec::Date(key) => Ok((decode_key(key.trim())?, None)),
        DueSpec::Lesson { day, week } => {
            let day: SchoolDay = day.parse()?;
            let focus = week.map(|w| decode_key(w.trim())).transpose()?;
            let week_start = default_week(focus, today);
            let picked = pick(timetable, subject, week_start, day)?;
            Ok((picked.due, Some(picked.picked_from)))
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run<B: BlobStore>(
    store: &mut AssignmentStore<B>,
    timetable: &Timetable,
    title: &str,
    subject: &str,
    due: Option<DueSpec<'_>>,
    notes: Option<&str>,
    pin: bool,
    today: NaiveDate,
) -> Result<()> {
    let spec = match due {
        Some(spec) => spec,
        None => bail!("A due date is required. Use --due YYYY-MM-DD or --on <day>"),
    };
    let (due, picked_from) = resolve_due(timetable, subject.trim(), spec, today)?;

    let mut new = NewAssignment::new(title, subject, due);
    new.notes = notes.map(str::to_string);
    new.pinned = pin;
    new.picked_from = picked_from;

    let added = store.add(new)?;
    println!(
        "Added {} \"{}\" ({}) due {}",
        short_id(&added.id),
        added.title,
        added.subject,
        format(added.due)
    );
    Ok(())
}
