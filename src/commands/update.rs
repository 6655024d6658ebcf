use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::commands::add::{resolve_due, DueSpec};
use crate::commands::{resolve_id, short_id};
use crate::db::BlobStore;
use crate::models::{AssignmentPatch, PICKED_MANUALLY};
use crate::store::AssignmentStore;
use crate::timetable::Timetable;

/// Field changes requested on the command line.
#[derive(Debug, Default, Clone)]
pub struct UpdateArgs<'a> {
    pub title: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub due: Option<DueSpec<'a>>,
    pub notes: Option<&'a str>,
    pub clear_notes: bool,
    pub pinned: Option<bool>,
}

pub fn run<B: BlobStore>(
    store: &mut AssignmentStore<B>,
    timetable: &Timetable,
    id: &str,
    args: UpdateArgs<'_>,
    today: NaiveDate,
) -> Result<()> {
    if args.notes.is_some() && args.clear_notes {
        bail!("Use either --notes or --clear-notes, not both");
    }

    let id = resolve_id(store, id)?;
    let mut patch = AssignmentPatch {
        title: args.title.map(str::to_string),
        subject: args.subject.map(str::to_string),
        pinned: args.pinned,
        ..Default::default()
    };

    if args.clear_notes {
        patch.notes = Some(None);
    } else if let Some(notes) = args.notes {
        patch.notes = Some(Some(notes.to_string()));
    }

    if let Some(spec) = args.due {
        // A lesson pick needs the subject the assignment will end up with.
        let subject = match args.subject {
            Some(s) => s.trim().to_string(),
            None => store.get(&id).map(|a| a.subject).unwrap_or_default(),
        };
        let (due, picked_from) = resolve_due(timetable, &subject, spec, today)?;
        patch.due = Some(due);
        patch.picked_from = Some(picked_from.unwrap_or_else(|| PICKED_MANUALLY.to_string()));
    }

    if patch.is_empty() {
        bail!("Nothing to update. Use --title, --subject, --due, --on, --notes, --pin or --unpin");
    }

    let updated = store.update(&id, patch)?;
    println!("Updated {} \"{}\"", short_id(&updated.id), updated.title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use proptest::prelude::*;

    // ==================== Unit Tests ====================

    #[test]
    fn test_update_title() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Original", "MAT", "2024-03-11");

        let args = UpdateArgs {
            title: Some("New title"),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, args, day("2024-03-01")).unwrap();

        let updated = store.get(&a.id).unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.created_at, a.created_at);
    }

    #[test]
    fn test_update_nothing_fails() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-11");

        let result = run(&mut store, &timetable, &a.id, UpdateArgs::default(), day("2024-03-01"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Nothing to update"));
    }

    #[test]
    fn test_update_nonexistent() {
        let (mut store, timetable) = setup_store();
        let args = UpdateArgs {
            title: Some("x"),
            ..Default::default()
        };
        let result = run(&mut store, &timetable, "missing", args, day("2024-03-01"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_update_manual_date_resets_provenance() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Sheet", "MAT", "2024-03-11");
        let on = UpdateArgs {
            due: Some(DueSpec::Lesson {
                day: "Tue",
                week: None,
            }),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, on, day("2024-03-11")).unwrap();
        assert_eq!(store.get(&a.id).unwrap().picked_from, "Week A • 2024-03-12");

        let manual = UpdateArgs {
            due: Some(DueSpec::Date("2024-03-20")),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, manual, day("2024-03-11")).unwrap();

        let updated = store.get(&a.id).unwrap();
        assert_eq!(updated.due, day("2024-03-20"));
        assert_eq!(updated.picked_from, PICKED_MANUALLY);
    }

    #[test]
    fn test_update_lesson_uses_new_subject() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Reading", "MAT", "2024-03-11");
        let args = UpdateArgs {
            subject: Some("ANJ"),
            due: Some(DueSpec::Lesson {
                day: "Wed",
                week: None,
            }),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, args, day("2024-03-11")).unwrap();

        let updated = store.get(&a.id).unwrap();
        assert_eq!(updated.subject, "ANJ");
        assert_eq!(updated.due, day("2024-03-13"));
    }

    #[test]
    fn test_update_notes_and_clear() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-11");

        let set = UpdateArgs {
            notes: Some("page 42"),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, set, day("2024-03-01")).unwrap();
        assert_eq!(store.get(&a.id).unwrap().notes.as_deref(), Some("page 42"));

        let clear = UpdateArgs {
            clear_notes: true,
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, clear, day("2024-03-01")).unwrap();
        assert_eq!(store.get(&a.id).unwrap().notes, None);
    }

    #[test]
    fn test_update_notes_conflict() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-11");
        let args = UpdateArgs {
            notes: Some("x"),
            clear_notes: true,
            ..Default::default()
        };
        assert!(run(&mut store, &timetable, &a.id, args, day("2024-03-01")).is_err());
    }

    #[test]
    fn test_update_pin_toggle() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-11");

        let pin = UpdateArgs {
            pinned: Some(true),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, pin, day("2024-03-01")).unwrap();
        assert!(store.get(&a.id).unwrap().pinned);

        let unpin = UpdateArgs {
            pinned: Some(false),
            ..Default::default()
        };
        run(&mut store, &timetable, &a.id, unpin, day("2024-03-01")).unwrap();
        assert!(!store.get(&a.id).unwrap().pinned);
    }

    #[test]
    fn test_update_invalid_subject_leaves_record() {
        let (mut store, timetable) = setup_store();
        let a = add(&mut store, "Essay", "ANJ", "2024-03-11");
        let args = UpdateArgs {
            title: Some("Changed"),
            subject: Some("ART"),
            ..Default::default()
        };
        assert!(run(&mut store, &timetable, &a.id, args, day("2024-03-01")).is_err());
        assert_eq!(store.get(&a.id).unwrap(), a);
    }

    // ==================== Property-Based Tests ====================

    proptest! {
        #[test]
        fn prop_update_title_roundtrip(title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}") {
            let (mut store, timetable) = setup_store();
            let a = add(&mut store, "Old", "MAT", "2024-03-11");
            let args = UpdateArgs {
                title: Some(&title),
                ..Default::default()
            };
            run(&mut store, &timetable, &a.id, args, day("2024-03-01")).unwrap();
            prop_assert_eq!(store.get(&a.id).unwrap().title, title.trim());
        }
    }
}
