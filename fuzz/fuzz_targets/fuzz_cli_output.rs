#![no_main]

//! Presentation paths (list rows, board cells, markdown export) with
//! arbitrary Unicode titles and notes. Catches byte slicing on multi-byte
//! characters in truncation and id shortening.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tempfile::tempdir;

use remindme::board::{bucket_by_day, BoardWindow};
use remindme::commands::board::render;
use remindme::commands::export::render_markdown;
use remindme::commands::list::format_row;
use remindme::dates::{add_days, decode_key};
use remindme::{AssignmentStore, Database, NewAssignment, Timetable};

#[derive(Arbitrary, Debug)]
struct CliOutputInput {
    /// Assignment title - can contain any Unicode
    title: String,
    /// Notes - can contain any Unicode
    notes: Option<String>,
    /// Number of assignments to create
    count: u8,
    /// Due date offset in days from the base date
    offset: i16,
}

fuzz_target!(|input: CliOutputInput| {
    let count = (input.count % 20).max(1);

    let dir = match tempdir() {
        Ok(d) => d,
        Err(_) => return,
    };
    let db = match Database::open(&dir.path().join("remindme.db")) {
        Ok(d) => d,
        Err(_) => return,
    };
    let timetable = match Timetable::builtin() {
        Ok(t) => t,
        Err(_) => return,
    };
    let base = match decode_key("2024-03-11") {
        Ok(d) => d,
        Err(_) => return,
    };

    let mut store = AssignmentStore::load(db).with_subjects(timetable.subject_set());
    for i in 0..count {
        let due = add_days(base, input.offset as i64 % 60 + i as i64);
        let mut new = NewAssignment::new(format!("{} #{}", input.title, i), "MAT", due);
        new.notes = input.notes.clone();
        new.pinned = i % 3 == 0;
        let _ = store.add(new);
    }

    let all = store.all();
    for a in &all {
        let _ = format_row(a, base);
    }

    let window = BoardWindow::current(base);
    let cells = window.cells(&bucket_by_day(&all), base, None);
    let _ = render(&window, &cells, &timetable);
    let _ = render_markdown(&all);
});
