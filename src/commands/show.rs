use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::board::relative_label;
use crate::commands::resolve_id;
use crate::dates::{encode_key, format};
use crate::db::BlobStore;
use crate::store::AssignmentStore;
use crate::timetable::Timetable;

pub fn run<B: BlobStore>(
    store: &AssignmentStore<B>,
    timetable: &Timetable,
    id: &str,
    today: NaiveDate,
) -> Result<()> {
    let id = resolve_id(store, id)?;
    let a = match store.get(&id) {
        Some(a) => a,
        None => bail!("Assignment {} not found", id),
    };

    println!("{}", a.title);
    println!("Id: {}", a.id);
    println!(
        "Subject: {} ({})",
        a.subject,
        timetable.color_for(&a.subject)
    );
    if a.done {
        println!("Due: {} [{}]", format(a.due), encode_key(a.due));
        println!("Status: done");
    } else {
        println!(
            "Due: {} [{}] - {}",
            format(a.due),
            encode_key(a.due),
            relative_label(a.due, today)
        );
        println!("Status: open");
    }
    if a.pinned {
        println!("Pinned: yes");
    }
    println!("Picked from: {}", a.picked_from);
    match a.created_at {
        Some(created) => println!("Created: {}", created.format("%Y-%m-%d %H:%M:%S")),
        None => println!("Created: (unknown)"),
    }

    if let Some(notes) = &a.notes {
        println!("\nNotes:");
        for line in notes.lines() {
            println!("  {}", line);
        }
    }

    Ok(())
}
