use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::{db_path, REMINDME_DIR, TIMETABLE_FILE};
use crate::db::Database;
use crate::timetable::Timetable;

/// Creates `.remindme/` with an empty store. With `timetable`, also writes
/// the built-in timetable out as an editable override; `force` replaces an
/// existing override.
pub fn run(path: &Path, timetable: bool, force: bool) -> Result<()> {
    let remindme_dir = path.join(REMINDME_DIR);
    let exists = remindme_dir.exists();
    let timetable_path = remindme_dir.join(TIMETABLE_FILE);

    if exists && !timetable {
        println!("Already initialized at {}", path.display());
        println!("Use --timetable to write an editable timetable.");
        return Ok(());
    }

    if !exists {
        fs::create_dir_all(&remindme_dir).context("Failed to create .remindme directory")?;
        Database::open(&db_path(&remindme_dir))?;
        info!(dir = %remindme_dir.display(), "initialized");
        println!("Created {}", remindme_dir.display());
    }

    if timetable {
        if timetable_path.exists() && !force {
            println!(
                "{} already exists. Use --force to replace it.",
                timetable_path.display()
            );
        } else {
            let json = serde_json::to_string_pretty(&Timetable::builtin()?)?;
            fs::write(&timetable_path, json).context("Failed to write timetable.json")?;
            println!("Wrote {}", timetable_path.display());
        }
    }

    if !exists {
        println!("\nNext steps:");
        println!("  remindme pick MAT                       # See when MAT is taught");
        println!("  remindme add \"Essay\" ANJ --on Wed       # Due next ANJ lesson on Wed");
        println!("  remindme board                          # Two-week board");
    }

    Ok(())
}
