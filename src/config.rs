use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dates::{decode_key, today};
use crate::timetable::Timetable;

pub const REMINDME_DIR: &str = ".remindme";
pub const DB_FILE: &str = "remindme.db";
pub const TIMETABLE_FILE: &str = "timetable.json";

/// Walks up from `start` until a `.remindme` directory turns up.
pub fn find_remindme_dir(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(REMINDME_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }

        if !current.pop() {
            bail!("Not a remindme directory (or any parent). Run 'remindme init' first.");
        }
    }
}

/// The `.remindme` directory to use. An explicit project directory is taken
/// as-is; otherwise it is searched for from the working directory.
pub fn resolve_dir(project: Option<&Path>) -> Result<PathBuf> {
    match project {
        Some(root) => {
            let dir = root.join(REMINDME_DIR);
            if !dir.is_dir() {
                bail!(
                    "No {} directory in {}. Run 'remindme init' first.",
                    REMINDME_DIR,
                    root.display()
                );
            }
            Ok(dir)
        }
        None => {
            let cwd = std::env::current_dir()?;
            find_remindme_dir(&cwd)
        }
    }
}

pub fn db_path(remindme_dir: &Path) -> PathBuf {
    remindme_dir.join(DB_FILE)
}

/// `timetable.json` inside the directory when present, the built-in one
/// otherwise. A present but broken override is an error, not a fallback.
pub fn load_timetable(remindme_dir: &Path) -> Result<Timetable> {
    let path = remindme_dir.join(TIMETABLE_FILE);
    if !path.exists() {
        return Timetable::builtin();
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let timetable = Timetable::from_json(&raw)
        .with_context(|| format!("Invalid timetable in {}", path.display()))?;
    debug!(path = %path.display(), "loaded timetable override");
    Ok(timetable)
}

/// The local calendar day for this run, or the `YYYY-MM-DD` override.
pub fn resolve_today(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(raw) => decode_key(raw.trim()).context("Invalid --today value"),
        None => Ok(today()),
    }
}
