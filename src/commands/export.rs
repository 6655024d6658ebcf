use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

use crate::board::order_list;
use crate::dates::{encode_key, format};
use crate::db::BlobStore;
use crate::models::Assignment;
use crate::store::AssignmentStore;

pub const EXPORT_VERSION: i32 = 1;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub version: i32,
    pub exported_at: String,
    pub assignments: Vec<Assignment>,
}

fn write_output(content: &str, output_path: Option<&str>, count: usize) -> Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content).context("Failed to write export file")?;
            eprintln!("Exported {} assignments to {}", count, path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", content)?;
        }
    }
    Ok(())
}

/// Dumps the collection in stored order, in the same record shape the
/// store persists.
pub fn run_json<B: BlobStore>(store: &AssignmentStore<B>, output_path: Option<&str>) -> Result<()> {
    let data = ExportData {
        version: EXPORT_VERSION,
        exported_at: chrono::Utc::now().to_rfc3339(),
        assignments: store.all(),
    };

    let json = serde_json::to_string_pretty(&data)?;
    write_output(&json, output_path, data.assignments.len())
}

pub fn run_markdown<B: BlobStore>(
    store: &AssignmentStore<B>,
    output_path: Option<&str>,
) -> Result<()> {
    let md = render_markdown(&store.all());
    write_output(&md, output_path, store.len())
}

pub fn render_markdown(assignments: &[Assignment]) -> String {
    let mut md = String::new();

    md.push_str("# Assignments Export\n\n");
    md.push_str(&format!(
        "Exported: {}\n\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let ordered = order_list(assignments);
    let upcoming: Vec<_> = ordered.iter().filter(|a| !a.done).collect();
    let done: Vec<_> = ordered.iter().filter(|a| a.done).collect();

    if !upcoming.is_empty() {
        md.push_str("## Upcoming\n\n");
        for a in &upcoming {
            write_assignment_md(&mut md, a);
        }
    }

    if !done.is_empty() {
        md.push_str("## Done\n\n");
        for a in &done {
            write_assignment_md(&mut md, a);
        }
    }

    md
}

fn write_assignment_md(md: &mut String, a: &Assignment) {
    let checkbox = if a.done { "[x]" } else { "[ ]" };
    let pin = if a.pinned { " (pinned)" } else { "" };

    md.push_str(&format!("- {} **{}** {}{}\n", checkbox, a.subject, a.title, pin));
    md.push_str(&format!(
        "  - Due: {} ({})\n",
        format(a.due),
        encode_key(a.due)
    ));
    md.push_str(&format!("  - Picked from: {}\n", a.picked_from));
    if let Some(notes) = &a.notes {
        for line in notes.lines() {
            md.push_str(&format!("  > {}\n", line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use crate::models::NewAssignment;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_json_to_file() {
        let (mut store, _) = setup_store();
        add(&mut store, "Essay", "ANJ", "2024-03-11");
        add(&mut store, "Sheet", "MAT", "2024-03-12");
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("export.json");

        run_json(&store, Some(output_path.to_str().unwrap())).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let data: ExportData = serde_json::from_str(&content).unwrap();
        assert_eq!(data.version, EXPORT_VERSION);
        assert_eq!(data.assignments, store.all());
        assert!(content.contains("\"dueKey\": \"2024-03-11\""));
        assert!(content.contains("\"exportedAt\""));
    }

    #[test]
    fn test_run_json_empty_store() {
        let (store, _) = setup_store();
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("export.json");

        run_json(&store, Some(output_path.to_str().unwrap())).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let data: ExportData = serde_json::from_str(&content).unwrap();
        assert!(data.assignments.is_empty());
    }

    #[test]
    fn test_run_json_bad_path() {
        let (store, _) = setup_store();
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("missing").join("export.json");
        assert!(run_json(&store, Some(output_path.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_run_markdown_to_file() {
        let (mut store, _) = setup_store();
        add(&mut store, "Essay", "ANJ", "2024-03-11");
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("export.md");

        run_markdown(&store, Some(output_path.to_str().unwrap())).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("# Assignments Export"));
        assert!(content.contains("- [ ] **ANJ** Essay"));
    }

    #[test]
    fn test_markdown_groups_by_status() {
        let (mut store, _) = setup_store();
        add(&mut store, "Open one", "MAT", "2024-03-11");
        let finished = add(&mut store, "Finished one", "MAT", "2024-03-10");
        store.mark_done(&finished.id).unwrap();

        let md = render_markdown(&store.all());
        let upcoming = md.find("## Upcoming").unwrap();
        let done = md.find("## Done").unwrap();
        assert!(upcoming < done);
        assert!(md.contains("- [x] **MAT** Finished one"));
        assert!(md[done..].contains("Finished one"));
        assert!(!md[done..].contains("Open one"));
    }

    #[test]
    fn test_markdown_notes_and_pin() {
        let (mut store, _) = setup_store();
        let mut new = NewAssignment::new("Essay", "ANJ", day("2024-03-11"));
        new.notes = Some("intro\nconclusion".to_string());
        new.pinned = true;
        store.add(new).unwrap();

        let md = render_markdown(&store.all());
        assert!(md.contains("Essay (pinned)"));
        assert!(md.contains("  > intro\n  > conclusion\n"));
        assert!(md.contains("  - Due: Mon, Mar 11, 2024 (2024-03-11)"));
        assert!(md.contains("  - Picked from: manual"));
    }

    #[test]
    fn test_export_unicode_content() {
        let (mut store, _) = setup_store();
        add(&mut store, "Úloha č. 3 🐛", "SJL", "2024-03-11");
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("export.json");

        run_json(&store, Some(output_path.to_str().unwrap())).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        let data: ExportData = serde_json::from_str(&content).unwrap();
        assert_eq!(data.assignments[0].title, "Úloha č. 3 🐛");
    }

    proptest! {
        #[test]
        fn prop_json_is_valid(title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}") {
            let (mut store, _) = setup_store();
            add(&mut store, &title, "MAT", "2024-03-11");
            let dir = tempdir().unwrap();
            let output_path = dir.path().join("export.json");

            run_json(&store, Some(output_path.to_str().unwrap())).unwrap();

            let content = fs::read_to_string(&output_path).unwrap();
            let result: Result<ExportData, _> = serde_json::from_str(&content);
            prop_assert!(result.is_ok());
        }
    }
}
