pub mod add;
pub mod board;
pub mod delete;
pub mod done;
pub mod export;
pub mod init;
pub mod list;
pub mod pick;
pub mod show;
pub mod subjects;
pub mod update;

use anyhow::{bail, Result};

use crate::db::BlobStore;
use crate::store::AssignmentStore;

/// Ids are UUIDs; this many leading characters are shown in listings.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Expands a full id or an unambiguous prefix of one.
pub fn resolve_id<B: BlobStore>(store: &AssignmentStore<B>, prefix: &str) -> Result<String> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        bail!("Assignment id must not be empty");
    }

    let items = store.all();
    if let Some(exact) = items.iter().find(|a| a.id == prefix) {
        return Ok(exact.id.clone());
    }

    let matches: Vec<&str> = items
        .iter()
        .map(|a| a.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [] => bail!("Assignment {} not found", prefix),
        [only] => Ok(only.to_string()),
        many => bail!(
            "Assignment id '{}' is ambiguous ({} matches). Use more characters.",
            prefix,
            many.len()
        ),
    }
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
