use anyhow::{bail, Result};

use crate::commands::{resolve_id, short_id};
use crate::db::BlobStore;
use crate::store::AssignmentStore;

/// Marks an assignment done. There is no way back; a finished assignment
/// only leaves the store through `delete`.
pub fn run<B: BlobStore>(store: &mut AssignmentStore<B>, id: &str) -> Result<()> {
    let id = resolve_id(store, id)?;
    let assignment = match store.get(&id) {
        Some(a) => a,
        None => bail!("Assignment {} not found", id),
    };

    if assignment.done {
        println!("{} \"{}\" is already done", short_id(&id), assignment.title);
        return Ok(());
    }

    store.mark_done(&id)?;
    println!("Done: {} \"{}\"", short_id(&id), assignment.title);
    Ok(())
}
