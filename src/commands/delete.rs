use anyhow::{bail, Result};
use std::io::{self, Write};

use crate::commands::{resolve_id, short_id};
use crate::db::BlobStore;
use crate::store::AssignmentStore;

pub fn run<B: BlobStore>(store: &mut AssignmentStore<B>, id: &str, force: bool) -> Result<()> {
    let id = resolve_id(store, id)?;
    let assignment = match store.get(&id) {
        Some(a) => a,
        None => bail!("Assignment {} not found", id),
    };

    if !force {
        print!(
            "Delete {} \"{}\"? [y/N] ",
            short_id(&id),
            assignment.title
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&id)?;
    println!("Deleted {} \"{}\"", short_id(&id), assignment.title);
    Ok(())
}

/// Internal function for testing without stdin interaction
#[cfg(test)]
pub fn run_force<B: BlobStore>(store: &mut AssignmentStore<B>, id: &str) -> Result<()> {
    run(store, id, true)
}
