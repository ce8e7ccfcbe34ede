use crate::error::{NotesError, Result};
use crate::store::{Bucket, Store};
use tracing::{debug, warn};

use super::helpers::resolve_id;

/// Removes the note titled `title`: its record and its index entry go together
/// in one transaction. An unknown title is an error and leaves the store as is.
pub fn run(store: &Store, title: &str) -> Result<()> {
    store.update(|tx| {
        let id = resolve_id(tx, title)?.ok_or_else(|| NotesError::NotFound {
            title: title.to_string(),
        })?;

        if !tx.delete(Bucket::Notes, id.as_bytes())? {
            warn!(%id, %title, "title index pointed at a missing record");
        }
        tx.delete(Bucket::Titles, title.as_bytes())?;

        debug!(%id, %title, "note deleted");
        Ok(())
    })
}
