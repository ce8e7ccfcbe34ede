use crate::error::Result;
use crate::model::Note;
use crate::store::Store;
use tracing::debug;

use super::helpers::find_by_title;

pub fn run(store: &Store, title: &str) -> Result<Note> {
    let note = store.view(|tx| find_by_title(tx, title))?;
    debug!(id = %note.id, %title, "note fetched");
    Ok(note)
}
