use crate::error::{NotesError, Result};
use crate::model::Note;
use crate::store::Store;
use chrono::Utc;
use tracing::debug;

use super::helpers::{load_note, write_note};

/// Replaces the content of an existing note.
///
/// Only `content` is taken from `note`; the id selects the stored record and
/// every other field comes from it. `modified_at` moves only when the content
/// actually changes. The title index is never touched, and a note that is not
/// stored is an error rather than an insert.
pub fn run(store: &Store, note: &Note) -> Result<Note> {
    let id = note.key();
    store.update(|tx| {
        let Some(mut stored) = load_note(tx, &id)? else {
            return Err(NotesError::NotFound {
                title: note.title.clone(),
            });
        };

        if stored.content == note.content {
            debug!(%id, "content unchanged, nothing to write");
            return Ok(stored);
        }

        stored.content = note.content.clone();
        stored.modified_at = Utc::now();
        write_note(tx, &stored)?;
        debug!(%id, title = %stored.title, "note updated");
        Ok(stored)
    })
}
