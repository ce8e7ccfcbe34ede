use crate::codec;
use crate::error::{CorruptionError, NotesError, Result};
use crate::model::Note;
use crate::store::{Bucket, Snapshot, WriteTx};

/// Looks `title` up in the title index.
pub fn resolve_id<T: Snapshot>(tx: &T, title: &str) -> Result<Option<String>> {
    let id = tx.get(Bucket::Titles, title.as_bytes())?;
    Ok(id.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// Reads and decodes the record stored under `id`, if any.
pub fn load_note<T: Snapshot>(tx: &T, id: &str) -> Result<Option<Note>> {
    match tx.get(Bucket::Notes, id.as_bytes())? {
        Some(bytes) => decode_record(id, &bytes).map(Some),
        None => Ok(None),
    }
}

pub fn decode_record(id: &str, bytes: &[u8]) -> Result<Note> {
    codec::decode(bytes).map_err(|source| {
        CorruptionError::UndecodableNote {
            id: id.to_string(),
            source,
        }
        .into()
    })
}

/// Resolves `title` through the index and loads its record, checking that the
/// two agree.
pub fn find_by_title<T: Snapshot>(tx: &T, title: &str) -> Result<Note> {
    let id = resolve_id(tx, title)?.ok_or_else(|| NotesError::NotFound {
        title: title.to_string(),
    })?;

    let note = load_note(tx, &id)?.ok_or_else(|| CorruptionError::DanglingTitle {
        id: id.clone(),
        title: title.to_string(),
    })?;

    if note.title != title || note.key() != id {
        return Err(CorruptionError::MismatchedRecord {
            id,
            indexed: title.to_string(),
            stored: note.title,
        }
        .into());
    }
    Ok(note)
}

/// Encodes `note` and writes it to the content bucket. The title index is
/// left to the caller.
pub fn write_note(tx: &WriteTx, note: &Note) -> Result<()> {
    let bytes = codec::encode(note)?;
    tx.put(Bucket::Notes, note.key().as_bytes(), &bytes)
}
