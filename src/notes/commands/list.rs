use crate::error::Result;
use crate::model::Note;
use crate::store::{Bucket, Snapshot, Store};
use tracing::debug;

use super::helpers::decode_record;

/// Every stored note, in storage key order (effectively random; sort before
/// showing). A single undecodable record fails the whole listing.
pub fn run(store: &Store) -> Result<Vec<Note>> {
    let notes = store.view(|tx| {
        let mut notes = Vec::new();
        tx.for_each(Bucket::Notes, |key, value| {
            let id = String::from_utf8_lossy(key);
            notes.push(decode_record(&id, value)?);
            Ok(())
        })?;
        Ok(notes)
    })?;
    debug!(count = notes.len(), "notes listed");
    Ok(notes)
}
