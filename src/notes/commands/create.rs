use crate::error::{NotesError, Result};
use crate::model::Note;
use crate::store::{Bucket, Snapshot, Store};
use crate::validation::TitleValidator;
use tracing::debug;

use super::helpers::write_note;

/// Validates `title`, then writes the record and its index entry in one
/// transaction. Nothing is written if the title is taken.
pub fn run(
    store: &Store,
    validator: &TitleValidator,
    title: String,
    content: String,
) -> Result<Note> {
    validator.validate(&title)?;

    let note = store.update(move |tx| {
        if tx.get(Bucket::Titles, title.as_bytes())?.is_some() {
            return Err(NotesError::DuplicateTitle { title });
        }

        let note = Note::new(title, content);
        write_note(tx, &note)?;
        tx.put(Bucket::Titles, note.title.as_bytes(), note.key().as_bytes())?;
        Ok(note)
    })?;

    debug!(id = %note.id, title = %note.title, "note created");
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{get, list};
    use crate::validation::ValidationError;

    fn setup() -> (Store, TitleValidator) {
        (Store::in_memory().unwrap(), TitleValidator::default())
    }

    #[test]
    fn creates_note_with_empty_content_by_default() {
        let (store, validator) = setup();
        let note = run(&store, &validator, "new_note".into(), String::new()).unwrap();

        assert_eq!(note.title, "new_note");
        assert!(note.content.is_empty());
        assert_eq!(note.created_at, note.modified_at);
        assert!(note.tags.is_empty());
    }

    #[test]
    fn writes_both_record_and_index_entry() {
        let (store, validator) = setup();
        let note = run(&store, &validator, "Groceries".into(), "milk".into()).unwrap();

        let (record, id) = store
            .view(|tx| {
                Ok((
                    tx.get(Bucket::Notes, note.key().as_bytes())?,
                    tx.get(Bucket::Titles, b"Groceries")?,
                ))
            })
            .unwrap();
        assert!(record.is_some());
        assert_eq!(id, Some(note.key().into_bytes()));
    }

    #[test]
    fn rejects_duplicate_title_and_keeps_original() {
        let (store, validator) = setup();
        let first = run(&store, &validator, "Shopping List".into(), "eggs".into()).unwrap();

        let second = run(&store, &validator, "Shopping List".into(), "other".into());
        assert!(matches!(
            second,
            Err(NotesError::DuplicateTitle { ref title }) if title == "Shopping List"
        ));

        let notes = list::run(&store).unwrap();
        assert_eq!(notes, vec![first.clone()]);
        assert_eq!(get::run(&store, "Shopping List").unwrap(), first);
    }

    #[test]
    fn invalid_title_never_touches_the_store() {
        let (store, validator) = setup();
        let result = run(&store, &validator, "new:note".into(), String::new());

        assert!(matches!(
            result,
            Err(NotesError::Validation(ValidationError::IllegalCharacters { .. }))
        ));
        assert!(list::run(&store).unwrap().is_empty());
    }

    #[test]
    fn stores_title_as_supplied() {
        let (store, validator) = setup();
        run(&store, &validator, " padded ".into(), String::new()).unwrap();

        assert!(get::run(&store, " padded ").is_ok());
        assert!(matches!(
            get::run(&store, "padded"),
            Err(NotesError::NotFound { .. })
        ));
    }

    #[test]
    fn titles_are_case_sensitive() {
        let (store, validator) = setup();
        run(&store, &validator, "todo".into(), String::new()).unwrap();
        assert!(run(&store, &validator, "Todo".into(), String::new()).is_ok());
        assert_eq!(list::run(&store).unwrap().len(), 2);
    }
}
