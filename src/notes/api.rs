//! # API Facade
//!
//! [`NotesApi`] is the single entry point for note operations. It owns the open
//! [`Store`] and the [`TitleValidator`] built from configuration, and forwards
//! each call to the matching `commands::*::run`.
//!
//! The facade holds no business logic and does no terminal I/O: it takes Rust
//! values and returns Rust values. Repository invariants (title uniqueness,
//! index consistency, all-or-nothing writes) are enforced one layer down, in
//! the commands and the store.

use crate::commands;
use crate::commands::doctor::DoctorReport;
use crate::error::Result;
use crate::model::Note;
use crate::sort::{sort_notes, SortField, SortOrder};
use crate::store::Store;
use crate::validation::TitleValidator;

pub struct NotesApi {
    store: Store,
    validator: TitleValidator,
}

impl NotesApi {
    pub fn new(store: Store, validator: TitleValidator) -> Self {
        Self { store, validator }
    }

    pub fn create_note(&self, title: String, content: String) -> Result<Note> {
        commands::create::run(&self.store, &self.validator, title, content)
    }

    pub fn get_note(&self, title: &str) -> Result<Note> {
        commands::get::run(&self.store, title)
    }

    /// Persists a new content for `note`. Only `content` is taken from the
    /// argument; the returned note is what the store now holds.
    pub fn update_note(&self, note: &Note) -> Result<Note> {
        commands::update::run(&self.store, note)
    }

    pub fn delete_note(&self, title: &str) -> Result<()> {
        commands::delete::run(&self.store, title)
    }

    /// All notes in storage order.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        commands::list::run(&self.store)
    }

    pub fn list_sorted(&self, field: SortField, order: SortOrder) -> Result<Vec<Note>> {
        let mut notes = self.list_notes()?;
        sort_notes(&mut notes, field, order);
        Ok(notes)
    }

    pub fn doctor(&self, repair: bool) -> Result<DoctorReport> {
        commands::doctor::run(&self.store, repair)
    }

    pub fn close(self) {
        self.store.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;

    fn api() -> NotesApi {
        NotesApi::new(Store::in_memory().unwrap(), TitleValidator::default())
    }

    #[test]
    fn groceries_lifecycle() {
        let api = api();

        let created = api.create_note("Groceries".into(), String::new()).unwrap();

        let mut fetched = api.get_note("Groceries").unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.content.is_empty());
        assert_eq!(fetched.created_at, fetched.modified_at);

        std::thread::sleep(std::time::Duration::from_millis(2));

        fetched.content = "milk, eggs".into();
        let updated = api.update_note(&fetched).unwrap();
        assert_eq!(updated.content, "milk, eggs");

        let reread = api.get_note("Groceries").unwrap();
        assert_eq!(reread, updated);
        assert_eq!(reread.created_at, created.created_at);
        assert!(reread.modified_at > reread.created_at);

        api.delete_note("Groceries").unwrap();
        assert!(matches!(
            api.get_note("Groceries"),
            Err(NotesError::NotFound { .. })
        ));
        assert!(api.list_notes().unwrap().is_empty());
    }

    #[test]
    fn duplicate_title_rejected() {
        let api = api();
        api.create_note("a".into(), String::new()).unwrap();
        assert!(matches!(
            api.create_note("a".into(), "other".into()),
            Err(NotesError::DuplicateTitle { .. })
        ));
        assert_eq!(api.list_notes().unwrap().len(), 1);
    }

    #[test]
    fn list_sorted_by_title_descending() {
        let api = api();
        for title in ["b", "c", "a"] {
            api.create_note(title.into(), String::new()).unwrap();
        }
        let titles: Vec<_> = api
            .list_sorted(SortField::Title, SortOrder::Descending)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn configured_validator_applies() {
        let api = NotesApi::new(Store::in_memory().unwrap(), TitleValidator::new(3));
        assert!(matches!(
            api.create_note("long".into(), String::new()),
            Err(NotesError::Validation(_))
        ));
    }

    #[test]
    fn doctor_on_fresh_store_is_healthy() {
        assert!(api().doctor(false).unwrap().is_healthy());
    }
}
