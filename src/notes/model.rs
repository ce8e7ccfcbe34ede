use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single note.
///
/// `id`, `title` and `created_at` never change once the note is stored; only
/// `content` (and with it `modified_at`) is mutable. The title is duplicated in
/// the record so a listing never has to consult the title index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    // Written at creation, not read by any operation yet.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            created_at: now,
            modified_at: now,
            tags: Vec::new(),
        }
    }

    /// The storage key for this note in the content bucket.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}
