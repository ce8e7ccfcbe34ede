use crate::model::Note;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Created,
    #[default]
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Title => "title",
            SortField::Created => "created",
            SortField::Modified => "modified",
        };
        f.write_str(name)
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "created" => Ok(SortField::Created),
            "modified" => Ok(SortField::Modified),
            other => Err(format!(
                "unknown sort field '{}' (expected title, created or modified)",
                other
            )),
        }
    }
}

/// Sorts `notes` in place. The sort is stable, so notes with equal keys keep
/// their relative order in either direction.
pub fn sort_notes(notes: &mut [Note], field: SortField, order: SortOrder) {
    notes.sort_by(|a, b| {
        let ordering = compare(a, b, field);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &Note, b: &Note, field: SortField) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Created => a.created_at.cmp(&b.created_at),
        SortField::Modified => a.modified_at.cmp(&b.modified_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn note(title: &str, created_offset: i64, modified_offset: i64) -> Note {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut note = Note::new(title.into(), String::new());
        note.created_at = base + Duration::minutes(created_offset);
        note.modified_at = base + Duration::minutes(modified_offset);
        note
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    fn sample() -> Vec<Note> {
        vec![note("b", 2, 5), note("a", 1, 9), note("c", 3, 3)]
    }

    #[test]
    fn title_ascending() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Title, SortOrder::Ascending);
        assert_eq!(titles(&notes), vec!["a", "b", "c"]);
    }

    #[test]
    fn title_descending() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Title, SortOrder::Descending);
        assert_eq!(titles(&notes), vec!["c", "b", "a"]);
    }

    #[test]
    fn created_descending_puts_newest_first() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Created, SortOrder::Descending);
        assert_eq!(titles(&notes), vec!["c", "b", "a"]);
    }

    #[test]
    fn modified_ascending_puts_oldest_first() {
        let mut notes = sample();
        sort_notes(&mut notes, SortField::Modified, SortOrder::Ascending);
        assert_eq!(titles(&notes), vec!["c", "b", "a"]);
    }

    #[test]
    fn title_order_is_by_codepoint() {
        let mut notes = vec![note("b", 0, 0), note("B", 0, 0), note("a", 0, 0)];
        sort_notes(&mut notes, SortField::Title, SortOrder::Ascending);
        assert_eq!(titles(&notes), vec!["B", "a", "b"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut notes = vec![note("x", 1, 0), note("y", 1, 0), note("z", 1, 0)];
        sort_notes(&mut notes, SortField::Created, SortOrder::Ascending);
        assert_eq!(titles(&notes), vec!["x", "y", "z"]);

        sort_notes(&mut notes, SortField::Created, SortOrder::Descending);
        assert_eq!(titles(&notes), vec!["x", "y", "z"]);
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!("Created".parse::<SortField>().unwrap(), SortField::Created);
        assert_eq!("modified".parse::<SortField>().unwrap(), SortField::Modified);
        assert!("size".parse::<SortField>().is_err());
    }

    #[test]
    fn reverse_flag_maps_to_descending() {
        assert_eq!(SortOrder::from_reverse(false), SortOrder::Ascending);
        assert_eq!(SortOrder::from_reverse(true), SortOrder::Descending);
    }
}
