//! Consistency check between the content bucket and the title index.
//!
//! A healthy store has exactly one index entry per record, naming that record's
//! own title. The check reports:
//!
//! - **dangling titles**: index entries whose id has no record
//! - **orphaned notes**: records no index entry points at under their own title
//! - **mismatched titles**: index entries whose record carries another title or id
//! - **undecodable notes**: records that fail to decode
//!
//! With `repair`, dangling entries are dropped and orphaned notes are indexed
//! again when their title is free, all in a single transaction. Undecodable
//! and mismatched records are only reported.

use crate::error::Result;
use crate::model::Note;
use crate::store::{Bucket, Snapshot, Store};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use super::helpers::decode_record;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub notes_checked: usize,
    pub dangling_titles: Vec<String>,
    pub orphaned_notes: Vec<String>,
    pub mismatched_titles: Vec<String>,
    pub undecodable_notes: Vec<String>,
    pub removed_titles: usize,
    pub reindexed_notes: usize,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.dangling_titles.is_empty()
            && self.orphaned_notes.is_empty()
            && self.mismatched_titles.is_empty()
            && self.undecodable_notes.is_empty()
    }

    pub fn problem_count(&self) -> usize {
        self.dangling_titles.len()
            + self.orphaned_notes.len()
            + self.mismatched_titles.len()
            + self.undecodable_notes.len()
    }
}

pub fn run(store: &Store, repair: bool) -> Result<DoctorReport> {
    if !repair {
        return store.view(|tx| inspect(tx).map(|(report, _)| report));
    }

    store.update(|tx| {
        let (mut report, orphans) = inspect(tx)?;

        for title in &report.dangling_titles {
            if tx.delete(Bucket::Titles, title.as_bytes())? {
                report.removed_titles += 1;
            }
        }

        for note in &orphans {
            if tx.get(Bucket::Titles, note.title.as_bytes())?.is_some() {
                warn!(id = %note.id, title = %note.title, "title taken, leaving note unindexed");
                continue;
            }
            tx.put(Bucket::Titles, note.title.as_bytes(), note.key().as_bytes())?;
            report.reindexed_notes += 1;
        }

        info!(
            removed = report.removed_titles,
            reindexed = report.reindexed_notes,
            "repair finished"
        );
        Ok(report)
    })
}

fn inspect<T: Snapshot>(tx: &T) -> Result<(DoctorReport, Vec<Note>)> {
    let mut report = DoctorReport::default();

    let mut records: HashMap<String, Note> = HashMap::new();
    tx.for_each(Bucket::Notes, |key, value| {
        let id = String::from_utf8_lossy(key).into_owned();
        report.notes_checked += 1;
        match decode_record(&id, value) {
            Ok(note) => {
                records.insert(id, note);
            }
            Err(err) => {
                warn!(%id, error = %err, "undecodable note");
                report.undecodable_notes.push(id);
            }
        }
        Ok(())
    })?;

    let undecodable: HashSet<&str> = report.undecodable_notes.iter().map(String::as_str).collect();
    let mut indexed: HashSet<String> = HashSet::new();
    let mut dangling = Vec::new();
    let mut mismatched = Vec::new();

    tx.for_each(Bucket::Titles, |key, value| {
        let title = String::from_utf8_lossy(key).into_owned();
        let id = String::from_utf8_lossy(value).into_owned();
        match records.get(&id) {
            Some(note) if note.title == title && note.key() == id => {
                indexed.insert(id);
            }
            Some(_) => {
                warn!(%title, %id, "index entry disagrees with its record");
                mismatched.push(title);
            }
            None if undecodable.contains(id.as_str()) => {}
            None => {
                warn!(%title, %id, "index entry without a record");
                dangling.push(title);
            }
        }
        Ok(())
    })?;

    report.dangling_titles = dangling;
    report.mismatched_titles = mismatched;

    let mut orphans: Vec<Note> = records
        .into_iter()
        .filter(|(id, _)| !indexed.contains(id))
        .map(|(_, note)| note)
        .collect();
    orphans.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    report.orphaned_notes = orphans.iter().map(Note::key).collect();

    Ok((report, orphans))
}
