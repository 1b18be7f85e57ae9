// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Local, process-lifetime annotations on transactions and contracts.
//!
//! Nothing here is persisted; the store is rebuilt from transaction history
//! via [`NotesStore::seed`] plus whatever the user adds during the session.

use crate::types::ContractNote;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub note: String,
    pub description: String,
    pub owner: String,
    /// Epoch milliseconds of the last write.
    pub timestamp: i64,
}

#[derive(Default)]
pub struct NotesStore {
    // keeps insertion order so listings are stable
    records: Mutex<Vec<NoteRecord>>,
}

impl NotesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or silently overwrites the note stored under `id`.
    pub fn add_note(&self, id: &str, text: &str, owner: &str, timestamp: i64) -> NoteRecord {
        let record = NoteRecord {
            id: id.to_string(),
            note: text.to_string(),
            description: text.to_string(),
            owner: owner.to_string(),
            timestamp,
        };

        let mut records = self.records.lock();
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        info!("NotesStore::add_note | stored note for {}", id);
        record
    }

    /// Returns `false` and leaves the store untouched when `id` is absent.
    pub fn update_note(&self, id: &str, text: &str, timestamp: i64) -> bool {
        let mut records = self.records.lock();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.note = text.to_string();
                record.description = text.to_string();
                record.timestamp = timestamp;
                info!("NotesStore::update_note | updated note for {}", id);
                true
            }
            None => {
                debug!("NotesStore::update_note | no note for {}, ignoring", id);
                false
            }
        }
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete_note(&self, id: &str) -> bool {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;
        if removed {
            info!("NotesStore::delete_note | deleted note for {}", id);
        } else {
            debug!("NotesStore::delete_note | no note for {}, ignoring", id);
        }
        removed
    }

    pub fn get_by_id(&self, id: &str) -> Option<NoteRecord> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    pub fn get_all(&self) -> Vec<NoteRecord> {
        self.records.lock().clone()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
        info!("NotesStore::clear | all notes removed");
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds notes derived from history for ids the store does not know yet.
    /// Existing records, including user edits, are left as they are.
    pub fn seed<I>(&self, notes: I) -> usize
    where
        I: IntoIterator<Item = ContractNote>,
    {
        let mut records = self.records.lock();
        let mut known: HashSet<String> = records.iter().map(|r| r.id.clone()).collect();

        let mut added = 0;
        for note in notes {
            if !known.insert(note.id.clone()) {
                continue;
            }
            records.push(NoteRecord {
                id: note.id,
                description: note.note.clone(),
                note: note.note,
                owner: note.owner,
                timestamp: note.timestamp,
            });
            added += 1;
        }
        debug!("NotesStore::seed | added {} derived notes", added);
        added
    }
}
