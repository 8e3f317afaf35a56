//! Process-local note store
//!
//! Assigns sequential ids and stamps notes with the current time. Contents
//! are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use notehub_application::{NoteStore, StoreError};
use notehub_domain::{Note, ValidatedNote};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug)]
pub struct InMemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Snapshot of every stored note, oldest first
    pub fn notes(&self) -> Vec<Note> {
        self.notes
            .lock()
            .map(|notes| notes.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.notes.lock().map(|notes| notes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn insert(&self, note: ValidatedNote) -> Result<Note, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let note = note.into_note(id.to_string(), Utc::now());

        let mut notes = self
            .notes
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        notes.push(note.clone());
        debug!("Stored note {} ({} total)", id, notes.len());

        Ok(note)
    }
}
