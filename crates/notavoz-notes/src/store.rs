//! In-memory note store, newest first.
//!
//! The store owns the saved notes; the forms only hand it validated data.
//! Persistence is deliberately out of scope.

use notavoz_core::error::{NotavozError, Result};
use notavoz_core::types::{Note, NoteId};

#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a note and place it at the front of the list.
    pub fn create(&mut self, title: Option<String>, content: impl Into<String>) -> Note {
        let note = Note::new(title, content);
        tracing::info!(note_id = %note.id, preview = %note.preview(), "Note saved");
        self.notes.insert(0, note.clone());
        note
    }

    /// Overwrite the title and content of an existing note.
    pub fn edit(
        &mut self,
        id: NoteId,
        title: Option<String>,
        content: impl Into<String>,
    ) -> Result<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| NotavozError::Store(format!("no note with id {}", id)))?;
        note.title = title;
        note.content = content.into();
        tracing::info!(note_id = %id, "Note edited");
        Ok(())
    }

    /// Remove a note, returning it.
    pub fn delete(&mut self, id: NoteId) -> Result<Note> {
        let position = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| NotavozError::Store(format!("no note with id {}", id)))?;
        let note = self.notes.remove(position);
        tracing::info!(note_id = %id, "Note deleted");
        Ok(note)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// All notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
