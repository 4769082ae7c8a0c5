//! Edit form for an existing note, with Append-mode dictation.

use std::cell::RefCell;
use std::rc::Rc;

use notavoz_core::error::Result;
use notavoz_core::types::{AccumulationMode, Note, NoteId};
use notavoz_dictation::{DictationController, ErrorFn, UpdateFn};
use notavoz_speech::RecognizerFactory;

use crate::notice::Notice;

/// Invoked with `(id, title, content)` when the edit is saved.
pub type NoteEditedFn = Box<dyn FnMut(NoteId, &str, &str)>;

/// Form state for editing one note.
///
/// Dictation appends to the content as it existed when recording started:
/// the speech portion is replaced wholesale on every result event on top of
/// that fixed base, never stacked.
pub struct EditNoteForm<F: RecognizerFactory> {
    note_id: NoteId,
    title: String,
    content: Rc<RefCell<String>>,
    controller: DictationController<F>,
    on_note_edited: NoteEditedFn,
}

impl<F: RecognizerFactory> EditNoteForm<F> {
    /// Open the form prefilled from an existing note.
    pub fn new(
        controller: DictationController<F>,
        note: &Note,
        on_note_edited: NoteEditedFn,
    ) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone().unwrap_or_default(),
            content: Rc::new(RefCell::new(note.content.clone())),
            controller,
            on_note_edited,
        }
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        *self.content.borrow_mut() = content.into();
    }

    pub fn is_recording(&self) -> bool {
        self.controller.is_listening()
    }

    /// Start Append-mode dictation onto the current content.
    pub fn start_recording(&mut self) -> Result<()> {
        let snapshot = self.content.borrow().clone();
        let sink = Rc::clone(&self.content);
        let on_update: UpdateFn = Box::new(move |value| {
            *sink.borrow_mut() = value.to_string();
        });
        let on_error: ErrorFn = Box::new(|message| {
            tracing::error!(error = %message, "Speech recognition error");
        });
        self.controller
            .start(&snapshot, AccumulationMode::Append, on_update, on_error)
    }

    pub fn stop_recording(&mut self) {
        self.controller.stop();
    }

    pub fn pump(&mut self) -> usize {
        self.controller.pump()
    }

    /// Commit the edit. Fires `on_note_edited` with the current fields; the
    /// form keeps its values so the dialog can stay open.
    pub fn save(&mut self) -> Notice {
        let content = self.content.borrow().clone();
        (self.on_note_edited)(self.note_id, &self.title, &content);
        Notice::NoteEdited
    }
}

// =============================================================================
// Tests
// =============================================================================
