//! Titled new-note form: title + content, with Replace-mode dictation.

use std::cell::RefCell;
use std::rc::Rc;

use notavoz_core::error::Result;
use notavoz_core::types::AccumulationMode;
use notavoz_dictation::{DictationController, ErrorFn, UpdateFn};
use notavoz_speech::RecognizerFactory;

use crate::notice::Notice;

/// Invoked with `(title, content)` when a valid note is saved.
pub type NoteCreatedFn = Box<dyn FnMut(&str, &str)>;

/// Form state for creating a titled note.
///
/// The form owns its dictation controller, so two open dialogs never share a
/// capture session. The view is expected to disable the save action while
/// `is_recording` returns true.
pub struct NewNoteForm<F: RecognizerFactory> {
    title: String,
    content: Rc<RefCell<String>>,
    controller: DictationController<F>,
    on_note_created: NoteCreatedFn,
}

impl<F: RecognizerFactory> NewNoteForm<F> {
    pub fn new(controller: DictationController<F>, on_note_created: NoteCreatedFn) -> Self {
        Self {
            title: String::new(),
            content: Rc::new(RefCell::new(String::new())),
            controller,
            on_note_created,
        }
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

    /// Start Replace-mode dictation into the content buffer.
    ///
    /// The running transcript overwrites any manual edits made before capture
    /// started. A `Capability` error maps to [`Notice::SpeechUnsupported`]
    /// via [`Notice::for_error`].
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
            .start(&snapshot, AccumulationMode::Replace, on_update, on_error)
    }

    pub fn stop_recording(&mut self) {
        self.controller.stop();
    }

    /// Drain pending recognizer events into the content buffer.
    pub fn pump(&mut self) -> usize {
        self.controller.pump()
    }

    /// Validate and commit the form.
    ///
    /// Empty title or content rejects the save with no state change;
    /// otherwise `on_note_created` fires exactly once and both fields reset.
    pub fn save(&mut self) -> Notice {
        let content = self.content.borrow().clone();
        if self.title.is_empty() || content.is_empty() {
            tracing::info!("Save rejected: empty title or content");
            return Notice::EmptyTitleOrContent;
        }

        (self.on_note_created)(&self.title, &content);
        self.title.clear();
        self.content.borrow_mut().clear();
        Notice::NoteCreated
    }
}

// =============================================================================
// Tests
// =============================================================================
