//! Onboarding-gated, content-only new-note form.
//!
//! Shows an onboarding prompt ("grave uma nota em áudio ou utilize apenas
//! texto") until the user picks typing or recording; clearing the content
//! brings the prompt back.

use std::cell::RefCell;
use std::rc::Rc;

use notavoz_core::error::Result;
use notavoz_core::types::AccumulationMode;
use notavoz_dictation::{DictationController, ErrorFn, UpdateFn};
use notavoz_speech::RecognizerFactory;

use crate::notice::Notice;

/// Invoked with the content when a valid note is saved.
pub type ContentCreatedFn = Box<dyn FnMut(&str)>;

pub struct OnboardingNoteForm<F: RecognizerFactory> {
    content: Rc<RefCell<String>>,
    show_onboarding: bool,
    controller: DictationController<F>,
    on_note_created: ContentCreatedFn,
}

impl<F: RecognizerFactory> OnboardingNoteForm<F> {
    pub fn new(controller: DictationController<F>, on_note_created: ContentCreatedFn) -> Self {
        Self {
            content: Rc::new(RefCell::new(String::new())),
            show_onboarding: true,
            controller,
            on_note_created,
        }
    }

    pub fn should_show_onboarding(&self) -> bool {
        self.show_onboarding
    }

    /// The user chose to type the note.
    pub fn start_editor(&mut self) {
        self.show_onboarding = false;
    }

    pub fn content(&self) -> String {
        self.content.borrow().clone()
    }

    /// Manual edit. Clearing the content re-shows the onboarding prompt.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content.is_empty() {
            self.show_onboarding = true;
        }
        *self.content.borrow_mut() = content;
    }

    pub fn is_recording(&self) -> bool {
        self.controller.is_listening()
    }

    /// The user chose to dictate the note. Replace-mode capture.
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
            .start(&snapshot, AccumulationMode::Replace, on_update, on_error)?;
        self.show_onboarding = false;
        Ok(())
    }

    pub fn stop_recording(&mut self) {
        self.controller.stop();
    }

    pub fn pump(&mut self) -> usize {
        self.controller.pump()
    }

    /// Validate and commit. The created note carries no title.
    pub fn save(&mut self) -> Notice {
        let content = self.content.borrow().clone();
        if content.is_empty() {
            tracing::info!("Save rejected: empty content");
            return Notice::EmptyTitleOrContent;
        }

        (self.on_note_created)(&content);
        self.content.borrow_mut().clear();
        self.show_onboarding = true;
        Notice::NoteCreated
    }
}

// =============================================================================
// Tests
// =============================================================================
