//! Notavoz Notes crate - host form logic for the note-taking UI.
//!
//! Owns the note store and the three thin form variants that consume the
//! dictation session controller: the titled new-note form, the
//! onboarding-gated content-only form, and the edit form with append
//! semantics. Also provides the user-visible notices and the relative date
//! presentation used by the note list.

pub mod dates;
pub mod edit_note;
pub mod new_note;
pub mod notice;
pub mod onboarding;
pub mod store;

pub use dates::format_distance_pt;
pub use edit_note::{EditNoteForm, NoteEditedFn};
pub use new_note::{NewNoteForm, NoteCreatedFn};
pub use notice::{Notice, NoticeLevel};
pub use onboarding::{ContentCreatedFn, OnboardingNoteForm};
pub use store::NoteStore;
