//! Notavoz Dictation crate - the dictation session controller.
//!
//! Manages the lifecycle of one speech-to-text capture bound to a text
//! buffer: Idle -> Listening -> Idle, with an Error state for a recognizer
//! handle that failed to start. Single-threaded and event-driven: recognizer
//! events are drained and applied on the host's event loop via `pump`.

pub mod controller;
pub mod session;
pub mod state;

pub use controller::DictationController;
pub use session::{CaptureSession, ErrorFn, UpdateFn};
pub use state::CaptureState;
