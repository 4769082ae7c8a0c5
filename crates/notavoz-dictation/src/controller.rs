//! Dictation session controller.
//!
//! Bridges a streaming, partial-result speech-recognition source to a text
//! buffer, with start/stop control and graceful degradation when the runtime
//! has no engine. One controller is owned by each form instance; sessions are
//! never shared process-wide, so two open dialogs cannot interfere with each
//! other.

use notavoz_core::error::{NotavozError, Result};
use notavoz_core::types::AccumulationMode;
use notavoz_speech::{RecognizerConfig, RecognizerFactory};

use crate::session::{CaptureSession, ErrorFn, UpdateFn};
use crate::state::CaptureState;

/// Controls the lifecycle of one dictation capture at a time.
pub struct DictationController<F: RecognizerFactory> {
    factory: F,
    config: RecognizerConfig,
    session: Option<CaptureSession>,
}

impl<F: RecognizerFactory> DictationController<F> {
    /// Create a controller with the default recognizer configuration
    /// (Portuguese, continuous, interim results, one alternative).
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, RecognizerConfig::default())
    }

    pub fn with_config(factory: F, config: RecognizerConfig) -> Self {
        Self {
            factory,
            config,
            session: None,
        }
    }

    /// Whether a speech-recognition engine is available in this environment.
    ///
    /// Pure query with no side effects; safe to call repeatedly.
    pub fn check_capability(&self) -> bool {
        self.factory.is_available()
    }

    /// Start a new capture session against the given buffer content.
    ///
    /// Preconditions: no session of this controller may currently be
    /// listening, and the capability check must pass. On success the session
    /// is `Listening`; in `Append` mode the buffer content passed here is
    /// fixed as the append base for the whole session.
    pub fn start(
        &mut self,
        buffer: &str,
        mode: AccumulationMode,
        on_update: UpdateFn,
        on_error: ErrorFn,
    ) -> Result<()> {
        if self.session.as_ref().is_some_and(CaptureSession::is_listening) {
            return Err(NotavozError::Dictation(
                "a capture session is already listening".to_string(),
            ));
        }
        if !self.factory.is_available() {
            return Err(NotavozError::Capability(
                "no speech-recognition engine in this environment".to_string(),
            ));
        }

        let handle = self.factory.create(&self.config)?;
        let mut session = CaptureSession::new(mode, buffer, on_update, on_error);
        let session_id = session.id();

        match session.begin(handle) {
            Ok(()) => {
                tracing::info!(
                    session_id = %session_id,
                    mode = ?mode,
                    language = %self.config.language,
                    "Capture session started"
                );
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Recognizer failed to start");
                // Keep the failed session so the caller can observe the Error
                // state and clear it with `stop`.
                self.session = Some(session);
                Err(e)
            }
        }
    }

    /// Stop the current session, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
    }

    /// Drain pending recognizer events in delivery order and apply them.
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> usize {
        self.session.as_mut().map_or(0, CaptureSession::pump)
    }

    /// Current capture state (`Idle` when no session has ever started).
    pub fn state(&self) -> CaptureState {
        self.session
            .as_ref()
            .map_or(CaptureState::Idle, CaptureSession::state)
    }

    pub fn is_listening(&self) -> bool {
        self.state() == CaptureState::Listening
    }

    /// The current or most recent session, if any.
    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use notavoz_speech::MockRecognizerFactory;

    use super::*;

    fn buffer_update(buffer: &Rc<RefCell<String>>) -> UpdateFn {
        let sink = Rc::clone(buffer);
        Box::new(move |value| {
            *sink.borrow_mut() = value.to_string();
        })
    }

    #[test]
    fn test_check_capability() {
        assert!(DictationController::new(MockRecognizerFactory::new()).check_capability());
        assert!(
            !DictationController::new(MockRecognizerFactory::unavailable()).check_capability()
        );
    }

    #[test]
    fn test_start_without_capability_leaves_buffer_unchanged() {
        let mut controller = DictationController::new(MockRecognizerFactory::unavailable());
        let buffer = Rc::new(RefCell::new("manual".to_string()));

        let err = controller
            .start(
                &buffer.borrow().clone(),
                AccumulationMode::Replace,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap_err();

        assert!(matches!(err, NotavozError::Capability(_)));
        assert_eq!(controller.state(), CaptureState::Idle);
        assert!(controller.session().is_none());
        assert_eq!(*buffer.borrow(), "manual");
    }

    #[test]
    fn test_start_then_dictate_replace() {
        let factory = MockRecognizerFactory::new();
        let mut controller = DictationController::new(factory.clone());
        let buffer = Rc::new(RefCell::new(String::new()));

        controller
            .start(
                "",
                AccumulationMode::Replace,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap();
        assert!(controller.is_listening());

        factory.push_transcripts(&["fazer", " compras"]);
        assert_eq!(controller.pump(), 1);
        assert_eq!(*buffer.borrow(), "fazer compras");

        controller.stop();
        assert_eq!(controller.state(), CaptureState::Idle);
    }

    #[test]
    fn test_second_start_while_listening_is_rejected() {
        let factory = MockRecognizerFactory::new();
        let mut controller = DictationController::new(factory.clone());

        controller
            .start(
                "",
                AccumulationMode::Replace,
                Box::new(|_| {}),
                Box::new(|_| {}),
            )
            .unwrap();

        let err = controller
            .start(
                "",
                AccumulationMode::Replace,
                Box::new(|_| {}),
                Box::new(|_| {}),
            )
            .unwrap_err();

        assert!(matches!(err, NotavozError::Dictation(_)));
        // The live session and its handle are untouched.
        assert!(controller.is_listening());
        assert_eq!(factory.start_calls(), 1);
    }

    #[test]
    fn test_restart_after_stop() {
        let factory = MockRecognizerFactory::new();
        let mut controller = DictationController::new(factory.clone());
        let buffer = Rc::new(RefCell::new(String::new()));

        controller
            .start(
                "",
                AccumulationMode::Replace,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap();
        let first_id = controller.session().map(|s| s.id());
        controller.stop();

        controller
            .start(
                "",
                AccumulationMode::Replace,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap();
        assert!(controller.is_listening());
        assert_ne!(controller.session().map(|s| s.id()), first_id);
        assert_eq!(factory.start_calls(), 2);
    }

    #[test]
    fn test_append_mode_base_fixed_at_start() {
        let factory = MockRecognizerFactory::new();
        let mut controller = DictationController::new(factory.clone());
        let buffer = Rc::new(RefCell::new("Hello".to_string()));

        controller
            .start(
                &buffer.borrow().clone(),
                AccumulationMode::Append,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap();

        factory.push_transcripts(&["world"]);
        controller.pump();
        assert_eq!(*buffer.borrow(), "Hello world");

        factory.push_transcripts(&["world wide"]);
        controller.pump();
        assert_eq!(*buffer.borrow(), "Hello world wide");
    }

    #[test]
    fn test_stop_without_session_is_noop() {
        let mut controller = DictationController::new(MockRecognizerFactory::new());
        controller.stop();
        assert_eq!(controller.state(), CaptureState::Idle);
        assert_eq!(controller.pump(), 0);
    }

    #[test]
    fn test_engine_start_failure_reports_error_state() {
        let factory = MockRecognizerFactory::with_start_failure();
        let mut controller = DictationController::new(factory.clone());

        let err = controller
            .start(
                "",
                AccumulationMode::Replace,
                Box::new(|_| {}),
                Box::new(|_| {}),
            )
            .unwrap_err();
        assert!(matches!(err, NotavozError::Engine(_)));
        assert_eq!(controller.state(), CaptureState::Error);

        // stop clears the failed session, after which a working engine could
        // be started again.
        controller.stop();
        assert_eq!(controller.state(), CaptureState::Idle);
    }

    #[test]
    fn test_events_after_controller_stop_are_discarded() {
        let factory = MockRecognizerFactory::new();
        let mut controller = DictationController::new(factory.clone());
        let buffer = Rc::new(RefCell::new(String::new()));

        controller
            .start(
                "",
                AccumulationMode::Replace,
                buffer_update(&buffer),
                Box::new(|_| {}),
            )
            .unwrap();
        factory.push_transcripts(&["antes"]);
        controller.pump();
        controller.stop();

        factory.push_transcripts(&["depois"]);
        assert_eq!(controller.pump(), 0);
        assert_eq!(*buffer.borrow(), "antes");
    }
}
