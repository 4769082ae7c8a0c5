//! Capture sessions: one run of speech-to-text bound to a text buffer.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use notavoz_core::error::Result;
use notavoz_core::types::AccumulationMode;
use notavoz_speech::{RecognizerEvent, RecognizerHandle, ResultEvent};

use crate::state::{CaptureState, StateMachine};

/// Callback invoked with the buffer's new full value on every result event.
pub type UpdateFn = Box<dyn FnMut(&str)>;

/// Callback invoked once per engine-level error event.
pub type ErrorFn = Box<dyn FnMut(&str)>;

/// One active or finished dictation attempt.
///
/// The session exclusively owns its recognizer handle (at most one live
/// handle at any time) and composes the buffer value from each result event
/// according to its accumulation mode. The buffer itself is owned by the
/// surrounding form; the session only pushes new values through `on_update`.
pub struct CaptureSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: StateMachine,
    mode: AccumulationMode,
    /// Buffer content as captured when the session started. The append base
    /// is fixed for the whole session; the speech portion on top of it is
    /// replaced wholesale on every event.
    append_base: String,
    handle: Option<Box<dyn RecognizerHandle>>,
    on_update: UpdateFn,
    on_error: ErrorFn,
    error_count: u32,
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("id", &self.id)
            .field("state", &self.state.current())
            .field("mode", &self.mode)
            .field("has_handle", &self.handle.is_some())
            .field("error_count", &self.error_count)
            .finish()
    }
}

impl CaptureSession {
    pub(crate) fn new(
        mode: AccumulationMode,
        buffer_at_start: &str,
        on_update: UpdateFn,
        on_error: ErrorFn,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: StateMachine::new(),
            mode,
            append_base: buffer_at_start.to_string(),
            handle: None,
            on_update,
            on_error,
            error_count: 0,
        }
    }

    /// Take ownership of the recognizer handle and go live.
    ///
    /// If the handle fails to start, the session parks in `Error` with no
    /// handle attached; a later `stop` clears it back to `Idle`.
    pub(crate) fn begin(&mut self, mut handle: Box<dyn RecognizerHandle>) -> Result<()> {
        self.state.transition(CaptureState::Listening)?;
        if let Err(e) = handle.start() {
            self.state.transition(CaptureState::Error)?;
            return Err(e);
        }
        self.handle = Some(handle);
        Ok(())
    }

    /// Unique identifier for this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the current capture state.
    pub fn state(&self) -> CaptureState {
        self.state.current()
    }

    pub fn is_listening(&self) -> bool {
        self.state.current() == CaptureState::Listening
    }

    pub fn mode(&self) -> AccumulationMode {
        self.mode
    }

    /// Engine error events observed so far.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Returns the elapsed duration of this session in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds() as f32 / 1000.0
    }

    /// Drain pending recognizer events and apply them in delivery order.
    ///
    /// Returns the number of events applied. A no-op once the session has
    /// been stopped: the handle is gone, so late events never reach the
    /// buffer.
    pub fn pump(&mut self) -> usize {
        let mut events = Vec::new();
        if let Some(handle) = self.handle.as_mut() {
            while let Some(event) = handle.poll_event() {
                events.push(event);
            }
        }
        let applied = events.len();
        for event in events {
            match event {
                RecognizerEvent::Result(result) => self.apply_result(&result),
                RecognizerEvent::Error(message) => self.apply_error(&message),
            }
        }
        applied
    }

    /// Apply one result event: recompute the full buffer value from the
    /// event's running transcript and push it through `on_update`.
    pub(crate) fn apply_result(&mut self, event: &ResultEvent) {
        if self.state.current() != CaptureState::Listening {
            tracing::trace!(session_id = %self.id, "Result event after stop discarded");
            return;
        }
        let transcript = event.running_transcript();
        let value = match self.mode {
            AccumulationMode::Replace => transcript,
            AccumulationMode::Append => format!("{} {}", self.append_base, transcript),
        };
        tracing::debug!(
            session_id = %self.id,
            segments = event.segments.len(),
            value_len = value.len(),
            "Transcript updated"
        );
        (self.on_update)(&value);
    }

    /// Apply one engine error event. The session stays in `Listening`;
    /// capture continues until explicitly stopped.
    pub(crate) fn apply_error(&mut self, message: &str) {
        if self.state.current() != CaptureState::Listening {
            tracing::trace!(session_id = %self.id, "Error event after stop discarded");
            return;
        }
        self.error_count += 1;
        tracing::error!(session_id = %self.id, error = %message, "Recognition engine error");
        (self.on_error)(message);
    }

    /// Stop the session. Idempotent: stopping an already-idle session is a
    /// no-op and does not signal the engine again.
    ///
    /// The handle is taken out of the session before the engine stop call
    /// returns control, so an in-flight but not-yet-delivered event can no
    /// longer mutate the buffer.
    pub fn stop(&mut self) {
        match self.state.current() {
            CaptureState::Idle => {}
            CaptureState::Listening => {
                if let Some(mut handle) = self.handle.take() {
                    if let Err(e) = handle.stop() {
                        tracing::warn!(session_id = %self.id, error = %e, "Recognizer stop failed");
                        let _ = self.state.transition(CaptureState::Error);
                        return;
                    }
                }
                let _ = self.state.transition(CaptureState::Idle);
                tracing::info!(
                    session_id = %self.id,
                    elapsed_secs = self.elapsed_secs(),
                    errors = self.error_count,
                    "Capture session stopped"
                );
            }
            CaptureState::Error => {
                // Failed session being cleared; there is no handle to stop.
                let _ = self.state.transition(CaptureState::Idle);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use notavoz_speech::{MockRecognizerFactory, RecognizerConfig, RecognizerFactory};

    use super::*;

    fn shared_buffer() -> (Rc<RefCell<String>>, UpdateFn) {
        let buffer = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&buffer);
        let update: UpdateFn = Box::new(move |value| {
            *sink.borrow_mut() = value.to_string();
        });
        (buffer, update)
    }

    fn live_session(
        factory: &MockRecognizerFactory,
        mode: AccumulationMode,
        base: &str,
    ) -> (CaptureSession, Rc<RefCell<String>>, Rc<RefCell<Vec<String>>>) {
        let (buffer, update) = shared_buffer();
        *buffer.borrow_mut() = base.to_string();

        let errors = Rc::new(RefCell::new(Vec::new()));
        let error_sink = Rc::clone(&errors);
        let on_error: ErrorFn = Box::new(move |message| {
            error_sink.borrow_mut().push(message.to_string());
        });

        let mut session = CaptureSession::new(mode, base, update, on_error);
        let handle = factory.create(&RecognizerConfig::default()).unwrap();
        session.begin(handle).unwrap();
        (session, buffer, errors)
    }

    #[test]
    fn test_session_starts_listening() {
        let factory = MockRecognizerFactory::new();
        let (session, _, _) = live_session(&factory, AccumulationMode::Replace, "");
        assert_eq!(session.state(), CaptureState::Listening);
        assert_eq!(factory.start_calls(), 1);
    }

    #[test]
    fn test_replace_mode_overwrites_buffer() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, _) =
            live_session(&factory, AccumulationMode::Replace, "rascunho manual");

        factory.push_transcripts(&["comprar pão"]);
        assert_eq!(session.pump(), 1);
        assert_eq!(*buffer.borrow(), "comprar pão");
    }

    #[test]
    fn test_replace_mode_recomputes_from_last_event() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, _) = live_session(&factory, AccumulationMode::Replace, "");

        // Each event carries the full segment list seen so far; the buffer
        // must reflect the last event alone, never stacked deltas.
        factory.push_transcripts(&["comprar"]);
        factory.push_transcripts(&["comprar", " pão"]);
        factory.push_transcripts(&["comprar", " pão", " e café"]);
        assert_eq!(session.pump(), 3);
        assert_eq!(*buffer.borrow(), "comprar pão e café");
    }

    #[test]
    fn test_append_mode_fixed_base() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, _) = live_session(&factory, AccumulationMode::Append, "Hello");

        factory.push_transcripts(&["world"]);
        session.pump();
        assert_eq!(*buffer.borrow(), "Hello world");

        // The speech portion is replaced wholesale, not stacked.
        factory.push_transcripts(&["world wide"]);
        session.pump();
        assert_eq!(*buffer.borrow(), "Hello world wide");
    }

    #[test]
    fn test_zero_results_leaves_buffer_unchanged() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, _) =
            live_session(&factory, AccumulationMode::Replace, "intocado");

        assert_eq!(session.pump(), 0);
        session.stop();
        assert_eq!(*buffer.borrow(), "intocado");
    }

    #[test]
    fn test_error_event_keeps_listening_and_buffer() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, errors) = live_session(&factory, AccumulationMode::Replace, "");

        factory.push_transcripts(&["ditado"]);
        session.pump();

        factory.push_error("no-speech");
        session.pump();

        assert_eq!(session.state(), CaptureState::Listening);
        assert_eq!(*buffer.borrow(), "ditado");
        assert_eq!(session.error_count(), 1);
        assert_eq!(*errors.borrow(), vec!["no-speech".to_string()]);
    }

    #[test]
    fn test_each_error_event_reported_once() {
        let factory = MockRecognizerFactory::new();
        let (mut session, _, errors) = live_session(&factory, AccumulationMode::Replace, "");

        factory.push_error("audio-capture");
        factory.push_error("network");
        session.pump();

        assert_eq!(session.error_count(), 2);
        assert_eq!(errors.borrow().len(), 2);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let factory = MockRecognizerFactory::new();
        let (mut session, _, _) = live_session(&factory, AccumulationMode::Replace, "");

        session.stop();
        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(factory.stop_calls(), 1);

        // Second stop: no error, no duplicate engine-stop call.
        session.stop();
        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(factory.stop_calls(), 1);
    }

    #[test]
    fn test_late_events_after_stop_do_not_mutate_buffer() {
        let factory = MockRecognizerFactory::new();
        let (mut session, buffer, errors) =
            live_session(&factory, AccumulationMode::Replace, "");

        factory.push_transcripts(&["antes"]);
        session.pump();
        session.stop();

        // Events arriving after stop must be ignored entirely.
        factory.push_transcripts(&["depois"]);
        factory.push_error("late");
        assert_eq!(session.pump(), 0);

        // Direct delivery is discarded too.
        session.apply_result(&ResultEvent::from_transcripts(&["depois"]));
        session.apply_error("late");

        assert_eq!(*buffer.borrow(), "antes");
        assert!(errors.borrow().is_empty());
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_begin_failure_parks_session_in_error() {
        let factory = MockRecognizerFactory::with_start_failure();
        let (_, update) = shared_buffer();
        let mut session =
            CaptureSession::new(AccumulationMode::Replace, "", update, Box::new(|_| {}));

        let handle = factory.create(&RecognizerConfig::default()).unwrap();
        assert!(session.begin(handle).is_err());
        assert_eq!(session.state(), CaptureState::Error);

        // Clearing a failed session must not signal the engine.
        session.stop();
        assert_eq!(session.state(), CaptureState::Idle);
        assert_eq!(factory.stop_calls(), 0);
    }

    #[test]
    fn test_elapsed_secs_small_after_creation() {
        let factory = MockRecognizerFactory::new();
        let (session, _, _) = live_session(&factory, AccumulationMode::Replace, "");
        assert!(session.elapsed_secs() < 1.0);
    }
}
