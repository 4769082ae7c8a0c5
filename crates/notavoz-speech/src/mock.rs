//! Scriptable mock recognizer.
//!
//! Used for testing and development without a real speech engine. Clones of
//! a factory share the same event queue and call counters, so a test (or the
//! demo binary) can keep one clone to feed events while the controller owns
//! the other.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use notavoz_core::error::{NotavozError, Result};

use crate::{RecognizerConfig, RecognizerEvent, RecognizerFactory, RecognizerHandle, ResultEvent};

/// Mock factory producing handles that replay a scripted event queue.
#[derive(Clone, Default)]
pub struct MockRecognizerFactory {
    unavailable: bool,
    fail_on_start: bool,
    queue: Rc<RefCell<VecDeque<RecognizerEvent>>>,
    start_calls: Rc<Cell<u32>>,
    stop_calls: Rc<Cell<u32>>,
}

impl MockRecognizerFactory {
    /// An available engine with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that fails the capability probe.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// An available engine whose handles fail to start.
    pub fn with_start_failure() -> Self {
        Self {
            fail_on_start: true,
            ..Self::default()
        }
    }

    /// Queue an arbitrary event for delivery.
    pub fn push(&self, event: RecognizerEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Queue a result event with one segment per transcript.
    pub fn push_transcripts<S: AsRef<str>>(&self, transcripts: &[S]) {
        self.push(RecognizerEvent::Result(ResultEvent::from_transcripts(
            transcripts,
        )));
    }

    /// Queue an engine error event.
    pub fn push_error(&self, message: &str) {
        self.push(RecognizerEvent::Error(message.to_string()));
    }

    /// Number of `start` calls across all handles created by this factory.
    pub fn start_calls(&self) -> u32 {
        self.start_calls.get()
    }

    /// Number of `stop` calls across all handles created by this factory.
    pub fn stop_calls(&self) -> u32 {
        self.stop_calls.get()
    }
}

impl RecognizerFactory for MockRecognizerFactory {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn create(&self, config: &RecognizerConfig) -> Result<Box<dyn RecognizerHandle>> {
        tracing::debug!(
            language = %config.language,
            continuous = config.continuous,
            interim_results = config.interim_results,
            "Mock recognizer created"
        );
        Ok(Box::new(MockRecognizerHandle {
            fail_on_start: self.fail_on_start,
            started: false,
            stopped: false,
            queue: Rc::clone(&self.queue),
            start_calls: Rc::clone(&self.start_calls),
            stop_calls: Rc::clone(&self.stop_calls),
        }))
    }
}

struct MockRecognizerHandle {
    fail_on_start: bool,
    started: bool,
    stopped: bool,
    queue: Rc<RefCell<VecDeque<RecognizerEvent>>>,
    start_calls: Rc<Cell<u32>>,
    stop_calls: Rc<Cell<u32>>,
}

impl RecognizerHandle for MockRecognizerHandle {
    fn start(&mut self) -> Result<()> {
        if self.fail_on_start {
            return Err(NotavozError::Engine(
                "mock recognizer configured to fail on start".to_string(),
            ));
        }
        self.started = true;
        self.start_calls.set(self.start_calls.get() + 1);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.stopped = true;
        self.stop_calls.set(self.stop_calls.get() + 1);
        Ok(())
    }

    fn poll_event(&mut self) -> Option<RecognizerEvent> {
        if !self.started || self.stopped {
            return None;
        }
        self.queue.borrow_mut().pop_front()
    }
}

// =============================================================================
// Tests
// =============================================================================
