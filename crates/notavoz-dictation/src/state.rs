//! Capture state machine.
//!
//! Enforces valid state transitions for the capture lifecycle:
//! - Idle -> Listening (engine started)
//! - Listening -> Idle (stop)
//! - Listening -> Error (engine handle failed to start or stop cleanly)
//! - Error -> Idle (stop/clear)
//!
//! Engine *error events* do not transition the state: capture stays in
//! Listening until explicitly stopped.

use std::fmt;

use notavoz_core::error::{NotavozError, Result};

/// Operational state of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// No capture in progress. Ready to start.
    Idle,
    /// Actively streaming speech into the target buffer.
    Listening,
    /// The recognizer handle failed; the session must be stopped to clear.
    Error,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Listening => write!(f, "Listening"),
            CaptureState::Error => write!(f, "Error"),
        }
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        CaptureState::Idle
    }
}

impl CaptureState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &CaptureState) -> bool {
        matches!(
            (self, target),
            (CaptureState::Idle, CaptureState::Listening)
                | (CaptureState::Listening, CaptureState::Idle)
                | (CaptureState::Listening, CaptureState::Error)
                | (CaptureState::Error, CaptureState::Idle)
        )
    }
}

/// State machine for capture state transitions.
///
/// The capture flow runs on a single logical thread of control (a UI event
/// loop), so no synchronization is required. All transitions are validated
/// before being applied.
#[derive(Debug, Default)]
pub struct StateMachine {
    state: CaptureState,
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn current(&self) -> CaptureState {
        self.state
    }

    /// Attempt to transition to the target state.
    pub fn transition(&mut self, target: CaptureState) -> Result<()> {
        if self.state.can_transition_to(&target) {
            tracing::debug!("Capture state: {} -> {}", self.state, target);
            self.state = target;
            Ok(())
        } else {
            Err(NotavozError::Dictation(format!(
                "Invalid state transition: {} -> {}",
                self.state, target
            )))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
