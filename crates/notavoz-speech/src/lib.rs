//! Notavoz Speech crate - the speech-recognition engine boundary.
//!
//! Provides a trait-based abstraction over a streaming speech-to-text engine:
//! capability probing, per-instance configuration, start/stop control, and a
//! polled event queue carrying result and error events. The real engine lives
//! in the host environment; this crate ships the traits plus a scriptable
//! mock for tests and the demo binary.

use notavoz_core::config::DictationConfig;
use notavoz_core::error::Result;

pub mod mock;

pub use mock::MockRecognizerFactory;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration handed to the engine when constructing a recognizer instance.
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// BCP-47 language tag (e.g., "pt").
    pub language: String,
    /// Keep recognizing through silence instead of auto-stopping.
    pub continuous: bool,
    /// Deliver partial results while the speaker is still talking.
    pub interim_results: bool,
    /// Number of alternative transcripts per result segment.
    pub max_alternatives: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self::from(&DictationConfig::default())
    }
}

impl From<&DictationConfig> for RecognizerConfig {
    fn from(config: &DictationConfig) -> Self {
        Self {
            language: config.language.clone(),
            continuous: config.continuous,
            interim_results: config.interim_results,
            max_alternatives: config.max_alternatives,
        }
    }
}

// =============================================================================
// Result types
// =============================================================================

/// One candidate transcript for a result segment.
#[derive(Debug, Clone)]
pub struct TranscriptAlternative {
    pub transcript: String,
    /// Engine confidence for this alternative (0.0 to 1.0).
    pub confidence: f32,
}

/// One result segment. Interim segments may be revised by later events.
#[derive(Debug, Clone)]
pub struct ResultSegment {
    /// Candidate transcripts, best first. Never empty for a well-formed event.
    pub alternatives: Vec<TranscriptAlternative>,
    /// Whether the engine has finalized this segment.
    pub is_final: bool,
}

/// A result event from the engine.
///
/// Each event carries *all* result segments seen so far in the session, so
/// consumers recompute their running transcript from the latest event alone
/// rather than accumulating deltas across events.
#[derive(Debug, Clone, Default)]
pub struct ResultEvent {
    pub segments: Vec<ResultSegment>,
}

impl ResultEvent {
    /// Build an event with one single-alternative segment per transcript.
    pub fn from_transcripts<S: AsRef<str>>(transcripts: &[S]) -> Self {
        Self {
            segments: transcripts
                .iter()
                .map(|t| ResultSegment {
                    alternatives: vec![TranscriptAlternative {
                        transcript: t.as_ref().to_string(),
                        confidence: 1.0,
                    }],
                    is_final: false,
                })
                .collect(),
        }
    }

    /// The running transcript: the best alternative of every segment,
    /// interim segments included, concatenated in delivery order.
    pub fn running_transcript(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| segment.alternatives.first())
            .map(|alt| alt.transcript.as_str())
            .collect()
    }
}

/// An event delivered by a recognizer instance.
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// Incremental recognition results (all segments so far).
    Result(ResultEvent),
    /// An engine-level malfunction. Non-fatal: the instance keeps running.
    Error(String),
}

// =============================================================================
// Traits
// =============================================================================

/// Probes engine availability and constructs recognizer instances.
///
/// Injected into the dictation controller so the capture flow is testable
/// without a real engine in the runtime environment.
pub trait RecognizerFactory {
    /// Whether a speech-recognition engine is available in this environment.
    /// Pure query, safe to call repeatedly.
    fn is_available(&self) -> bool;

    /// Construct a recognizer instance with the given configuration.
    fn create(&self, config: &RecognizerConfig) -> Result<Box<dyn RecognizerHandle>>;
}

/// A live recognizer instance.
///
/// Events are delivered serially through `poll_event`, in the order the
/// engine produced them. The handle is exclusively owned by one capture
/// session; dropping it discards any events still queued.
pub trait RecognizerHandle {
    /// Begin capturing audio and emitting events.
    fn start(&mut self) -> Result<()>;

    /// Signal the engine to stop capturing. Events queued before the stop
    /// are no longer observable once the handle is released.
    fn stop(&mut self) -> Result<()>;

    /// Take the next pending event, if any.
    fn poll_event(&mut self) -> Option<RecognizerEvent>;
}

// =============================================================================
// Tests
// =============================================================================
