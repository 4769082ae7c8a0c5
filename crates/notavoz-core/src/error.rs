use thiserror::Error;

/// Top-level error type for the Notavoz system.
///
/// Each variant covers one subsystem concern. Crates downstream of
/// `notavoz-core` return this type directly so the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotavozError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No speech-recognition engine is available in the current environment.
    /// Non-retryable without a different environment.
    #[error("Speech recognition unavailable: {0}")]
    Capability(String),

    /// A malfunction reported by the recognition engine during an active
    /// session. Non-fatal: capture continues until explicitly stopped.
    #[error("Recognition engine error: {0}")]
    Engine(String),

    #[error("Dictation error: {0}")]
    Dictation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Note store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for NotavozError {
    fn from(err: toml::de::Error) -> Self {
        NotavozError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NotavozError {
    fn from(err: toml::ser::Error) -> Self {
        NotavozError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for NotavozError {
    fn from(err: serde_json::Error) -> Self {
        NotavozError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Notavoz operations.
pub type Result<T> = std::result::Result<T, NotavozError>;
