//! Notavoz Core crate - shared foundation for the Notavoz workspace.
//!
//! Provides the error type, configuration loading, and the data types used
//! across the dictation and notes crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DictationConfig, NotavozConfig};
pub use error::{NotavozError, Result};
pub use types::*;
