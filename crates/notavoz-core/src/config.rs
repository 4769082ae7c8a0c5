use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NotavozError, Result};

/// Top-level configuration for the Notavoz application.
///
/// Loaded from `~/.notavoz/config.toml` by default. Each section corresponds
/// to one concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotavozConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dictation: DictationConfig,
}

impl NotavozConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NotavozConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NotavozError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.dictation.language.trim().is_empty() {
            return Err(NotavozError::Validation(
                "dictation.language must not be empty".to_string(),
            ));
        }
        if self.dictation.max_alternatives == 0 {
            return Err(NotavozError::Validation(
                "dictation.max_alternatives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Dictation capture settings, handed to the recognition engine on `start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// BCP-47 language tag for recognition.
    pub language: String,
    /// Keep recognizing through silence instead of auto-stopping.
    pub continuous: bool,
    /// Deliver partial (not-yet-final) results while the speaker is talking.
    pub interim_results: bool,
    /// Number of alternative transcripts considered per result segment.
    pub max_alternatives: u32,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            language: "pt".to_string(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
