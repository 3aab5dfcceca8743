//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the kvitto pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KvittoConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Known passenger names, in disambiguation priority order.
    pub roster: Vec<String>,
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pattern matching mode.
    pub mode: ExtractMode,

    /// What to do with undecodable fragments and rejected records.
    pub on_error: OnError,

    /// Maximum body length considered for matching (0 = unlimited).
    pub max_body_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractMode::Lenient,
            on_error: OnError::Skip,
            max_body_len: 0,
        }
    }
}

/// Pattern matching mode.
///
/// `Lenient` runs the full fallback chain for every field; `Strict`
/// accepts only the primary keyword-anchored pattern per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractMode {
    #[default]
    Lenient,
    Strict,
}

/// Policy for undecodable fragments and rejected records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Drop the fragment/record silently and continue.
    #[default]
    Skip,
    /// Abort the whole batch with an error.
    Fail,
}

impl KvittoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KvittoConfig::default();
        assert_eq!(config.extraction.mode, ExtractMode::Lenient);
        assert_eq!(config.extraction.on_error, OnError::Skip);
        assert_eq!(config.extraction.max_body_len, 0);
        assert!(config.roster.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: KvittoConfig =
            serde_json::from_str(r#"{"roster": ["Fredrik", "Viggo"]}"#).unwrap();
        assert_eq!(config.roster, vec!["Fredrik", "Viggo"]);
        assert_eq!(config.extraction.mode, ExtractMode::Lenient);
    }

    #[test]
    fn test_mode_serialization() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"mode": "strict", "on_error": "fail"}"#).unwrap();
        assert_eq!(config.mode, ExtractMode::Strict);
        assert_eq!(config.on_error, OnError::Fail);
    }
}
