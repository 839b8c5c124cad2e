//! Configuration for the insights engine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Advanced (language model) tier
    #[serde(default)]
    pub advanced: LanguageModelConfig,

    /// Word embedding used for fuzzy flavor matching
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

impl InsightsConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Configuration for the language model tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageModelConfig {
    /// Try the advanced tier at all
    #[serde(default)]
    pub enabled: bool,

    /// Ollama server URL
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call timeout; elapsed means the tier is unavailable for that call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl LanguageModelConfig {
    /// Timeout as a duration.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ollama_url: default_ollama_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for fuzzy matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Text vector file (`word v1 v2 ...` per line). No fuzzy pass if unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Neighbours considered per word
    #[serde(default = "default_max_neighbors")]
    pub max_neighbors: usize,

    /// Neighbours at or beyond this distance are ignored
    #[serde(default = "default_max_distance")]
    pub max_distance: f64,
}

fn default_max_neighbors() -> usize {
    3
}

fn default_max_distance() -> f64 {
    0.8
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_neighbors: default_max_neighbors(),
            max_distance: default_max_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = InsightsConfig::default();
        assert!(!config.advanced.enabled);
        assert_eq!(config.advanced.ollama_url, "http://localhost:11434");
        assert_eq!(config.advanced.timeout(), std::time::Duration::from_secs(20));
        assert_eq!(config.embedding.max_neighbors, 3);
        assert_eq!(config.embedding.max_distance, 0.8);
        assert!(config.embedding.path.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: InsightsConfig =
            serde_json::from_str(r#"{"advanced": {"enabled": true, "model": "mistral"}}"#).unwrap();
        assert!(config.advanced.enabled);
        assert_eq!(config.advanced.model, "mistral");
        assert_eq!(config.advanced.timeout_secs, 20);
        assert_eq!(config.embedding.max_neighbors, 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"embedding": {{"path": "/tmp/vectors.txt", "max_distance": 0.5}}}}"#).unwrap();

        let config = InsightsConfig::load(file.path()).unwrap();
        assert_eq!(config.embedding.path, Some(PathBuf::from("/tmp/vectors.txt")));
        assert_eq!(config.embedding.max_distance, 0.5);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = InsightsConfig::load(Path::new("/nonexistent/cuppa.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
