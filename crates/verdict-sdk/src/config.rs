//! Configuration types for DecisionEngine

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use verdict_runtime::{EvaluationOptions, DEFAULT_MAX_DEPTH};

/// Main engine configuration
///
/// ```yaml
/// default_max_depth: 5
/// default_trace: false
/// cache: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sub-decision depth limit used when a call passes no options
    pub default_max_depth: u8,

    /// Record a trace when a call passes no options
    pub default_trace: bool,

    /// Keep compiled decisions keyed by loader key
    #[serde(alias = "cache")]
    pub cache_decisions: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            default_trace: false,
            cache_decisions: false,
        }
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Read a configuration file; `.json` files are JSON, anything else YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading engine config: {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Set the default depth limit
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.default_max_depth = max_depth;
        self
    }

    /// Enable tracing by default
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.default_trace = trace;
        self
    }

    /// Enable the compiled decision cache
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache_decisions = cache;
        self
    }

    /// Options applied to calls that do not pass their own
    pub fn evaluation_options(&self) -> EvaluationOptions {
        EvaluationOptions::new(self.default_trace, self.default_max_depth)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_max_depth, 1);
        assert!(!config.default_trace);
        assert!(!config.cache_decisions);
        assert_eq!(config.evaluation_options(), EvaluationOptions::default());
    }

    #[test]
    fn test_from_yaml() {
        let config = EngineConfig::from_yaml_str("default_max_depth: 5\ncache: true\n").unwrap();
        assert_eq!(config.default_max_depth, 5);
        assert!(config.cache_decisions);
        assert!(!config.default_trace);
    }

    #[test]
    fn test_from_json() {
        let config = EngineConfig::from_json_str(r#"{"default_trace": true}"#).unwrap();
        assert!(config.default_trace);
        assert_eq!(config.default_max_depth, 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EngineConfig::from_yaml_str("default_max_depth: lots"),
            Err(SdkError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "default_trace: true\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert!(config.default_trace);
        assert!(matches!(
            EngineConfig::from_file(dir.path().join("missing.yaml")),
            Err(SdkError::IoError(_))
        ));
    }
}
