//! Evaluation options

use serde::{Deserialize, Serialize};

/// Default sub-decision depth limit
pub const DEFAULT_MAX_DEPTH: u8 = 1;

/// Per-call evaluation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationOptions {
    /// Record a per-node trace
    pub trace: bool,

    /// Graph evaluations at this depth or deeper fail; 0 is treated as 1
    pub max_depth: u8,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            trace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvaluationOptions {
    pub fn new(trace: bool, max_depth: u8) -> Self {
        Self { trace, max_depth }
    }

    /// Depth limit with the zero case normalized
    pub fn effective_max_depth(&self) -> u8 {
        self.max_depth.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EvaluationOptions::default();
        assert!(!options.trace);
        assert_eq!(options.max_depth, 1);
        assert_eq!(EvaluationOptions::new(true, 0).effective_max_depth(), 1);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: EvaluationOptions = serde_json::from_str(r#"{"maxDepth": 5}"#).unwrap();
        assert_eq!(options, EvaluationOptions::new(false, 5));
    }
}
