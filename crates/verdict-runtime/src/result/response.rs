//! Evaluation response returned to callers

use super::NodeTrace;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use verdict_core::Value;

/// Result of evaluating a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Wall time of the whole evaluation (e.g. "152.4µs")
    pub performance: String,

    /// Merged output of all output nodes
    pub result: Value,

    /// Per-node trace, present only when tracing was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<NodeTrace>>,
}

impl EvaluationResponse {
    pub fn new(result: Value, trace: Option<Vec<NodeTrace>>, elapsed: Duration) -> Self {
        Self {
            performance: format_duration(elapsed),
            result,
            trace,
        }
    }
}

pub(crate) fn format_duration(elapsed: Duration) -> String {
    format!("{:.1?}", elapsed)
}
