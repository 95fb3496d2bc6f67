//! Execution trace
//!
//! One entry per evaluated node, in evaluation order. Sub-decision traces
//! are nested in the trace data of the decision node that invoked them.

use serde::{Deserialize, Serialize};
use verdict_core::Value;

/// Trace of a single node evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTrace {
    pub id: String,
    pub name: String,

    /// Node wire tag (e.g. "decisionTableNode")
    pub kind: String,

    /// Position in evaluation order
    pub order: usize,

    pub input: Value,
    pub output: Value,

    /// Wall time spent in the node (e.g. "12.3µs")
    pub performance: String,

    /// Node-specific details: matched rows, custom payload or child trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_data: Option<Value>,
}
