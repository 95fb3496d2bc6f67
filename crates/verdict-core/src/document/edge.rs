//! Edges between decision nodes

use serde::{Deserialize, Serialize};

/// Directed relation from one node's output to another node's input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Edge id (optional in hand-written documents)
    #[serde(default)]
    pub id: String,

    /// Node producing the value
    pub source_id: String,

    /// Node consuming the value
    pub target_id: String,
}

impl Edge {
    /// Create an edge between two nodes
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        let source_id = source_id.into();
        let target_id = target_id.into();
        Self {
            id: format!("{}->{}", source_id, target_id),
            source_id,
            target_id,
        }
    }
}
