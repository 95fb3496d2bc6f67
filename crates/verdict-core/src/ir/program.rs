//! Compiled decision
//!
//! A compiled decision is a list of nodes in execution order with
//! associated metadata.

use crate::ir::CompiledNode;
use serde::{Deserialize, Serialize};

/// An immutable decision graph ready for execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledDecision {
    /// Nodes in stable topological order
    pub nodes: Vec<CompiledNode>,

    /// Positions of the output nodes, in execution order
    pub outputs: Vec<usize>,

    /// Decision metadata
    pub metadata: DecisionMetadata,
}

/// Metadata associated with a compiled decision
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionMetadata {
    /// Key the document was loaded from, if any
    pub key: Option<String>,

    /// Number of edges in the source document
    pub edge_count: usize,

    /// Version of the compiler that generated this
    pub compiler_version: String,
}

impl CompiledDecision {
    /// Create a new compiled decision
    pub fn new(nodes: Vec<CompiledNode>, outputs: Vec<usize>, metadata: DecisionMetadata) -> Self {
        Self {
            nodes,
            outputs,
            metadata,
        }
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&CompiledNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Whether evaluating this decision may call out of the engine
    /// (custom node handler or loader)
    pub fn has_external_nodes(&self) -> bool {
        use crate::ir::NodeProgram;
        self.nodes.iter().any(|node| {
            matches!(
                node.program,
                NodeProgram::Custom { .. } | NodeProgram::Decision { .. }
            )
        })
    }
}

impl DecisionMetadata {
    /// Create metadata stamped with the current compiler version
    pub fn new(key: Option<String>, edge_count: usize) -> Self {
        Self {
            key,
            edge_count,
            compiler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
