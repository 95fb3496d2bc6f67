//! Decision document model
//!
//! A decision document is the declarative rule graph authored by rule
//! tooling: a set of typed nodes connected by directed edges. Documents are
//! produced by the parser and consumed once by the compiler.

pub mod edge;
pub mod node;

pub use edge::Edge;
pub use node::{
    CustomContent, DecisionReferenceContent, DecisionTableContent, ExpressionContent,
    ExpressionEntry, FunctionContent, HitPolicy, InputContent, Node, NodeKind, TableColumn,
    TableRule,
};

/// Parsed rule graph
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecisionDocument {
    /// Nodes in document order
    pub nodes: Vec<Node>,

    /// Edges in document order
    pub edges: Vec<Edge>,
}

impl DecisionDocument {
    /// Create a document from nodes and edges
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
