//! Graph analyzer
//!
//! Validates node ids and edges, then computes a stable topological order:
//! among nodes whose dependencies are satisfied, the one that appears first
//! in the document runs first.

use crate::error::{CompileError, Result};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use verdict_core::{DecisionDocument, NodeKind};

/// Execution layout of a validated graph
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    /// Document indices of the nodes in execution order
    pub order: Vec<usize>,

    /// Per document index, the document indices of its sources in edge order
    pub upstream: Vec<Vec<usize>>,
}

/// Graph analyzer
pub struct GraphAnalyzer;

impl GraphAnalyzer {
    /// Validate a document and compute its execution layout
    pub fn analyze(document: &DecisionDocument) -> Result<GraphLayout> {
        let index = Self::index_nodes(document)?;
        Self::check_terminals(document)?;

        let count = document.nodes.len();
        let mut upstream = vec![Vec::new(); count];
        let mut downstream = vec![Vec::new(); count];
        let mut in_degree = vec![0usize; count];

        for edge in &document.edges {
            let source = Self::endpoint(&index, &edge.id, &edge.source_id)?;
            let target = Self::endpoint(&index, &edge.id, &edge.target_id)?;
            upstream[target].push(source);
            downstream[source].push(target);
            in_degree[target] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
            .filter(|&i| in_degree[i] == 0)
            .map(Reverse)
            .collect();
        let mut order = Vec::with_capacity(count);

        while let Some(Reverse(current)) = ready.pop() {
            order.push(current);
            for &next in &downstream[current] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < count {
            let remaining = (0..count)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| document.nodes[i].id.clone())
                .collect();
            return Err(CompileError::Cycle(remaining));
        }

        Ok(GraphLayout { order, upstream })
    }

    fn index_nodes(document: &DecisionDocument) -> Result<HashMap<&str, usize>> {
        let mut index = HashMap::with_capacity(document.nodes.len());
        for (i, node) in document.nodes.iter().enumerate() {
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(CompileError::DuplicateNode(node.id.clone()));
            }
        }
        Ok(index)
    }

    fn check_terminals(document: &DecisionDocument) -> Result<()> {
        let kinds = || document.nodes.iter().map(|node| &node.kind);

        if !kinds().any(|kind| matches!(kind, NodeKind::Input(_))) {
            return Err(CompileError::MissingInputNode);
        }
        if !kinds().any(|kind| matches!(kind, NodeKind::Output)) {
            return Err(CompileError::MissingOutputNode);
        }
        Ok(())
    }

    fn endpoint(index: &HashMap<&str, usize>, edge_id: &str, node_id: &str) -> Result<usize> {
        index
            .get(node_id)
            .copied()
            .ok_or_else(|| CompileError::DanglingEdge {
                edge_id: edge_id.to_string(),
                node_id: node_id.to_string(),
            })
    }
}
