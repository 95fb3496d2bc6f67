//! Main compiler
//!
//! Validates a decision document, orders its nodes and compiles every node's
//! content into an immutable [`CompiledDecision`].

use crate::codegen::{ExpressionCompiler, NodeCompiler};
use crate::error::Result;
use crate::semantic::GraphAnalyzer;
use verdict_core::ir::{CompiledDecision, CompiledNode, DecisionMetadata, NodeProgram};
use verdict_core::DecisionDocument;
use verdict_parser::DocumentParser;

/// Compiler options
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Enable constant folding optimization
    pub enable_constant_folding: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            enable_constant_folding: true,
        }
    }
}

/// The decision compiler
pub struct Compiler {
    expressions: ExpressionCompiler,
}

impl Compiler {
    /// Create a new compiler instance with default options
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a new compiler instance with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self {
            expressions: ExpressionCompiler::new(options.enable_constant_folding),
        }
    }

    /// Parse and compile a document from raw JSON or YAML bytes
    pub fn compile_source(&self, bytes: &[u8], key: Option<&str>) -> Result<CompiledDecision> {
        let document = DocumentParser::parse(bytes)?;
        self.compile(&document, key)
    }

    /// Compile a parsed document
    pub fn compile(&self, document: &DecisionDocument, key: Option<&str>) -> Result<CompiledDecision> {
        let layout = GraphAnalyzer::analyze(document)?;

        // document index -> execution position
        let mut position = vec![0usize; document.nodes.len()];
        for (pos, &doc_index) in layout.order.iter().enumerate() {
            position[doc_index] = pos;
        }

        let node_compiler = NodeCompiler::new(&self.expressions);
        let mut nodes = Vec::with_capacity(layout.order.len());
        for &doc_index in &layout.order {
            let node = &document.nodes[doc_index];
            nodes.push(CompiledNode {
                id: node.id.clone(),
                name: node.name.clone(),
                upstream: layout.upstream[doc_index]
                    .iter()
                    .map(|&source| position[source])
                    .collect(),
                program: node_compiler.compile(node)?,
            });
        }

        let outputs = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node.program, NodeProgram::Output))
            .map(|(pos, _)| pos)
            .collect();

        let decision = CompiledDecision::new(
            nodes,
            outputs,
            DecisionMetadata::new(key.map(str::to_string), document.edges.len()),
        );

        tracing::debug!(
            key = key.unwrap_or("<inline>"),
            nodes = decision.node_count(),
            "compiled decision"
        );

        Ok(decision)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    const FUNCTION_GRAPH: &str = r#"{
        "nodes": [
            { "id": "out", "name": "Response", "type": "outputNode" },
            { "id": "fn", "name": "Double", "type": "functionNode", "content": { "source": "input * 2" } },
            { "id": "in", "name": "Request", "type": "inputNode" }
        ],
        "edges": [
            { "id": "e1", "sourceId": "in", "targetId": "fn" },
            { "id": "e2", "sourceId": "fn", "targetId": "out" }
        ]
    }"#;

    #[test]
    fn test_compile_orders_nodes() {
        let decision = Compiler::new()
            .compile_source(FUNCTION_GRAPH.as_bytes(), Some("function.json"))
            .unwrap();

        let ids: Vec<&str> = decision.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["in", "fn", "out"]);
        assert_eq!(decision.nodes[1].upstream, vec![0]);
        assert_eq!(decision.nodes[2].upstream, vec![1]);
        assert_eq!(decision.outputs, vec![2]);
        assert_eq!(decision.metadata.key.as_deref(), Some("function.json"));
        assert_eq!(decision.metadata.edge_count, 2);
    }

    #[test]
    fn test_compile_reports_parse_errors() {
        assert!(matches!(
            Compiler::new().compile_source(b"{ broken", None),
            Err(CompileError::Parse(_))
        ));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let compiler = Compiler::new();
        let first = compiler.compile_source(FUNCTION_GRAPH.as_bytes(), None).unwrap();
        let second = compiler.compile_source(FUNCTION_GRAPH.as_bytes(), None).unwrap();
        assert_eq!(first, second);
    }
}
