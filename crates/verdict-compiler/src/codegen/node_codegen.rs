//! Node compiler
//!
//! Compiles the kind-specific content of one document node.

use super::expression_codegen::ExpressionCompiler;
use super::table_codegen::{split_path, TableCompiler};
use crate::error::{CompileError, Result};
use verdict_core::document::ExpressionContent;
use verdict_core::ir::NodeProgram;
use verdict_core::{Node, NodeKind};

/// Node compiler
pub struct NodeCompiler<'a> {
    expressions: &'a ExpressionCompiler,
}

impl<'a> NodeCompiler<'a> {
    pub fn new(expressions: &'a ExpressionCompiler) -> Self {
        Self { expressions }
    }

    /// Compile a node's content into its program
    pub fn compile(&self, node: &Node) -> Result<NodeProgram> {
        let program = match &node.kind {
            NodeKind::Input(content) => NodeProgram::Input {
                schema: content.schema.clone(),
            },
            NodeKind::Output => NodeProgram::Output,
            NodeKind::DecisionTable(content) => {
                NodeProgram::DecisionTable(TableCompiler::new(self.expressions).compile(&node.id, content)?)
            }
            NodeKind::Expression(content) => self.expression_node(&node.id, content)?,
            NodeKind::Function(content) => NodeProgram::Function {
                source: self.expressions.compile(&node.id, "source", &content.source)?,
            },
            NodeKind::Custom(content) => {
                if content.component.trim().is_empty() {
                    return Err(Self::invalid(&node.id, "custom node has no component"));
                }
                NodeProgram::Custom {
                    component: content.component.clone(),
                    config: content.config.clone(),
                }
            }
            NodeKind::Decision(content) => {
                if content.key.trim().is_empty() {
                    return Err(Self::invalid(&node.id, "decision node has no key"));
                }
                NodeProgram::Decision {
                    key: content.key.clone(),
                }
            }
        };
        Ok(program)
    }

    fn expression_node(&self, node_id: &str, content: &ExpressionContent) -> Result<NodeProgram> {
        let mut entries = Vec::with_capacity(content.expressions.len());
        for entry in &content.expressions {
            let key = entry.key.trim();
            if key.is_empty() {
                return Err(Self::invalid(node_id, "expression entry has an empty key"));
            }
            let expr = self
                .expressions
                .compile(node_id, &format!("key '{}'", key), &entry.value)?;
            entries.push((split_path(key), expr));
        }

        Ok(NodeProgram::Expression {
            entries,
            pass_through: content.pass_through,
        })
    }

    fn invalid(node_id: &str, message: &str) -> CompileError {
        CompileError::InvalidContent {
            node_id: node_id.to_string(),
            message: message.to_string(),
        }
    }
}
