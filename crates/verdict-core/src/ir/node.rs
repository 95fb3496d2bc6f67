//! Compiled nodes

use crate::ast::Expression;
use crate::document::HitPolicy;
use serde::{Deserialize, Serialize};

/// A node ready for execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledNode {
    /// Node id from the document
    pub id: String,

    /// Node name from the document
    pub name: String,

    /// Positions (in execution order) of the nodes feeding this one, in edge order
    pub upstream: Vec<usize>,

    /// Kind-specific program
    pub program: NodeProgram,
}

impl CompiledNode {
    /// Wire tag of the node kind
    pub fn kind(&self) -> &'static str {
        self.program.type_tag()
    }
}

/// Kind-specific compiled content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeProgram {
    Input {
        schema: Option<Vec<String>>,
    },
    Output,
    DecisionTable(CompiledTable),
    Expression {
        /// (dot path split into segments, expression) in declaration order
        entries: Vec<(Vec<String>, Expression)>,
        pass_through: bool,
    },
    Function {
        source: Expression,
    },
    Custom {
        component: String,
        config: serde_json::Value,
    },
    Decision {
        key: String,
    },
}

impl NodeProgram {
    /// Wire tag of the node kind
    pub fn type_tag(&self) -> &'static str {
        use crate::document::NodeKind;
        match self {
            NodeProgram::Input { .. } => NodeKind::INPUT,
            NodeProgram::Output => NodeKind::OUTPUT,
            NodeProgram::DecisionTable(_) => NodeKind::DECISION_TABLE,
            NodeProgram::Expression { .. } => NodeKind::EXPRESSION,
            NodeProgram::Function { .. } => NodeKind::FUNCTION,
            NodeProgram::Custom { .. } => NodeKind::CUSTOM,
            NodeProgram::Decision { .. } => NodeKind::DECISION,
        }
    }
}

/// Compiled decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledTable {
    pub hit_policy: HitPolicy,
    pub inputs: Vec<TableInput>,
    pub outputs: Vec<TableOutput>,
    pub rows: Vec<CompiledRow>,
    pub pass_through: bool,
}

/// Input column: the expression bound to `$` for its cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInput {
    pub id: String,
    pub name: String,
    /// `None` means cells are plain boolean expressions
    pub field: Option<Expression>,
}

/// Output column: where the cell value is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOutput {
    pub id: String,
    pub name: String,
    pub path: Vec<String>,
}

/// Compiled table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledRow {
    /// Position of the row in the table
    pub index: usize,
    pub id: Option<String>,
    pub is_default: bool,
    /// One entry per input column; `None` is an empty (always true) cell
    pub conditions: Vec<Option<Expression>>,
    /// One entry per output column; `None` is an empty (skipped) cell
    pub outputs: Vec<Option<Expression>>,
}
