//! Function node

use super::NodeOutput;
use crate::context::Scope;
use crate::error::Result;
use crate::expression::evaluate;
use verdict_core::ast::Expression;
use verdict_core::Value;

/// The value of the source expression over the node input
pub(crate) fn evaluate_function_node(source: &Expression, input: &Value) -> Result<NodeOutput> {
    Ok(NodeOutput::new(evaluate(source, &Scope::new(input))?))
}
