//! Node evaluators
//!
//! Evaluators for the node kinds that need nothing beyond their own input.
//! Custom and decision nodes call out of the graph and are evaluated by the
//! [`GraphExecutor`](crate::GraphExecutor).

mod expression;
mod function;
mod input;
mod table;

pub(crate) use expression::evaluate_expression_node;
pub(crate) use function::evaluate_function_node;
pub(crate) use input::evaluate_input_node;
pub(crate) use table::evaluate_table;

use verdict_core::Value;

/// Output of a node evaluation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeOutput {
    pub output: Value,
    pub trace_data: Option<Value>,
}

impl NodeOutput {
    pub fn new(output: Value) -> Self {
        Self {
            output,
            trace_data: None,
        }
    }

    pub fn with_trace_data(mut self, trace_data: Value) -> Self {
        self.trace_data = Some(trace_data);
        self
    }
}

/// Merge `output` over `input` when the node passes its input through
pub(crate) fn pass_through(input: &Value, output: Value, enabled: bool) -> Value {
    if !enabled {
        return output;
    }
    let mut merged = input.clone();
    merged.merge(output);
    merged
}
