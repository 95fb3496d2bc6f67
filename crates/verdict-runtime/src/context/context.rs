//! Per-call evaluation state
//!
//! An `EvaluationContext` lives for exactly one graph evaluation. It holds
//! the caller input, the state of every node and the trace being recorded.
//! It is never shared between calls.

use crate::error::{Result, RuntimeError};
use crate::graph::EvaluationOptions;
use crate::result::NodeTrace;
use verdict_core::Value;

/// Evaluation state of a single node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeState {
    #[default]
    Pending,
    Evaluating,
    Done(Value),
    Failed,
}

impl NodeState {
    pub fn output(&self) -> Option<&Value> {
        match self {
            NodeState::Done(output) => Some(output),
            _ => None,
        }
    }
}

/// State of one graph evaluation
#[derive(Debug)]
pub struct EvaluationContext {
    input: Value,
    iteration: u8,
    options: EvaluationOptions,
    states: Vec<NodeState>,
    trace: Option<Vec<NodeTrace>>,
}

impl EvaluationContext {
    /// Create the state for a graph with `node_count` nodes
    pub fn new(input: Value, iteration: u8, options: EvaluationOptions, node_count: usize) -> Self {
        let trace = options.trace.then(Vec::new);
        Self {
            input,
            iteration,
            options,
            states: vec![NodeState::Pending; node_count],
            trace,
        }
    }

    /// The caller input
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// Sub-decision depth of this evaluation (0 at the top level)
    pub fn iteration(&self) -> u8 {
        self.iteration
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    pub fn is_tracing(&self) -> bool {
        self.trace.is_some()
    }

    pub fn state(&self, position: usize) -> Option<&NodeState> {
        self.states.get(position)
    }

    /// Mark a node as being evaluated
    pub fn begin(&mut self, position: usize) -> Result<()> {
        match self.states.get_mut(position) {
            Some(state @ NodeState::Pending) => {
                *state = NodeState::Evaluating;
                Ok(())
            }
            Some(other) => Err(RuntimeError::InvalidOperation(format!(
                "node at position {} cannot start from state {:?}",
                position, other
            ))),
            None => Err(Self::unknown_position(position)),
        }
    }

    /// Store a node's output
    pub fn complete(&mut self, position: usize, output: Value) -> Result<()> {
        let state = self
            .states
            .get_mut(position)
            .ok_or_else(|| Self::unknown_position(position))?;
        *state = NodeState::Done(output);
        Ok(())
    }

    pub fn fail(&mut self, position: usize) {
        if let Some(state) = self.states.get_mut(position) {
            *state = NodeState::Failed;
        }
    }

    /// Deep merge of the upstream outputs, in edge order
    pub fn node_input(&self, upstream: &[usize]) -> Result<Value> {
        let mut input = Value::empty_object();
        for &position in upstream {
            let output = self
                .state(position)
                .and_then(NodeState::output)
                .ok_or_else(|| {
                    RuntimeError::InvalidOperation(format!(
                        "upstream node at position {} has not completed",
                        position
                    ))
                })?;
            input.merge(output.clone());
        }
        Ok(input)
    }

    /// Deep merge of the given nodes' outputs, in order
    pub fn merged_outputs(&self, positions: &[usize]) -> Value {
        let mut result = Value::empty_object();
        for output in positions
            .iter()
            .filter_map(|&p| self.state(p).and_then(NodeState::output))
        {
            result.merge(output.clone());
        }
        result
    }

    /// Append a node trace when tracing is enabled
    pub fn record(&mut self, entry: NodeTrace) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(entry);
        }
    }

    pub fn take_trace(&mut self) -> Option<Vec<NodeTrace>> {
        self.trace.take()
    }

    fn unknown_position(position: usize) -> RuntimeError {
        RuntimeError::InvalidOperation(format!("no node at position {}", position))
    }
}
