//! Graph executor
//!
//! Evaluates a compiled decision in its precomputed topological order.
//! Each call owns its [`EvaluationContext`]; the executor itself only holds
//! the shared extension points and can serve any number of threads.

use super::EvaluationOptions;
use crate::context::EvaluationContext;
use crate::custom::{CustomNode, CustomNodeHandler, NodeRequest};
use crate::error::{Result, RuntimeError};
use crate::nodes::{
    evaluate_expression_node, evaluate_function_node, evaluate_input_node, evaluate_table,
    NodeOutput,
};
use crate::resolver::SubDecisionResolver;
use crate::result::response::format_duration;
use crate::result::{EvaluationResponse, NodeTrace};
use std::sync::Arc;
use std::time::{Duration, Instant};
use verdict_core::ir::{CompiledNode, NodeProgram};
use verdict_core::{CompiledDecision, Value};

/// Outcome of one graph evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResult {
    pub result: Value,
    pub trace: Option<Vec<NodeTrace>>,
    pub performance: Duration,
}

impl From<GraphResult> for EvaluationResponse {
    fn from(graph: GraphResult) -> Self {
        EvaluationResponse::new(graph.result, graph.trace, graph.performance)
    }
}

/// Decision graph executor
#[derive(Clone, Default)]
pub struct GraphExecutor {
    custom_handler: Option<Arc<dyn CustomNodeHandler>>,
    resolver: Option<Arc<dyn SubDecisionResolver>>,
}

impl GraphExecutor {
    /// Create an executor without custom node handler or resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the custom node handler
    pub fn with_custom_handler(mut self, handler: Arc<dyn CustomNodeHandler>) -> Self {
        self.custom_handler = Some(handler);
        self
    }

    /// Set the sub-decision resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn SubDecisionResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Evaluate a top-level decision
    pub fn evaluate(
        &self,
        decision: &CompiledDecision,
        input: Value,
        options: &EvaluationOptions,
    ) -> Result<GraphResult> {
        self.evaluate_at(decision, input, options, 0)
    }

    /// Evaluate a decision at a given sub-decision depth
    pub fn evaluate_at(
        &self,
        decision: &CompiledDecision,
        input: Value,
        options: &EvaluationOptions,
        iteration: u8,
    ) -> Result<GraphResult> {
        let max_depth = options.effective_max_depth();
        if iteration >= max_depth {
            tracing::warn!(
                "Decision {:?} evaluated at depth {} (limit {})",
                decision.metadata.key,
                iteration,
                max_depth
            );
            return Err(RuntimeError::DepthExceeded { max_depth });
        }

        let start_time = Instant::now();
        let mut ctx = EvaluationContext::new(input, iteration, *options, decision.node_count());

        for (position, node) in decision.nodes.iter().enumerate() {
            ctx.begin(position)?;

            let node_input = match node.program {
                NodeProgram::Input { .. } => ctx.input().clone(),
                _ => ctx.node_input(&node.upstream)?,
            };

            let started = Instant::now();
            let evaluated = match self.evaluate_node(node, &node_input, &ctx) {
                Ok(evaluated) => evaluated,
                Err(e) => {
                    ctx.fail(position);
                    tracing::debug!("Node '{}' ({}) failed: {}", node.id, node.kind(), e);
                    return Err(e.in_node(&node.id));
                }
            };
            let elapsed = started.elapsed();

            tracing::debug!(
                "Evaluated node '{}' ({}) in {:?}",
                node.id,
                node.kind(),
                elapsed
            );

            let NodeOutput { output, trace_data } = evaluated;
            if ctx.is_tracing() {
                ctx.record(NodeTrace {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    kind: node.kind().to_string(),
                    order: position,
                    input: node_input,
                    output: output.clone(),
                    performance: format_duration(elapsed),
                    trace_data,
                });
            }
            ctx.complete(position, output)?;
        }

        let result = ctx.merged_outputs(&decision.outputs);
        let performance = start_time.elapsed();

        tracing::debug!(
            "Decision {:?} evaluated at depth {} in {:?}",
            decision.metadata.key,
            iteration,
            performance
        );

        Ok(GraphResult {
            result,
            trace: ctx.take_trace(),
            performance,
        })
    }

    fn evaluate_node(
        &self,
        node: &CompiledNode,
        input: &Value,
        ctx: &EvaluationContext,
    ) -> Result<NodeOutput> {
        match &node.program {
            NodeProgram::Input { schema } => Ok(evaluate_input_node(input, schema.as_deref())),
            NodeProgram::Output => Ok(NodeOutput::new(input.clone())),
            NodeProgram::DecisionTable(table) => evaluate_table(table, input),
            NodeProgram::Expression {
                entries,
                pass_through,
            } => evaluate_expression_node(entries, *pass_through, input),
            NodeProgram::Function { source } => evaluate_function_node(source, input),
            NodeProgram::Custom { component, config } => {
                self.evaluate_custom(node, component, config, input, ctx.iteration())
            }
            NodeProgram::Decision { key } => self.evaluate_decision(key, input, ctx),
        }
    }

    fn evaluate_custom(
        &self,
        node: &CompiledNode,
        component: &str,
        config: &serde_json::Value,
        input: &Value,
        iteration: u8,
    ) -> Result<NodeOutput> {
        let handler = self
            .custom_handler
            .as_ref()
            .ok_or_else(|| RuntimeError::CustomNodeNotConfigured {
                node_id: node.id.clone(),
            })?;

        let request = NodeRequest {
            node: CustomNode {
                id: node.id.clone(),
                name: node.name.clone(),
                component: component.to_string(),
                config: config.clone(),
            },
            input: input.clone(),
            iteration,
        };

        let response = handler.handle(request).map_err(|e| {
            tracing::warn!("Custom node '{}' ({}) failed: {:#}", node.id, component, e);
            RuntimeError::Extension {
                node_id: node.id.clone(),
                message: format!("{:#}", e),
            }
        })?;

        Ok(NodeOutput {
            output: response.output,
            trace_data: response.trace_data,
        })
    }

    fn evaluate_decision(
        &self,
        key: &str,
        input: &Value,
        ctx: &EvaluationContext,
    ) -> Result<NodeOutput> {
        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| RuntimeError::Resolution {
                key: key.to_string(),
                message: "no decision resolver is configured".to_string(),
            })?;

        let child = resolver.resolve(key)?;
        let result = self.evaluate_at(
            &child,
            input.clone(),
            ctx.options(),
            ctx.iteration().saturating_add(1),
        )?;

        let output = NodeOutput::new(result.result);
        match result.trace {
            Some(trace) => Ok(output.with_trace_data(Value::from_serializable(&trace)?)),
            None => Ok(output),
        }
    }
}

impl std::fmt::Debug for GraphExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphExecutor")
            .field("custom_handler", &self.custom_handler.is_some())
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}
