//! Compiled decision handle

use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use verdict_core::{CompiledDecision, Value};
use verdict_runtime::{EvaluationOptions, EvaluationResponse, GraphExecutor};

/// A compiled decision bound to its engine's loader and custom handler.
///
/// Cheap to clone and safe to evaluate from many threads at once.
#[derive(Debug, Clone)]
pub struct Decision {
    compiled: Arc<CompiledDecision>,
    executor: GraphExecutor,
    defaults: EvaluationOptions,
}

impl Decision {
    pub(super) fn new(
        compiled: Arc<CompiledDecision>,
        executor: GraphExecutor,
        defaults: EvaluationOptions,
    ) -> Self {
        Self {
            compiled,
            executor,
            defaults,
        }
    }

    /// Evaluate with the engine's default options
    pub fn evaluate<C: Serialize + ?Sized>(&self, context: &C) -> Result<EvaluationResponse> {
        self.evaluate_with_options(context, self.defaults)
    }

    /// Evaluate with explicit options
    pub fn evaluate_with_options<C: Serialize + ?Sized>(
        &self,
        context: &C,
        options: EvaluationOptions,
    ) -> Result<EvaluationResponse> {
        let input = Value::from_serializable(context)?;
        let result = self.executor.evaluate(&self.compiled, input, &options)?;
        Ok(result.into())
    }

    /// Key the decision was loaded from, if any
    pub fn key(&self) -> Option<&str> {
        self.compiled.metadata.key.as_deref()
    }

    /// The compiled graph
    pub fn compiled(&self) -> &Arc<CompiledDecision> {
        &self.compiled
    }

    /// Release the handle
    pub fn dispose(self) {
        tracing::debug!("Disposing decision {:?}", self.key());
    }
}
