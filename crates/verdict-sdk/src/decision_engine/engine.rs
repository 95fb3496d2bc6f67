//! Core DecisionEngine implementation

use super::compiler_helper::{DecisionSource, LoaderResolver};
use super::decision::Decision;
use crate::builder::DecisionEngineBuilder;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::loader::DecisionLoader;
use serde::Serialize;
use std::sync::Arc;
use verdict_runtime::{CustomNodeHandler, EvaluationOptions, EvaluationResponse, GraphExecutor};

/// Main decision engine
///
/// Loads decisions by key through its [`DecisionLoader`], compiles them and
/// evaluates them. An engine is `Send + Sync`; share it by reference or
/// behind an `Arc`.
pub struct DecisionEngine {
    source: Arc<DecisionSource>,
    executor: GraphExecutor,
    config: EngineConfig,
}

impl DecisionEngine {
    /// Create an engine with no loader, no custom handler and default config
    pub fn new() -> Self {
        Self::from_parts(None, None, EngineConfig::default())
    }

    /// Start building an engine
    pub fn builder() -> DecisionEngineBuilder {
        DecisionEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        loader: Option<Arc<dyn DecisionLoader>>,
        custom_handler: Option<Arc<dyn CustomNodeHandler>>,
        config: EngineConfig,
    ) -> Self {
        let source = Arc::new(DecisionSource::new(loader, config.cache_decisions));

        let mut executor =
            GraphExecutor::new().with_resolver(Arc::new(LoaderResolver::new(source.clone())));
        if let Some(handler) = custom_handler {
            executor = executor.with_custom_handler(handler);
        }

        tracing::debug!("Created decision engine: {:?}", config);

        Self {
            source,
            executor,
            config,
        }
    }

    /// Load and evaluate the decision stored under `key`
    pub fn evaluate<C: Serialize + ?Sized>(&self, key: &str, context: &C) -> Result<EvaluationResponse> {
        self.evaluate_with_options(key, context, self.config.evaluation_options())
    }

    /// Load and evaluate with explicit options
    pub fn evaluate_with_options<C: Serialize + ?Sized>(
        &self,
        key: &str,
        context: &C,
        options: EvaluationOptions,
    ) -> Result<EvaluationResponse> {
        self.get_decision(key)?.evaluate_with_options(context, options)
    }

    /// Load and compile the decision stored under `key`
    pub fn get_decision(&self, key: &str) -> Result<Decision> {
        let compiled = self.source.get(key)?;
        Ok(self.decision(compiled))
    }

    /// Compile a decision from raw JSON or YAML bytes
    ///
    /// The decision is not cached; sub-decisions it references still go
    /// through the loader.
    pub fn create_decision(&self, document: impl AsRef<[u8]>) -> Result<Decision> {
        let compiled = self.source.compile(document.as_ref(), None)?;
        Ok(self.decision(Arc::new(compiled)))
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of compiled decisions currently cached
    pub fn cached_decisions(&self) -> usize {
        self.source.cached_count()
    }

    /// Release the engine and its cache
    pub fn dispose(self) {
        tracing::debug!("Disposing decision engine ({} cached)", self.cached_decisions());
        self.source.clear();
    }

    fn decision(&self, compiled: Arc<verdict_core::CompiledDecision>) -> Decision {
        Decision::new(compiled, self.executor.clone(), self.config.evaluation_options())
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("config", &self.config)
            .field("cached_decisions", &self.cached_decisions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use crate::loader::MemoryLoader;
    use serde_json::json;
    use verdict_core::Value;

    const DOUBLE: &str = r#"{
        "nodes": [
            { "id": "in", "type": "inputNode" },
            { "id": "fn", "type": "functionNode", "content": { "source": "{ output: input * 2 }" } },
            { "id": "out", "type": "outputNode" }
        ],
        "edges": [
            { "id": "e1", "sourceId": "in", "targetId": "fn" },
            { "id": "e2", "sourceId": "fn", "targetId": "out" }
        ]
    }"#;

    fn engine(cache: bool) -> DecisionEngine {
        DecisionEngine::from_parts(
            Some(Arc::new(MemoryLoader::new().with("double.json", DOUBLE))),
            None,
            EngineConfig::new().with_cache(cache),
        )
    }

    #[test]
    fn test_evaluate_by_key() {
        let response = engine(false).evaluate("double.json", &json!({"input": 4})).unwrap();
        assert_eq!(response.result, Value::from(json!({"output": 8})));
        assert!(response.trace.is_none());
        assert!(!response.performance.is_empty());
    }

    #[test]
    fn test_cache_is_filled_and_cleared() {
        let engine = engine(true);
        assert_eq!(engine.cached_decisions(), 0);

        let first = engine.get_decision("double.json").unwrap();
        let second = engine.get_decision("double.json").unwrap();
        assert!(Arc::ptr_eq(first.compiled(), second.compiled()));
        assert_eq!(engine.cached_decisions(), 1);

        engine.dispose();
    }

    #[test]
    fn test_no_cache_recompiles() {
        let engine = engine(false);
        let first = engine.get_decision("double.json").unwrap();
        let second = engine.get_decision("double.json").unwrap();
        assert!(!Arc::ptr_eq(first.compiled(), second.compiled()));
        assert_eq!(engine.cached_decisions(), 0);
    }

    #[test]
    fn test_without_loader() {
        let engine = DecisionEngine::new();
        assert!(matches!(
            engine.get_decision("any"),
            Err(SdkError::NoLoader(key)) if key == "any"
        ));

        let decision = engine.create_decision(DOUBLE).unwrap();
        assert_eq!(decision.key(), None);
        let response = decision.evaluate(&json!({"input": 1})).unwrap();
        assert_eq!(response.result, Value::from(json!({"output": 2})));
    }

    #[test]
    fn test_invalid_document_names_key() {
        let loader = MemoryLoader::new().with("bad.json", r#"{"nodes": [], "edges": []}"#);
        let engine = DecisionEngine::from_parts(Some(Arc::new(loader)), None, EngineConfig::new());

        match engine.get_decision("bad.json") {
            Err(SdkError::InvalidDecision { key, .. }) => assert_eq!(key, "bad.json"),
            other => panic!("Expected InvalidDecision, got {:?}", other.map(|_| ())),
        }
    }
}
