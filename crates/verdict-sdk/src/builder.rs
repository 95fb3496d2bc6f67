//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::loader::DecisionLoader;
use std::sync::Arc;
use verdict_runtime::CustomNodeHandler;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,no_run
/// use verdict_sdk::{DecisionEngineBuilder, FilesystemLoader};
///
/// let engine = DecisionEngineBuilder::new()
///     .with_loader(FilesystemLoader::new("decisions").unwrap())
///     .max_depth(5)
///     .cache_decisions(true)
///     .build();
/// ```
#[derive(Default)]
pub struct DecisionEngineBuilder {
    config: EngineConfig,
    loader: Option<Arc<dyn DecisionLoader>>,
    custom_handler: Option<Arc<dyn CustomNodeHandler>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decision loader
    pub fn with_loader(mut self, loader: impl DecisionLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Set a shared decision loader
    pub fn with_shared_loader(mut self, loader: Arc<dyn DecisionLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Set the custom node handler
    pub fn with_custom_handler(mut self, handler: impl CustomNodeHandler + 'static) -> Self {
        self.custom_handler = Some(Arc::new(handler));
        self
    }

    /// Set a shared custom node handler
    pub fn with_shared_custom_handler(mut self, handler: Arc<dyn CustomNodeHandler>) -> Self {
        self.custom_handler = Some(handler);
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Default sub-decision depth limit
    pub fn max_depth(mut self, max_depth: u8) -> Self {
        self.config.default_max_depth = max_depth;
        self
    }

    /// Record traces by default
    pub fn trace(mut self, trace: bool) -> Self {
        self.config.default_trace = trace;
        self
    }

    /// Cache compiled decisions by key
    pub fn cache_decisions(mut self, cache: bool) -> Self {
        self.config.cache_decisions = cache;
        self
    }

    /// Build the engine
    pub fn build(self) -> DecisionEngine {
        DecisionEngine::from_parts(self.loader, self.custom_handler, self.config)
    }
}
