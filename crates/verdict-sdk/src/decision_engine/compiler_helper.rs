//! Decision loading, compilation and caching

use crate::error::{Result, SdkError};
use crate::loader::DecisionLoader;
use dashmap::DashMap;
use std::sync::Arc;
use verdict_compiler::Compiler;
use verdict_core::CompiledDecision;
use verdict_runtime::{RuntimeError, SubDecisionResolver};

/// Loads and compiles decisions by key, with an optional cache
pub(super) struct DecisionSource {
    loader: Option<Arc<dyn DecisionLoader>>,
    compiler: Compiler,
    cache: Option<DashMap<String, Arc<CompiledDecision>>>,
}

impl DecisionSource {
    pub(super) fn new(loader: Option<Arc<dyn DecisionLoader>>, cache: bool) -> Self {
        Self {
            loader,
            compiler: Compiler::new(),
            cache: cache.then(DashMap::new),
        }
    }

    /// Compiled decision for `key`, from the cache when enabled
    pub(super) fn get(&self, key: &str) -> Result<Arc<CompiledDecision>> {
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(key)) {
            tracing::trace!("Decision '{}' served from cache", key);
            return Ok(cached.value().clone());
        }

        let decision = Arc::new(self.load(key)?);

        if let Some(cache) = &self.cache {
            cache.insert(key.to_string(), decision.clone());
        }
        Ok(decision)
    }

    /// Compile raw document bytes
    pub(super) fn compile(&self, bytes: &[u8], key: Option<&str>) -> Result<CompiledDecision> {
        let decision = self.compiler.compile_source(bytes, key)?;
        tracing::debug!(
            "Compiled decision {:?}: {} nodes",
            key,
            decision.node_count()
        );
        Ok(decision)
    }

    pub(super) fn cached_count(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub(super) fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn load(&self, key: &str) -> Result<CompiledDecision> {
        let loader = self
            .loader
            .as_ref()
            .ok_or_else(|| SdkError::NoLoader(key.to_string()))?;

        let bytes = loader.load(key).map_err(|e| {
            tracing::warn!("Loader failed for decision '{}': {:#}", key, e);
            SdkError::LoaderError {
                key: key.to_string(),
                message: format!("{:#}", e),
            }
        })?;

        self.compile(&bytes, Some(key)).map_err(|e| match e {
            SdkError::CompileError(source) => SdkError::InvalidDecision {
                key: key.to_string(),
                source,
            },
            other => other,
        })
    }
}

/// Resolves `decisionNode` keys through the engine's loader and cache
pub(super) struct LoaderResolver {
    source: Arc<DecisionSource>,
}

impl LoaderResolver {
    pub(super) fn new(source: Arc<DecisionSource>) -> Self {
        Self { source }
    }
}

impl SubDecisionResolver for LoaderResolver {
    fn resolve(&self, key: &str) -> verdict_runtime::Result<Arc<CompiledDecision>> {
        self.source.get(key).map_err(|e| RuntimeError::Resolution {
            key: key.to_string(),
            message: e.resolution_message(),
        })
    }
}
