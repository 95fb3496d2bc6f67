//! Sub-decision resolution
//!
//! Decision nodes name another decision by key. The executor asks a
//! resolver for the compiled child graph; loading and caching are the
//! resolver's business.

use crate::error::Result;
use std::sync::Arc;
use verdict_core::CompiledDecision;

/// Resolves sub-decision keys to compiled decisions
pub trait SubDecisionResolver: Send + Sync {
    /// Resolve `key`, failing with [`RuntimeError::Resolution`](crate::RuntimeError::Resolution)
    /// when it cannot be loaded or compiled
    fn resolve(&self, key: &str) -> Result<Arc<CompiledDecision>>;
}

impl<F> SubDecisionResolver for F
where
    F: Fn(&str) -> Result<Arc<CompiledDecision>> + Send + Sync,
{
    fn resolve(&self, key: &str) -> Result<Arc<CompiledDecision>> {
        self(key)
    }
}
