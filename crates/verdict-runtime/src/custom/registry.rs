//! Component registry
//!
//! A [`CustomNodeHandler`] that routes requests to per-component handlers.

use super::handler::CustomNodeHandler;
use super::request::{NodeRequest, NodeResponse};
use std::collections::HashMap;
use std::sync::Arc;

/// Dispatches custom nodes by their `component` tag
#[derive(Clone, Default)]
pub struct CustomNodeRegistry {
    handlers: HashMap<String, Arc<dyn CustomNodeHandler>>,
}

impl CustomNodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a component, replacing any previous one
    pub fn register(
        &mut self,
        component: impl Into<String>,
        handler: impl CustomNodeHandler + 'static,
    ) -> &mut Self {
        self.handlers.insert(component.into(), Arc::new(handler));
        self
    }

    /// Builder-style registration
    pub fn with(mut self, component: impl Into<String>, handler: impl CustomNodeHandler + 'static) -> Self {
        self.register(component, handler);
        self
    }

    /// Registered component tags, sorted
    pub fn components(&self) -> Vec<&str> {
        let mut components: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        components.sort_unstable();
        components
    }
}

impl CustomNodeHandler for CustomNodeRegistry {
    fn handle(&self, request: NodeRequest) -> anyhow::Result<NodeResponse> {
        let handler = self
            .handlers
            .get(&request.node.component)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no handler registered for component '{}'",
                    request.node.component
                )
            })?;
        handler.handle(request)
    }
}

impl std::fmt::Debug for CustomNodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomNodeRegistry")
            .field("components", &self.components())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::CustomNode;
    use verdict_core::Value;

    fn request(component: &str) -> NodeRequest {
        NodeRequest {
            node: CustomNode {
                id: "n".to_string(),
                name: "n".to_string(),
                component: component.to_string(),
                config: serde_json::Value::Null,
            },
            input: Value::empty_object(),
            iteration: 0,
        }
    }

    #[test]
    fn test_dispatch_by_component() {
        let registry = CustomNodeRegistry::new()
            .with("one", |_req: NodeRequest| -> anyhow::Result<NodeResponse> {
                Ok(NodeResponse::new(Value::Number(1.0)))
            })
            .with("two", |_req: NodeRequest| -> anyhow::Result<NodeResponse> {
                Ok(NodeResponse::new(Value::Number(2.0)))
            });

        assert_eq!(registry.components(), vec!["one", "two"]);
        assert_eq!(
            registry.handle(request("two")).unwrap().output,
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_unknown_component() {
        let registry = CustomNodeRegistry::new();
        let err = registry.handle(request("missing")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
