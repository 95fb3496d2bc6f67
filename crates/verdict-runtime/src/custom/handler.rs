//! Custom node handler trait

use super::request::{NodeRequest, NodeResponse};

/// Host-supplied evaluation of custom nodes.
///
/// Handlers are shared across threads and called without extra locking.
/// Errors are reported to the caller with the node id attached and their
/// message kept intact.
pub trait CustomNodeHandler: Send + Sync {
    fn handle(&self, request: NodeRequest) -> anyhow::Result<NodeResponse>;
}

impl<F> CustomNodeHandler for F
where
    F: Fn(NodeRequest) -> anyhow::Result<NodeResponse> + Send + Sync,
{
    fn handle(&self, request: NodeRequest) -> anyhow::Result<NodeResponse> {
        self(request)
    }
}
