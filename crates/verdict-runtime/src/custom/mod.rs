//! Custom node bridge
//!
//! Lets the host evaluate `customNode`s. The engine builds a [`NodeRequest`]
//! for each invocation and hands it to the configured [`CustomNodeHandler`].

mod handler;
mod registry;
mod request;

pub use handler::CustomNodeHandler;
pub use registry::CustomNodeRegistry;
pub use request::{CustomNode, NodeRequest, NodeResponse};
