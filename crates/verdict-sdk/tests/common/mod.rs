//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use anyhow::bail;
use std::collections::HashMap;
use std::path::PathBuf;
use verdict_sdk::{
    CustomNodeRegistry, DecisionEngine, DecisionEngineBuilder, FilesystemLoader, NodeRequest,
    NodeResponse,
};

/// Directory holding the JSON fixtures
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

/// Raw bytes of a fixture
pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(data_dir().join(name)).unwrap_or_else(|e| panic!("fixture {}: {}", name, e))
}

/// Loader over the fixture directory
pub fn loader() -> FilesystemLoader {
    FilesystemLoader::new(data_dir()).unwrap()
}

/// Builder preloaded with the fixture loader and the test custom nodes
pub fn builder() -> DecisionEngineBuilder {
    DecisionEngineBuilder::new()
        .with_loader(loader())
        .with_custom_handler(custom_nodes())
}

/// Engine over the fixtures allowing `max_depth` levels of sub-decisions
pub fn engine(max_depth: u8) -> DecisionEngine {
    builder().max_depth(max_depth).build()
}

/// The `sum` component: adds config fields `a` and `b` under config field `key`
pub fn sum_node(request: NodeRequest) -> anyhow::Result<NodeResponse> {
    let a: i64 = request.get_field("a")?;
    let b: i64 = request.get_field("b")?;
    let key: String = request.get_field_raw("key")?;

    let mut output = HashMap::new();
    output.insert(key, a + b);
    NodeResponse::from_serializable(&output)
}

/// Dispatches known components and rejects everything else
pub fn custom_nodes() -> CustomNodeRegistry {
    CustomNodeRegistry::new().with("sum", sum_node)
}

/// Handler in the style of a host that matches on the component itself
pub fn match_handler(request: NodeRequest) -> anyhow::Result<NodeResponse> {
    match request.node.component.as_str() {
        "sum" => sum_node(request),
        other => bail!("unknown component: {}", other),
    }
}
