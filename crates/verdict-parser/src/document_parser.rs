//! Decision document parser
//!
//! Reads the node/edge wire format:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "n1", "name": "Request", "type": "inputNode", "content": {} }],
//!   "edges": [{ "id": "e1", "sourceId": "n1", "targetId": "n2" }]
//! }
//! ```
//!
//! The same structure is accepted as YAML. Input whose first non-blank
//! character is `{` is read as JSON, anything else as YAML.

use crate::error::{ParseError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use verdict_core::document::{
    CustomContent, DecisionReferenceContent, DecisionTableContent, ExpressionContent,
    FunctionContent, InputContent,
};
use verdict_core::{DecisionDocument, Edge, Node, NodeKind};

/// Source format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from the first non-whitespace byte
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: serde_json::Value,
}

/// Decision document parser
pub struct DocumentParser;

impl DocumentParser {
    /// Parse a document, detecting JSON or YAML
    pub fn parse(bytes: &[u8]) -> Result<DecisionDocument> {
        match DocumentFormat::detect(bytes) {
            DocumentFormat::Json => Self::parse_json(bytes),
            DocumentFormat::Yaml => Self::parse_yaml(bytes),
        }
    }

    /// Parse a JSON document
    pub fn parse_json(bytes: &[u8]) -> Result<DecisionDocument> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        Self::build(raw)
    }

    /// Parse a YAML document
    pub fn parse_yaml(bytes: &[u8]) -> Result<DecisionDocument> {
        let raw: RawDocument = serde_yaml::from_slice(bytes)?;
        Self::build(raw)
    }

    fn build(raw: RawDocument) -> Result<DecisionDocument> {
        let nodes = raw
            .nodes
            .into_iter()
            .map(Self::node)
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Parsed decision document: {} nodes, {} edges",
            nodes.len(),
            raw.edges.len()
        );

        Ok(DecisionDocument::new(nodes, raw.edges))
    }

    fn node(raw: RawNode) -> Result<Node> {
        let RawNode {
            id,
            name,
            kind,
            content,
        } = raw;

        let kind = match kind.as_str() {
            NodeKind::INPUT => NodeKind::Input(Self::content_or_default::<InputContent>(&id, content)?),
            NodeKind::OUTPUT => NodeKind::Output,
            NodeKind::DECISION_TABLE => NodeKind::DecisionTable(Self::content::<DecisionTableContent>(&id, content)?),
            NodeKind::EXPRESSION => NodeKind::Expression(Self::content::<ExpressionContent>(&id, content)?),
            NodeKind::FUNCTION => NodeKind::Function(Self::function_content(&id, content)?),
            NodeKind::CUSTOM => NodeKind::Custom(Self::content::<CustomContent>(&id, content)?),
            NodeKind::DECISION => NodeKind::Decision(Self::content::<DecisionReferenceContent>(&id, content)?),
            _ => {
                log::warn!("Node '{}' has unsupported type '{}'", id, kind);
                return Err(ParseError::UnknownNodeKind { node_id: id, kind });
            }
        };

        Ok(Node::new(id, name, kind))
    }

    fn content<T: DeserializeOwned>(node_id: &str, content: serde_json::Value) -> Result<T> {
        serde_json::from_value(content).map_err(|e| ParseError::InvalidContent {
            node_id: node_id.to_string(),
            message: e.to_string(),
        })
    }

    fn content_or_default<T: DeserializeOwned + Default>(
        node_id: &str,
        content: serde_json::Value,
    ) -> Result<T> {
        if content.is_null() {
            return Ok(T::default());
        }
        Self::content(node_id, content)
    }

    /// Function content is either `{ "source": "..." }` or the bare source string
    fn function_content(node_id: &str, content: serde_json::Value) -> Result<FunctionContent> {
        match content {
            serde_json::Value::String(source) => Ok(FunctionContent { source }),
            other => Self::content(node_id, other),
        }
    }
}
