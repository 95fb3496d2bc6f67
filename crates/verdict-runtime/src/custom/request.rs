//! Custom node request and response

use crate::context::{resolve_config_path, Scope};
use crate::error::{Result, RuntimeError};
use crate::expression::render_template;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use verdict_core::{CoreError, Value};
use verdict_parser::TemplateParser;

/// Static identity and configuration of a custom node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomNode {
    pub id: String,
    pub name: String,
    /// Component tag handlers dispatch on
    pub component: String,
    /// Raw configuration from the document
    pub config: serde_json::Value,
}

/// Input to a custom node handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRequest {
    pub node: CustomNode,
    /// Merged outputs of the node's upstream nodes
    pub input: Value,
    /// Sub-decision depth of the graph the node belongs to
    pub iteration: u8,
}

impl NodeRequest {
    /// Read a config field, rendering string values as templates.
    ///
    /// `path` is a dot path into the config; numeric segments index arrays.
    /// A string value is treated as a template over the request input, so
    /// `"{{ a + b }}"` yields the sum as a number. Other values decode as-is.
    pub fn get_field<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let raw = self.config_value(path)?;

        match raw {
            serde_json::Value::String(text) if TemplateParser::has_spans(text) => {
                let template = TemplateParser::parse(text)?;
                let rendered = render_template(&template, &Scope::new(&self.input))?;
                Ok(rendered.deserialize_into()?)
            }
            other => Self::decode(other),
        }
    }

    /// Read a config field without template rendering
    pub fn get_field_raw<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Self::decode(self.config_value(path)?)
    }

    fn config_value(&self, path: &str) -> Result<&serde_json::Value> {
        resolve_config_path(&self.node.config, path)
            .ok_or_else(|| RuntimeError::PathNotFound(path.to_string()))
    }

    fn decode<T: DeserializeOwned>(value: &serde_json::Value) -> Result<T> {
        serde_json::from_value(value.clone())
            .map_err(|e| RuntimeError::Conversion(CoreError::from(e)))
    }
}

/// Result of a custom node handler
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    /// Node output
    pub output: Value,

    /// Optional payload recorded in the node's trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_data: Option<Value>,
}

impl NodeResponse {
    /// Create a response with an output and no trace data
    pub fn new(output: Value) -> Self {
        Self {
            output,
            trace_data: None,
        }
    }

    /// Build a response from any serializable output
    pub fn from_serializable<T: Serialize + ?Sized>(output: &T) -> anyhow::Result<Self> {
        Ok(Self::new(Value::from_serializable(output)?))
    }

    /// Attach trace data
    pub fn with_trace_data(mut self, trace_data: Value) -> Self {
        self.trace_data = Some(trace_data);
        self
    }
}
