//! Decision nodes and their kind-specific content

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unit of computation in the decision graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable node id, unique within a document
    pub id: String,

    /// Display name
    pub name: String,

    /// Kind tag and content
    pub kind: NodeKind,
}

impl Node {
    /// Create a node
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// Closed set of node kinds
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Seeds the graph with the caller context
    Input(InputContent),
    /// Marks accumulated values as the final result
    Output,
    /// Ordered rule rows matched against the node input
    DecisionTable(DecisionTableContent),
    /// Key/expression pairs computed from the node input
    Expression(ExpressionContent),
    /// A single expression whose value becomes the node output
    Function(FunctionContent),
    /// Evaluation delegated to the host's custom node handler
    Custom(CustomContent),
    /// Reference to another decision resolved by key
    Decision(DecisionReferenceContent),
}

impl NodeKind {
    /// Wire tag of the kind (as used in the `type` field of documents)
    pub fn type_tag(&self) -> &'static str {
        match self {
            NodeKind::Input(_) => NodeKind::INPUT,
            NodeKind::Output => NodeKind::OUTPUT,
            NodeKind::DecisionTable(_) => NodeKind::DECISION_TABLE,
            NodeKind::Expression(_) => NodeKind::EXPRESSION,
            NodeKind::Function(_) => NodeKind::FUNCTION,
            NodeKind::Custom(_) => NodeKind::CUSTOM,
            NodeKind::Decision(_) => NodeKind::DECISION,
        }
    }

    pub const INPUT: &'static str = "inputNode";
    pub const OUTPUT: &'static str = "outputNode";
    pub const DECISION_TABLE: &'static str = "decisionTableNode";
    pub const EXPRESSION: &'static str = "expressionNode";
    pub const FUNCTION: &'static str = "functionNode";
    pub const CUSTOM: &'static str = "customNode";
    pub const DECISION: &'static str = "decisionNode";
}

/// Input node content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputContent {
    /// Top-level fields to keep from the caller context; `None` keeps all
    #[serde(default)]
    pub schema: Option<Vec<String>>,
}

/// Row selection policy of a decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitPolicy {
    /// The first fully matching row wins
    #[default]
    First,
    /// All matching rows are merged in row order, later rows override
    Collect,
}

/// Decision table content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTableContent {
    #[serde(default)]
    pub hit_policy: HitPolicy,

    #[serde(default)]
    pub inputs: Vec<TableColumn>,

    #[serde(default)]
    pub outputs: Vec<TableColumn>,

    #[serde(default)]
    pub rules: Vec<TableRule>,

    /// Merge the table outputs over the node input instead of replacing it
    #[serde(default)]
    pub pass_through: bool,
}

/// Input or output column of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Column id; rule cells are keyed by it
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Input: expression bound to `$`. Output: dot path of the produced field.
    #[serde(default)]
    pub field: Option<String>,
}

/// One row of a decision table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRule {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    /// Row applies only when no other row matched
    #[serde(rename = "_default", default)]
    pub is_default: bool,

    #[serde(rename = "_description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cell text keyed by column id
    #[serde(flatten)]
    pub cells: BTreeMap<String, serde_json::Value>,
}

impl TableRule {
    /// Text of a cell; absent, null and blank cells are `None`.
    ///
    /// Non-string scalars are accepted and used in their JSON form.
    pub fn cell(&self, column_id: &str) -> Option<String> {
        let text = match self.cells.get(column_id)? {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Expression node content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionContent {
    #[serde(default)]
    pub expressions: Vec<ExpressionEntry>,

    /// Merge computed keys over the node input instead of replacing it
    #[serde(default)]
    pub pass_through: bool,
}

/// Single computed field of an expression node
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionEntry {
    #[serde(default)]
    pub id: String,

    /// Dot path of the produced field
    pub key: String,

    /// Expression source
    pub value: String,
}

/// Function node content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionContent {
    /// Expression source evaluated against the node input
    pub source: String,
}

/// Custom node content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomContent {
    /// Component tag the host handler dispatches on
    pub component: String,

    /// Opaque configuration handed to the handler
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Sub-decision reference content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionReferenceContent {
    /// Key resolved through the loader
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_content_defaults() {
        let content: DecisionTableContent = serde_json::from_str(r#"{"rules":[]}"#).unwrap();
        assert_eq!(content.hit_policy, HitPolicy::First);
        assert!(!content.pass_through);
    }

    #[test]
    fn test_table_rule_cells() {
        let rule: TableRule = serde_json::from_str(
            r#"{"_id":"r1","in":"< 10","out":"0","blank":"  ","num":5,"none":null}"#,
        )
        .unwrap();
        assert_eq!(rule.id.as_deref(), Some("r1"));
        assert!(!rule.is_default);
        assert_eq!(rule.cell("in").as_deref(), Some("< 10"));
        assert_eq!(rule.cell("num").as_deref(), Some("5"));
        assert_eq!(rule.cell("blank"), None);
        assert_eq!(rule.cell("none"), None);
        assert_eq!(rule.cell("missing"), None);
        assert!(!rule.cells.contains_key("_id"));
    }

    #[test]
    fn test_hit_policy_wire_names() {
        let policy: HitPolicy = serde_json::from_str(r#""collect""#).unwrap();
        assert_eq!(policy, HitPolicy::Collect);
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(NodeKind::Output.type_tag(), "outputNode");
        assert_eq!(
            NodeKind::Decision(DecisionReferenceContent::default()).type_tag(),
            "decisionNode"
        );
    }
}
