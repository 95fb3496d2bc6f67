//! Input node

use super::NodeOutput;
use std::collections::BTreeMap;
use verdict_core::Value;

/// The caller context, narrowed to `schema` fields when declared.
///
/// Fields named by the schema but absent from the context are left out.
pub(crate) fn evaluate_input_node(context: &Value, schema: Option<&[String]>) -> NodeOutput {
    let Some(fields) = schema else {
        return NodeOutput::new(context.clone());
    };

    let kept: BTreeMap<String, Value> = fields
        .iter()
        .filter_map(|field| context.get(field).map(|v| (field.clone(), v.clone())))
        .collect();

    NodeOutput::new(Value::Object(kept))
}
