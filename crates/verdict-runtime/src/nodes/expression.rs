//! Expression node
//!
//! Every entry is evaluated against the node input, not against the
//! results of earlier entries, and stored under its dot path.

use super::{pass_through, NodeOutput};
use crate::context::Scope;
use crate::error::Result;
use crate::expression::evaluate;
use verdict_core::ast::Expression;
use verdict_core::Value;

pub(crate) fn evaluate_expression_node(
    entries: &[(Vec<String>, Expression)],
    pass: bool,
    input: &Value,
) -> Result<NodeOutput> {
    let scope = Scope::new(input);
    let mut output = Value::empty_object();

    for (path, expr) in entries {
        let value = evaluate(expr, &scope)?;
        tracing::trace!("Expression '{}' = {}", path.join("."), value);
        output.set_path(path.as_slice(), value);
    }

    Ok(NodeOutput::new(pass_through(input, output, pass)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verdict_parser::ExpressionParser;

    fn entry(path: &str, source: &str) -> (Vec<String>, Expression) {
        (
            path.split('.').map(str::to_string).collect(),
            ExpressionParser::parse(source).unwrap(),
        )
    }

    #[test]
    fn test_nested_keys() {
        let input = Value::from(json!({
            "numbers": [1, 5, 15, 25],
            "firstName": "John",
            "lastName": "Doe"
        }));
        let entries = vec![
            entry("deep.nested.sum", "sum(numbers)"),
            entry("fullName", "firstName + ' ' + lastName"),
            entry("largeNumbers", "filter(numbers, # >= 10)"),
            entry("smallNumbers", "filter(numbers, # < 10)"),
        ];

        let output = evaluate_expression_node(&entries, false, &input).unwrap().output;
        assert_eq!(
            output,
            Value::from(json!({
                "deep": {"nested": {"sum": 46}},
                "fullName": "John Doe",
                "largeNumbers": [15, 25],
                "smallNumbers": [1, 5]
            }))
        );
    }

    #[test]
    fn test_pass_through() {
        let input = Value::from(json!({"a": 1, "b": {"x": 1}}));
        let entries = vec![entry("b.y", "a + 1")];

        let output = evaluate_expression_node(&entries, true, &input).unwrap().output;
        assert_eq!(output, Value::from(json!({"a": 1, "b": {"x": 1, "y": 2}})));
    }
}
