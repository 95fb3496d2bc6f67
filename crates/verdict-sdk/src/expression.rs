//! Standalone expression helpers
//!
//! Evaluate a single expression, unary test or template against any
//! serializable context, without building a decision graph.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use verdict_core::Value;
use verdict_parser::{ExpressionParser, TemplateParser};
use verdict_runtime::Scope;

/// Evaluate an expression and decode the result
///
/// ```
/// use serde_json::json;
///
/// let total: f64 = verdict_sdk::evaluate_expression("10 + a", &json!({"a": 4})).unwrap();
/// assert_eq!(total, 14.0);
/// ```
pub fn evaluate_expression<T, C>(expression: &str, context: &C) -> Result<T>
where
    T: DeserializeOwned,
    C: Serialize + ?Sized,
{
    let expr = ExpressionParser::parse(expression)?;
    let root = Value::from_serializable(context)?;
    let value = verdict_runtime::evaluate(&expr, &Scope::new(&root))?;
    Ok(value.deserialize_into()?)
}

/// Evaluate a unary test; the subject is the context's `$` member
///
/// ```
/// use serde_json::json;
///
/// assert!(verdict_sdk::evaluate_unary_expression("> 10", &json!({"$": 15})).unwrap());
/// ```
pub fn evaluate_unary_expression<C: Serialize + ?Sized>(expression: &str, context: &C) -> Result<bool> {
    let expr = ExpressionParser::parse_unary(expression)?;
    let root = Value::from_serializable(context)?;
    Ok(verdict_runtime::evaluate_unary(&expr, &Scope::new(&root))?)
}

/// Render a template and decode the result
pub fn render_template<T, C>(template: &str, context: &C) -> Result<T>
where
    T: DeserializeOwned,
    C: Serialize + ?Sized,
{
    let template = TemplateParser::parse(template)?;
    let root = Value::from_serializable(context)?;
    let value = verdict_runtime::render_template(&template, &Scope::new(&root))?;
    Ok(value.deserialize_into()?)
}
