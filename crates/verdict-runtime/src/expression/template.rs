//! Template rendering

use super::evaluator::eval;
use crate::context::Scope;
use crate::error::Result;
use verdict_core::ast::{Template, TemplateSegment};
use verdict_core::Value;

/// Render a template.
///
/// A template made of a single span yields that span's typed value;
/// anything else renders to a string.
pub(crate) fn render(template: &Template, scope: &Scope<'_>) -> Result<Value> {
    if let Some(expr) = template.single_expression() {
        return eval(expr, scope);
    }

    let mut out = String::new();
    for segment in &template.segments {
        match segment {
            TemplateSegment::Text(text) => out.push_str(text),
            TemplateSegment::Expression(expr) => {
                out.push_str(&eval(expr, scope)?.to_template_string())
            }
        }
    }
    Ok(Value::String(out))
}
