//! Expression evaluation
//!
//! Evaluates parsed expressions and templates against a [`Scope`]. All
//! evaluation is a pure function of the expression and the scope.

mod evaluator;
mod functions;
mod operators;
mod template;

use crate::context::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::{Expression, Template};
use verdict_core::Value;

/// Evaluate an expression
pub fn evaluate(expr: &Expression, scope: &Scope<'_>) -> Result<Value> {
    evaluator::eval(expr, scope)
}

/// Evaluate a unary-mode expression, which must produce a boolean
pub fn evaluate_unary(expr: &Expression, scope: &Scope<'_>) -> Result<bool> {
    match evaluator::eval(expr, scope)? {
        Value::Bool(b) => Ok(b),
        other => Err(RuntimeError::NonBooleanUnary(other.type_name().to_string())),
    }
}

/// Render a template to a value
pub fn render_template(template: &Template, scope: &Scope<'_>) -> Result<Value> {
    template::render(template, scope)
}
