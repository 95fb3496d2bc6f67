//! Tree-walking expression evaluator

use super::functions::call_function;
use super::operators::{execute_binary_op, execute_compare, execute_membership, execute_unary_op};
use crate::context::{lookup_field, Scope};
use crate::error::{Result, RuntimeError};
use std::collections::BTreeMap;
use verdict_core::ast::{Expression, Operator};
use verdict_core::Value;

/// Evaluate an expression in a scope
pub(crate) fn eval(expr: &Expression, scope: &Scope<'_>) -> Result<Value> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),

        Expression::FieldAccess(path) => lookup_field(scope.root(), path),

        Expression::Subject => scope.subject().cloned(),

        Expression::ClosureElement => scope.element().cloned(),

        Expression::Index { object, index } => {
            let object = eval(object, scope)?;
            let index = eval(index, scope)?;
            Ok(index_value(&object, &index))
        }

        Expression::Binary { left, op, right } => eval_binary(left, op, right, scope),

        Expression::Unary { op, operand } => {
            let operand = eval(operand, scope)?;
            execute_unary_op(&operand, op)
        }

        Expression::FunctionCall { function, args } => call_function(function, args, scope),

        Expression::Ternary {
            condition,
            true_expr,
            false_expr,
        } => {
            if expect_bool(eval(condition, scope)?, "?:")? {
                eval(true_expr, scope)
            } else {
                eval(false_expr, scope)
            }
        }

        Expression::Array(items) => items
            .iter()
            .map(|item| eval(item, scope))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),

        Expression::Object(entries) => {
            let mut map = BTreeMap::new();
            for (key, value) in entries {
                map.insert(key.clone(), eval(value, scope)?);
            }
            Ok(Value::Object(map))
        }

        Expression::Interval { .. } => Err(RuntimeError::type_error(
            "interval can only be used on the right side of 'in'",
        )),
    }
}

fn eval_binary(
    left: &Expression,
    op: &Operator,
    right: &Expression,
    scope: &Scope<'_>,
) -> Result<Value> {
    match op {
        Operator::And => {
            if !expect_bool(eval(left, scope)?, "and")? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(expect_bool(eval(right, scope)?, "and")?))
        }
        Operator::Or => {
            if expect_bool(eval(left, scope)?, "or")? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(expect_bool(eval(right, scope)?, "or")?))
        }
        Operator::Coalesce => {
            // An unknown identifier on the left counts as null
            let value = match eval(left, scope) {
                Ok(value) => value,
                Err(RuntimeError::UndefinedReference(_)) => Value::Null,
                Err(e) => return Err(e),
            };
            if value.is_null() {
                eval(right, scope)
            } else {
                Ok(value)
            }
        }
        Operator::In | Operator::NotIn => {
            let needle = eval(left, scope)?;
            let found = match right {
                Expression::Interval {
                    start,
                    end,
                    start_inclusive,
                    end_inclusive,
                } => {
                    let start = eval(start, scope)?;
                    let end = eval(end, scope)?;
                    let inside = in_interval(&needle, &start, &end, *start_inclusive, *end_inclusive)?;
                    Value::Bool(if *op == Operator::NotIn { !inside } else { inside })
                }
                other => execute_membership(&needle, op, &eval(other, scope)?)?,
            };
            Ok(found)
        }
        op if op.is_comparison() => {
            let left = eval(left, scope)?;
            let right = eval(right, scope)?;
            let result = execute_compare(&left, op, &right)?;
            tracing::trace!("Compare {} {} {} = {}", left, op, right, result);
            Ok(Value::Bool(result))
        }
        op => {
            let left = eval(left, scope)?;
            let right = eval(right, scope)?;
            execute_binary_op(&left, op, &right)
        }
    }
}

fn in_interval(
    needle: &Value,
    start: &Value,
    end: &Value,
    start_inclusive: bool,
    end_inclusive: bool,
) -> Result<bool> {
    let (Value::Number(start), Value::Number(end)) = (start, end) else {
        return Err(RuntimeError::type_error(format!(
            "interval bounds must be numbers, got {} and {}",
            start.type_name(),
            end.type_name()
        )));
    };

    match needle {
        Value::Number(n) => {
            let above = if start_inclusive { n >= start } else { n > start };
            let below = if end_inclusive { n <= end } else { n < end };
            Ok(above && below)
        }
        Value::Null => Ok(false),
        other => Err(RuntimeError::type_error(format!(
            "cannot test {} against a numeric interval",
            other.type_name()
        ))),
    }
}

/// Computed member access; anything that cannot be indexed yields null
fn index_value(object: &Value, index: &Value) -> Value {
    match (object, index) {
        (Value::Array(items), Value::Number(n)) => {
            if n.fract() != 0.0 {
                return Value::Null;
            }
            let position = if *n < 0.0 {
                items.len() as f64 + n
            } else {
                *n
            };
            if position < 0.0 {
                return Value::Null;
            }
            items.get(position as usize).cloned().unwrap_or(Value::Null)
        }
        (Value::Object(map), Value::String(key)) => map.get(key).cloned().unwrap_or(Value::Null),
        (Value::String(text), Value::Number(n)) if *n >= 0.0 && n.fract() == 0.0 => text
            .chars()
            .nth(*n as usize)
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn expect_bool(value: Value, op: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(RuntimeError::type_error(format!(
            "'{}' expects bool operands, got {}",
            op,
            other.type_name()
        ))),
    }
}
