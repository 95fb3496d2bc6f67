//! Binary operator execution

use crate::error::{Result, RuntimeError};
use verdict_core::ast::Operator;
use verdict_core::Value;

/// Execute an arithmetic operation
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    match (left, op, right) {
        (Value::Number(l), Operator::Add, Value::Number(r)) => finite(l + r),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => finite(l - r),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => finite(l * r),
        (Value::Number(l), Operator::Div | Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(RuntimeError::DivisionByZero)
            } else if *op == Operator::Div {
                finite(l / r)
            } else {
                finite(l % r)
            }
        }
        (Value::Number(l), Operator::Pow, Value::Number(r)) => finite(l.powf(*r)),

        // String concatenation when either side is a string
        (Value::String(_), Operator::Add, other) | (other, Operator::Add, Value::String(_))
            if !other.is_null() =>
        {
            Ok(Value::String(format!(
                "{}{}",
                left.to_template_string(),
                right.to_template_string()
            )))
        }

        _ => Err(RuntimeError::type_error(format!(
            "cannot apply '{}' to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}

/// Numbers must stay finite; infinities and NaN have no JSON form
pub(crate) fn finite(n: f64) -> Result<Value> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(RuntimeError::type_error(format!(
            "numeric result {} is out of range",
            n
        )))
    }
}

/// Execute `in` / `not in` against a collection value
pub(crate) fn execute_membership(needle: &Value, op: &Operator, haystack: &Value) -> Result<Value> {
    let found = match haystack {
        Value::Array(items) => items.iter().any(|item| values_equal(needle, item)),
        Value::Object(map) => match needle {
            Value::String(key) => map.contains_key(key),
            _ => false,
        },
        Value::String(text) => match needle {
            Value::String(part) => text.contains(part.as_str()),
            other => {
                return Err(RuntimeError::type_error(format!(
                    "cannot search for {} in a string",
                    other.type_name()
                )))
            }
        },
        Value::Null => false,
        other => {
            return Err(RuntimeError::type_error(format!(
                "'{}' expects an array, object, string or interval, got {}",
                op,
                other.type_name()
            )))
        }
    };

    Ok(Value::Bool(if *op == Operator::NotIn { !found } else { found }))
}

/// Value equality: numbers by value, everything else structurally
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l == r,
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .zip(r)
                    .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        }
        _ => left == right,
    }
}
