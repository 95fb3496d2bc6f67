//! Comparison operator execution

use super::binary::values_equal;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::Operator;
use verdict_core::Value;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    match op {
        Operator::Eq => return Ok(values_equal(left, right)),
        Operator::Ne => return Ok(!values_equal(left, right)),
        _ => {}
    }

    // Ordering against a missing value never holds
    if left.is_null() || right.is_null() {
        tracing::trace!(
            "Null comparison: {} {} {}, returning false",
            left.type_name(),
            op,
            right.type_name()
        );
        return Ok(false);
    }

    match (left, op, right) {
        (Value::Number(l), Operator::Gt, Value::Number(r)) => Ok(l > r),
        (Value::Number(l), Operator::Ge, Value::Number(r)) => Ok(l >= r),
        (Value::Number(l), Operator::Lt, Value::Number(r)) => Ok(l < r),
        (Value::Number(l), Operator::Le, Value::Number(r)) => Ok(l <= r),

        (Value::String(l), Operator::Gt, Value::String(r)) => Ok(l > r),
        (Value::String(l), Operator::Ge, Value::String(r)) => Ok(l >= r),
        (Value::String(l), Operator::Lt, Value::String(r)) => Ok(l < r),
        (Value::String(l), Operator::Le, Value::String(r)) => Ok(l <= r),

        _ => Err(RuntimeError::type_error(format!(
            "cannot compare {} and {} with '{}'",
            left.type_name(),
            right.type_name(),
            op
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_comparisons() {
        assert!(execute_compare(&Value::Number(15.0), &Operator::Gt, &Value::Number(10.0)).unwrap());
        assert!(!execute_compare(&Value::Number(5.0), &Operator::Gt, &Value::Number(10.0)).unwrap());
        assert!(execute_compare(&Value::Number(10.0), &Operator::Le, &Value::Number(10.0)).unwrap());
    }

    #[test]
    fn test_equality_across_types() {
        assert!(execute_compare(&Value::Null, &Operator::Eq, &Value::Null).unwrap());
        assert!(execute_compare(&Value::Number(1.0), &Operator::Ne, &Value::String("1".into())).unwrap());
        assert!(!execute_compare(&Value::Bool(true), &Operator::Eq, &Value::Number(1.0)).unwrap());
    }

    #[test]
    fn test_null_ordering_is_false() {
        assert!(!execute_compare(&Value::Null, &Operator::Lt, &Value::Number(1.0)).unwrap());
        assert!(!execute_compare(&Value::Number(1.0), &Operator::Ge, &Value::Null).unwrap());
    }

    #[test]
    fn test_mismatched_ordering_is_error() {
        assert!(execute_compare(&Value::String("a".into()), &Operator::Gt, &Value::Number(1.0)).is_err());
    }
}
