//! Unary operator execution

use crate::error::{Result, RuntimeError};
use verdict_core::ast::UnaryOperator;
use verdict_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Not, other) => Err(RuntimeError::type_error(format!(
            "'not' expects a bool, got {}",
            other.type_name()
        ))),
        (UnaryOperator::Negate, other) => Err(RuntimeError::type_error(format!(
            "'-' expects a number, got {}",
            other.type_name()
        ))),
    }
}
