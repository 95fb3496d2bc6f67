//! Operator execution modules
//!
//! Evaluation of operators on already-computed operand values. Short-circuit
//! operators (`and`, `or`, `??`) and interval membership are handled by the
//! evaluator itself.

mod binary;
mod comparison;
mod unary;

pub(crate) use binary::{execute_binary_op, execute_membership, finite, values_equal};
pub(crate) use comparison::execute_compare;
pub(crate) use unary::execute_unary_op;
