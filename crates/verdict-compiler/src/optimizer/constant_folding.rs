//! Constant folding optimizer
//!
//! Evaluates constant sub-expressions at compile time. Only operations whose
//! runtime result cannot fail are folded; `1 / 0` is left for the evaluator
//! to report.

use verdict_core::ast::{Expression, Operator, UnaryOperator};
use verdict_core::Value;

/// Constant folding optimizer
pub struct ConstantFolder;

impl ConstantFolder {
    /// Create a new constant folder
    pub fn new() -> Self {
        Self
    }

    /// Optimize an expression by folding constants
    pub fn fold(&self, expr: &Expression) -> Expression {
        match expr {
            Expression::Literal(_)
            | Expression::FieldAccess(_)
            | Expression::Subject
            | Expression::ClosureElement => expr.clone(),

            Expression::Binary { left, op, right } => {
                let left_folded = self.fold(left);
                let right_folded = self.fold(right);

                if let (Expression::Literal(left_val), Expression::Literal(right_val)) =
                    (&left_folded, &right_folded)
                {
                    if let Some(result) = self.fold_binary_op(left_val, op, right_val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::binary(left_folded, *op, right_folded)
            }

            Expression::Unary { op, operand } => {
                let operand_folded = self.fold(operand);

                if let Expression::Literal(val) = &operand_folded {
                    if let Some(result) = self.fold_unary_op(op, val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::unary(*op, operand_folded)
            }

            // Calls are never folded, only their arguments
            Expression::FunctionCall { function, args } => Expression::function_call(
                *function,
                args.iter().map(|arg| self.fold(arg)).collect(),
            ),

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                let condition_folded = self.fold(condition);

                if let Expression::Literal(Value::Bool(cond)) = &condition_folded {
                    return if *cond {
                        self.fold(true_expr)
                    } else {
                        self.fold(false_expr)
                    };
                }

                Expression::ternary(
                    condition_folded,
                    self.fold(true_expr),
                    self.fold(false_expr),
                )
            }

            Expression::Index { object, index } => {
                Expression::index(self.fold(object), self.fold(index))
            }

            Expression::Array(items) => {
                Expression::Array(items.iter().map(|item| self.fold(item)).collect())
            }

            Expression::Object(entries) => Expression::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.fold(value)))
                    .collect(),
            ),

            Expression::Interval {
                start,
                end,
                start_inclusive,
                end_inclusive,
            } => Expression::Interval {
                start: Box::new(self.fold(start)),
                end: Box::new(self.fold(end)),
                start_inclusive: *start_inclusive,
                end_inclusive: *end_inclusive,
            },
        }
    }

    /// Fold a binary operation on two constant values
    fn fold_binary_op(&self, left: &Value, op: &Operator, right: &Value) -> Option<Value> {
        match (left, op, right) {
            // Arithmetic operations on numbers
            (Value::Number(l), Operator::Add, Value::Number(r)) => Some(Value::Number(l + r)),
            (Value::Number(l), Operator::Sub, Value::Number(r)) => Some(Value::Number(l - r)),
            (Value::Number(l), Operator::Mul, Value::Number(r)) => Some(Value::Number(l * r)),
            (Value::Number(l), Operator::Div, Value::Number(r)) if *r != 0.0 => {
                Some(Value::Number(l / r))
            }
            (Value::Number(l), Operator::Mod, Value::Number(r)) if *r != 0.0 => {
                Some(Value::Number(l % r))
            }
            (Value::Number(l), Operator::Pow, Value::Number(r)) => Some(Value::Number(l.powf(*r))),

            // String concatenation
            (Value::String(l), Operator::Add, Value::String(r)) => {
                Some(Value::String(format!("{}{}", l, r)))
            }

            // Comparison operations on numbers
            (Value::Number(l), Operator::Gt, Value::Number(r)) => Some(Value::Bool(l > r)),
            (Value::Number(l), Operator::Ge, Value::Number(r)) => Some(Value::Bool(l >= r)),
            (Value::Number(l), Operator::Lt, Value::Number(r)) => Some(Value::Bool(l < r)),
            (Value::Number(l), Operator::Le, Value::Number(r)) => Some(Value::Bool(l <= r)),

            // Equality on same-typed scalars
            (Value::Number(l), Operator::Eq, Value::Number(r)) => Some(Value::Bool(l == r)),
            (Value::Number(l), Operator::Ne, Value::Number(r)) => Some(Value::Bool(l != r)),
            (Value::String(l), Operator::Eq, Value::String(r)) => Some(Value::Bool(l == r)),
            (Value::String(l), Operator::Ne, Value::String(r)) => Some(Value::Bool(l != r)),
            (Value::Bool(l), Operator::Eq, Value::Bool(r)) => Some(Value::Bool(l == r)),
            (Value::Bool(l), Operator::Ne, Value::Bool(r)) => Some(Value::Bool(l != r)),

            // Logical operations on booleans
            (Value::Bool(l), Operator::And, Value::Bool(r)) => Some(Value::Bool(*l && *r)),
            (Value::Bool(l), Operator::Or, Value::Bool(r)) => Some(Value::Bool(*l || *r)),

            // Coalescing constants
            (Value::Null, Operator::Coalesce, r) => Some(r.clone()),
            (l, Operator::Coalesce, _) => Some(l.clone()),

            _ => None,
        }
    }

    /// Fold a unary operation on a constant value
    fn fold_unary_op(&self, op: &UnaryOperator, operand: &Value) -> Option<Value> {
        match (op, operand) {
            (UnaryOperator::Not, Value::Bool(b)) => Some(Value::Bool(!b)),
            (UnaryOperator::Negate, Value::Number(n)) => Some(Value::Number(-n)),
            _ => None,
        }
    }
}

impl Default for ConstantFolder {
    fn default() -> Self {
        Self::new()
    }
}
