//! Expression AST nodes

use super::function::BuiltinFunction;
use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Field access by identifier path (e.g., customer.age, cart.total)
    FieldAccess(Vec<String>),

    /// The unary subject (`$`)
    Subject,

    /// The current element inside a closure argument (`#`)
    ClosureElement,

    /// Index or computed member access (e.g., items[0], data['key'], f(x).y)
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Built-in function call
    FunctionCall {
        function: BuiltinFunction,
        args: Vec<Expression>,
    },

    /// Ternary conditional (condition ? true_expr : false_expr)
    Ternary {
        condition: Box<Expression>,
        true_expr: Box<Expression>,
        false_expr: Box<Expression>,
    },

    /// Array literal
    Array(Vec<Expression>),

    /// Object literal, entries kept in source order
    Object(Vec<(String, Expression)>),

    /// Interval literal (e.g., [1..10], (0..1])
    Interval {
        start: Box<Expression>,
        end: Box<Expression>,
        start_inclusive: bool,
        end_inclusive: bool,
    },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (not, !)
    Not,
    /// Arithmetic negation (-)
    Negate,
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(value)
    }

    /// Create a field access expression
    pub fn field_access(path: Vec<String>) -> Self {
        Expression::FieldAccess(path)
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a function call expression
    pub fn function_call(function: BuiltinFunction, args: Vec<Expression>) -> Self {
        Expression::FunctionCall { function, args }
    }

    /// Create an index expression
    pub fn index(object: Expression, index: Expression) -> Self {
        Expression::Index {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Create a ternary expression
    pub fn ternary(condition: Expression, true_expr: Expression, false_expr: Expression) -> Self {
        Expression::Ternary {
            condition: Box::new(condition),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
        }
    }

    /// Whether the expression mentions the unary subject `$` anywhere.
    ///
    /// Closure bodies are included: `some(items, # == $)` refers to `$`.
    pub fn references_subject(&self) -> bool {
        match self {
            Expression::Subject => true,
            Expression::Literal(_) | Expression::FieldAccess(_) | Expression::ClosureElement => {
                false
            }
            Expression::Index { object, index } => {
                object.references_subject() || index.references_subject()
            }
            Expression::Binary { left, right, .. } => {
                left.references_subject() || right.references_subject()
            }
            Expression::Unary { operand, .. } => operand.references_subject(),
            Expression::FunctionCall { args, .. } | Expression::Array(args) => {
                args.iter().any(Expression::references_subject)
            }
            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                condition.references_subject()
                    || true_expr.references_subject()
                    || false_expr.references_subject()
            }
            Expression::Object(entries) => entries.iter().any(|(_, e)| e.references_subject()),
            Expression::Interval { start, end, .. } => {
                start.references_subject() || end.references_subject()
            }
        }
    }

    /// Whether the expression is an array or interval literal
    pub fn is_collection_literal(&self) -> bool {
        matches!(self, Expression::Array(_) | Expression::Interval { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_expression() {
        // customer.age > 18
        let expr = Expression::binary(
            Expression::field_access(vec!["customer".to_string(), "age".to_string()]),
            Operator::Gt,
            Expression::literal(Value::Number(18.0)),
        );

        match expr {
            Expression::Binary { left, op, right } => {
                assert_eq!(op, Operator::Gt);
                assert_eq!(
                    *left,
                    Expression::FieldAccess(vec!["customer".to_string(), "age".to_string()])
                );
                assert_eq!(*right, Expression::Literal(Value::Number(18.0)));
            }
            _ => panic!("Expected Binary expression"),
        }
    }

    #[test]
    fn test_references_subject() {
        let plain = Expression::binary(
            Expression::field_access(vec!["a".to_string()]),
            Operator::Add,
            Expression::literal(Value::Number(1.0)),
        );
        assert!(!plain.references_subject());

        let with_subject = Expression::binary(
            Expression::Subject,
            Operator::Gt,
            Expression::literal(Value::Number(1.0)),
        );
        assert!(with_subject.references_subject());

        let in_closure = Expression::function_call(
            BuiltinFunction::Some,
            vec![
                Expression::field_access(vec!["items".to_string()]),
                Expression::binary(Expression::ClosureElement, Operator::Eq, Expression::Subject),
            ],
        );
        assert!(in_closure.references_subject());
    }

    #[test]
    fn test_collection_literal() {
        assert!(Expression::Array(vec![]).is_collection_literal());
        assert!(!Expression::Subject.is_collection_literal());
    }
}
