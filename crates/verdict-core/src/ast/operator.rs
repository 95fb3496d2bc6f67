//! Operators for Verdict expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,

    // Arithmetic operators
    /// Addition (+), also string concatenation
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Mod,
    /// Exponentiation (^)
    Pow,

    // Logical operators
    /// Logical AND (and, &&)
    And,
    /// Logical OR (or, ||)
    Or,
    /// Null coalescing (??)
    Coalesce,

    // Membership operators
    /// In (element in array, interval, object keys or string)
    In,
    /// Not in
    NotIn,
}

impl Operator {
    /// Returns true if this is a comparison operator
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Ne | Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le
        )
    }

    /// Returns true if this is an arithmetic operator
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Sub
                | Operator::Mul
                | Operator::Div
                | Operator::Mod
                | Operator::Pow
        )
    }

    /// Returns true if this is a logical operator
    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Coalesce)
    }

    /// Returns true if this is a membership operator
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Source text of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "^",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Coalesce => "??",
            Operator::In => "in",
            Operator::NotIn => "not in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_is_comparison() {
        assert!(Operator::Eq.is_comparison());
        assert!(Operator::Gt.is_comparison());
        assert!(Operator::Lt.is_comparison());
        assert!(!Operator::Add.is_comparison());
        assert!(!Operator::And.is_comparison());
    }

    #[test]
    fn test_operator_is_arithmetic() {
        assert!(Operator::Add.is_arithmetic());
        assert!(Operator::Pow.is_arithmetic());
        assert!(!Operator::Eq.is_arithmetic());
        assert!(!Operator::In.is_arithmetic());
    }

    #[test]
    fn test_operator_is_logical() {
        assert!(Operator::And.is_logical());
        assert!(Operator::Or.is_logical());
        assert!(Operator::Coalesce.is_logical());
        assert!(!Operator::Eq.is_logical());
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(Operator::NotIn.to_string(), "not in");
        assert_eq!(Operator::Ge.to_string(), ">=");
    }
}
