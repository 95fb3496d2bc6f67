//! Expression compiler
//!
//! Parses expression sources found in node content and attaches the owning
//! node to any parse failure.

use crate::error::{CompileError, Result};
use crate::optimizer::ConstantFolder;
use verdict_core::ast::Expression;
use verdict_parser::{ExpressionParser, ParseError};

/// Expression compiler
pub struct ExpressionCompiler {
    folder: Option<ConstantFolder>,
}

impl ExpressionCompiler {
    /// Create an expression compiler, optionally folding constants
    pub fn new(fold_constants: bool) -> Self {
        Self {
            folder: fold_constants.then(ConstantFolder::new),
        }
    }

    /// Compile a standard expression
    pub fn compile(&self, node_id: &str, location: &str, source: &str) -> Result<Expression> {
        let expr = ExpressionParser::parse(source).map_err(|e| Self::wrap(node_id, location, e))?;
        Ok(self.optimize(expr))
    }

    /// Compile a unary (table cell) expression
    pub fn compile_unary(&self, node_id: &str, location: &str, source: &str) -> Result<Expression> {
        let expr =
            ExpressionParser::parse_unary(source).map_err(|e| Self::wrap(node_id, location, e))?;
        Ok(self.optimize(expr))
    }

    fn optimize(&self, expr: Expression) -> Expression {
        match &self.folder {
            Some(folder) => folder.fold(&expr),
            None => expr,
        }
    }

    fn wrap(node_id: &str, location: &str, source: ParseError) -> CompileError {
        CompileError::InvalidExpression {
            node_id: node_id.to_string(),
            location: location.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::ast::Operator;
    use verdict_core::Value;

    #[test]
    fn test_compile_with_folding() {
        let compiler = ExpressionCompiler::new(true);
        let expr = compiler.compile("n1", "source", "2 * 3").unwrap();
        assert_eq!(expr, Expression::literal(Value::Number(6.0)));

        let compiler = ExpressionCompiler::new(false);
        let expr = compiler.compile("n1", "source", "2 * 3").unwrap();
        assert!(matches!(expr, Expression::Binary { op: Operator::Mul, .. }));
    }

    #[test]
    fn test_error_carries_node() {
        let compiler = ExpressionCompiler::new(true);
        match compiler.compile_unary("table", "rule 'r1'", "> ") {
            Err(CompileError::InvalidExpression {
                node_id, location, ..
            }) => {
                assert_eq!(node_id, "table");
                assert_eq!(location, "rule 'r1'");
            }
            other => panic!("Expected InvalidExpression, got {:?}", other),
        }
    }
}
