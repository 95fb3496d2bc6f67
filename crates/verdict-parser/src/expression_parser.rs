//! Expression parser
//!
//! Parses string expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Field access: `user.age`, `items[0]`, `data['key']`
//! - Literals: `42`, `3.14`, `'string'`, `"string"`, `true`, `false`, `null`
//! - Arrays, objects and intervals: `[1, 2]`, `{a: 1}`, `[1..10]`, `(0..1]`
//! - Binary operators: `+ - * / % ^`, `== != < <= > >=`, `and or && ||`, `??`, `in`, `not in`
//! - Unary operators: `not`, `!`, `-`
//! - Ternary: `cond ? a : b`
//! - Built-in function calls: `len(name)`, `filter(items, # > 10)`
//! - Special bindings: `$` (unary subject), `#` (closure element)
//!
//! Unary mode ([`ExpressionParser::parse_unary`]) is used for decision table
//! cells, where the column value `$` is implied: `> 10`, `'US', 'CA'`, `[1..5]`.

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use verdict_core::ast::{BuiltinFunction, Expression, Operator, UnaryOperator};
use verdict_core::Value;

/// Deepest bracket, call or prefix-operator nesting accepted in one expression
pub const MAX_NESTING: usize = 64;

/// Most binary operators accepted in one expression
pub const MAX_OPERATORS: usize = 512;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse a standard expression
    pub fn parse(input: &str) -> Result<Expression> {
        if input.trim().is_empty() {
            return Err(ParseError::UnexpectedEnd("empty expression".to_string()));
        }

        let mut parser = Parser::new(Lexer::tokenize(input)?);
        let expr = parser.expression()?;
        parser.expect_end()?;
        Ok(expr)
    }

    /// Parse a unary (table cell) expression.
    ///
    /// The result is a boolean expression over the subject `$`:
    /// - empty or `-` matches anything
    /// - `> 10`, `<= limit` compare `$` with the operand
    /// - `> 10 and < 20` chains comparisons on `$`
    /// - `[1..10]`, `['a', 'b']`, `in list`, `not in list` test membership of `$`
    /// - expressions mentioning `$` are used as written
    /// - anything else is compared for equality with `$`
    ///
    /// Top-level commas separate alternatives: `'US', 'CA'` matches either.
    pub fn parse_unary(input: &str) -> Result<Expression> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok(Expression::literal(Value::Bool(true)));
        }

        let mut parser = Parser::new(Lexer::tokenize(trimmed)?);
        let mut expr = parser.unary_item()?;
        while parser.eat(&TokenKind::Comma) {
            parser.count_operator()?;
            let alternative = parser.unary_item()?;
            expr = Expression::binary(expr, Operator::Or, alternative);
        }
        parser.expect_end()?;
        Ok(expr)
    }
}

/// Recursive-descent parser over a token list
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
    operators: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
            operators: 0,
        }
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_NESTING`]
    fn with_nesting<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_NESTING {
            return Err(ParseError::syntax(
                self.position(),
                format!(
                    "expression nesting exceeds limit: depth {} (max {})",
                    next_depth, MAX_NESTING
                ),
            ));
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Operator chains build left-deep trees, so their length is bounded too
    fn count_operator(&mut self) -> Result<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ParseError::syntax(
                self.position(),
                format!("expression has more than {} operators", MAX_OPERATORS),
            ));
        }
        Ok(())
    }

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + offset)
            .or_else(|| self.tokens.last())
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.position)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn eat(&mut self, expected: &TokenKind) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> Result<()> {
        if self.eat(&expected) {
            return Ok(());
        }
        Err(self.unexpected(what))
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            TokenKind::Eof => Ok(()),
            other => Err(ParseError::syntax(
                self.position(),
                format!("unexpected token {:?}", other),
            )),
        }
    }

    fn unexpected(&self, what: &str) -> ParseError {
        match self.peek() {
            TokenKind::Eof => ParseError::UnexpectedEnd(format!("expected {}", what)),
            other => ParseError::syntax(
                self.position(),
                format!("expected {}, found {:?}", what, other),
            ),
        }
    }

    // Precedence levels, lowest first

    fn expression(&mut self) -> Result<Expression> {
        self.with_nesting(Self::ternary)
    }

    fn ternary(&mut self) -> Result<Expression> {
        let condition = self.coalesce()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }
        let true_expr = self.expression()?;
        self.expect(TokenKind::Colon, "':' in ternary expression")?;
        let false_expr = self.expression()?;
        Ok(Expression::ternary(condition, true_expr, false_expr))
    }

    fn coalesce(&mut self) -> Result<Expression> {
        let mut left = self.or()?;
        while self.eat(&TokenKind::QuestionQuestion) {
            self.count_operator()?;
            let right = self.or()?;
            left = Expression::binary(left, Operator::Coalesce, right);
        }
        Ok(left)
    }

    fn or(&mut self) -> Result<Expression> {
        let mut left = self.and()?;
        while matches!(self.peek(), TokenKind::Or | TokenKind::OrOr) {
            self.advance();
            self.count_operator()?;
            let right = self.and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expression> {
        let mut left = self.equality()?;
        while matches!(self.peek(), TokenKind::And | TokenKind::AndAnd) {
            self.advance();
            self.count_operator()?;
            let right = self.equality()?;
            left = Expression::binary(left, Operator::And, right);
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expression> {
        let mut left = self.comparison()?;
        loop {
            let op = match self.peek() {
                TokenKind::EqEq => Operator::Eq,
                TokenKind::NotEq => Operator::Ne,
                _ => return Ok(left),
            };
            self.advance();
            self.count_operator()?;
            let right = self.comparison()?;
            left = Expression::binary(left, op, right);
        }
    }

    fn comparison(&mut self) -> Result<Expression> {
        let mut left = self.membership()?;
        while let Some(op) = self.ordering_operator() {
            self.advance();
            self.count_operator()?;
            let right = self.membership()?;
            left = Expression::binary(left, op, right);
        }
        Ok(left)
    }

    fn ordering_operator(&self) -> Option<Operator> {
        match self.peek() {
            TokenKind::Lt => Some(Operator::Lt),
            TokenKind::Le => Some(Operator::Le),
            TokenKind::Gt => Some(Operator::Gt),
            TokenKind::Ge => Some(Operator::Ge),
            _ => None,
        }
    }

    fn membership(&mut self) -> Result<Expression> {
        let mut left = self.additive()?;
        loop {
            let op = match (self.peek(), self.peek_at(1)) {
                (TokenKind::In, _) => {
                    self.advance();
                    Operator::In
                }
                (TokenKind::Not, TokenKind::In) => {
                    self.advance();
                    self.advance();
                    Operator::NotIn
                }
                _ => return Ok(left),
            };
            self.count_operator()?;
            let right = self.additive()?;
            left = Expression::binary(left, op, right);
        }
    }

    fn additive(&mut self) -> Result<Expression> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => Operator::Add,
                TokenKind::Minus => Operator::Sub,
                _ => return Ok(left),
            };
            self.advance();
            self.count_operator()?;
            let right = self.multiplicative()?;
            left = Expression::binary(left, op, right);
        }
    }

    fn multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.prefix()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => Operator::Mul,
                TokenKind::Slash => Operator::Div,
                TokenKind::Percent => Operator::Mod,
                _ => return Ok(left),
            };
            self.advance();
            self.count_operator()?;
            let right = self.prefix()?;
            left = Expression::binary(left, op, right);
        }
    }

    fn prefix(&mut self) -> Result<Expression> {
        let op = match self.peek() {
            TokenKind::Not | TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.power(),
        };
        self.advance();
        let operand = self.with_nesting(Self::prefix)?;

        // Fold `-5` into a literal
        if let (UnaryOperator::Negate, Expression::Literal(Value::Number(n))) = (op, &operand) {
            return Ok(Expression::literal(Value::Number(-n)));
        }
        Ok(Expression::unary(op, operand))
    }

    /// `^` is right associative and binds tighter than prefix operators
    fn power(&mut self) -> Result<Expression> {
        let base = self.postfix()?;
        if !self.eat(&TokenKind::Caret) {
            return Ok(base);
        }
        let exponent = self.with_nesting(Self::prefix)?;
        Ok(Expression::binary(base, Operator::Pow, exponent))
    }

    fn postfix(&mut self) -> Result<Expression> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    let name = match self.advance() {
                        TokenKind::Identifier(name) => name,
                        _ => {
                            self.pos -= 1;
                            return Err(self.unexpected("member name after '.'"));
                        }
                    };
                    expr = match expr {
                        Expression::FieldAccess(mut path) => {
                            path.push(name);
                            Expression::FieldAccess(path)
                        }
                        other => Expression::index(other, Expression::literal(Value::String(name))),
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.expression()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    expr = Expression::index(expr, index);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expression::literal(Value::Number(n)))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expression::literal(Value::String(s)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::literal(Value::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::literal(Value::Bool(false)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expression::literal(Value::Null))
            }
            TokenKind::Dollar => {
                self.advance();
                Ok(Expression::Subject)
            }
            TokenKind::Hash => {
                self.advance();
                Ok(Expression::ClosureElement)
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.peek() == &TokenKind::LParen {
                    self.function_call(name)
                } else {
                    Ok(Expression::field_access(vec![name]))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                if self.eat(&TokenKind::DotDot) {
                    return self.interval_rest(inner, false);
                }
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                self.advance();
                if self.eat(&TokenKind::RBracket) {
                    return Ok(Expression::Array(Vec::new()));
                }
                let first = self.expression()?;
                if self.eat(&TokenKind::DotDot) {
                    return self.interval_rest(first, true);
                }
                let mut items = vec![first];
                while self.eat(&TokenKind::Comma) {
                    if self.peek() == &TokenKind::RBracket {
                        break;
                    }
                    items.push(self.expression()?);
                }
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Expression::Array(items))
            }
            TokenKind::LBrace => {
                self.advance();
                self.object_rest()
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Remainder of an interval after `start ..`
    fn interval_rest(&mut self, start: Expression, start_inclusive: bool) -> Result<Expression> {
        let end = self.additive()?;
        let end_inclusive = match self.peek() {
            TokenKind::RBracket => true,
            TokenKind::RParen => false,
            _ => return Err(self.unexpected("']' or ')' closing the interval")),
        };
        self.advance();
        Ok(Expression::Interval {
            start: Box::new(start),
            end: Box::new(end),
            start_inclusive,
            end_inclusive,
        })
    }

    /// Remainder of an object literal after `{`
    fn object_rest(&mut self) -> Result<Expression> {
        let mut entries = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            let key = match self.advance() {
                TokenKind::Identifier(key) | TokenKind::String(key) => key,
                _ => {
                    self.pos -= 1;
                    return Err(self.unexpected("object key"));
                }
            };
            self.expect(TokenKind::Colon, "':' after object key")?;
            entries.push((key, self.expression()?));

            if !self.eat(&TokenKind::Comma) {
                self.expect(TokenKind::RBrace, "'}'")?;
                break;
            }
        }
        Ok(Expression::Object(entries))
    }

    fn function_call(&mut self, name: String) -> Result<Expression> {
        let function =
            BuiltinFunction::from_name(&name).ok_or(ParseError::UnknownFunction(name))?;

        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if self.eat(&TokenKind::RParen) {
                    break;
                }
                self.expect(TokenKind::Comma, "',' or ')' in argument list")?;
            }
        }

        if !function.accepts(args.len()) {
            return Err(ParseError::InvalidArity {
                function: function.name().to_string(),
                actual: args.len(),
            });
        }
        Ok(Expression::function_call(function, args))
    }

    // Unary mode

    fn unary_item(&mut self) -> Result<Expression> {
        if self.peek().is_comparison() {
            return self.subject_or();
        }

        let membership = match (self.peek(), self.peek_at(1)) {
            (TokenKind::In, _) => Some((Operator::In, 1)),
            (TokenKind::Not, TokenKind::In) => Some((Operator::NotIn, 2)),
            _ => None,
        };
        if let Some((op, width)) = membership {
            self.pos += width;
            let haystack = self.additive()?;
            return Ok(Expression::binary(Expression::Subject, op, haystack));
        }

        let expr = self.expression()?;
        if expr.references_subject() {
            Ok(expr)
        } else if expr.is_collection_literal() {
            Ok(Expression::binary(Expression::Subject, Operator::In, expr))
        } else {
            Ok(Expression::binary(Expression::Subject, Operator::Eq, expr))
        }
    }

    /// `> 1 or < 0`: `or` continues only when a comparison follows
    fn subject_or(&mut self) -> Result<Expression> {
        let mut left = self.subject_and()?;
        while matches!(self.peek(), TokenKind::Or | TokenKind::OrOr)
            && self.peek_at(1).is_comparison()
        {
            self.advance();
            self.count_operator()?;
            let right = self.subject_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        Ok(left)
    }

    fn subject_and(&mut self) -> Result<Expression> {
        let mut left = self.subject_comparison()?;
        while matches!(self.peek(), TokenKind::And | TokenKind::AndAnd)
            && self.peek_at(1).is_comparison()
        {
            self.advance();
            self.count_operator()?;
            let right = self.subject_comparison()?;
            left = Expression::binary(left, Operator::And, right);
        }
        Ok(left)
    }

    fn subject_comparison(&mut self) -> Result<Expression> {
        let op = match self.advance() {
            TokenKind::EqEq => Operator::Eq,
            TokenKind::NotEq => Operator::Ne,
            TokenKind::Lt => Operator::Lt,
            TokenKind::Le => Operator::Le,
            TokenKind::Gt => Operator::Gt,
            TokenKind::Ge => Operator::Ge,
            _ => {
                self.pos -= 1;
                return Err(self.unexpected("a comparison operator"));
            }
        };
        let operand = self.additive()?;
        Ok(Expression::binary(Expression::Subject, op, operand))
    }
}
