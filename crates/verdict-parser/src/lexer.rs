//! Expression tokenizer
//!
//! Converts expression text into a flat token list. Keywords (`and`, `or`,
//! `not`, `in`, `true`, `false`, `null`) are recognised here so the parser
//! can match on them directly.

use crate::error::{ParseError, Result};

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    String(String),
    Identifier(String),

    // Keywords
    True,
    False,
    Null,
    And,
    Or,
    Not,
    In,

    // Special bindings
    Dollar,
    Hash,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    DotDot,
    Question,
    QuestionQuestion,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,

    Eof,
}

impl TokenKind {
    /// Whether the token is one of the comparison operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
        )
    }
}

/// Token with its byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Expression lexer
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Tokenize a whole expression; the last token is always `Eof`
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }

        let Some((position, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position: self.source.len(),
            });
        };

        let kind = match c {
            '0'..='9' => self.number(position)?,
            '\'' | '"' => self.string(position, c)?,
            c if c.is_alphabetic() || c == '_' => self.identifier(position, c),
            '$' => TokenKind::Dollar,
            '#' => TokenKind::Hash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '.' => {
                if self.eat('.') {
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            '?' => {
                if self.eat('?') {
                    TokenKind::QuestionQuestion
                } else {
                    TokenKind::Question
                }
            }
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    return Err(ParseError::syntax(position, "expected '=='"));
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else {
                    return Err(ParseError::syntax(position, "expected '&&'"));
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else {
                    return Err(ParseError::syntax(position, "expected '||'"));
                }
            }
            other => {
                return Err(ParseError::syntax(
                    position,
                    format!("unexpected character '{}'", other),
                ))
            }
        };

        Ok(Token { kind, position })
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some((_, c)) if *c == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn number(&mut self, start: usize) -> Result<TokenKind> {
        let mut end = start + 1;
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_ascii_digit() || c == '_' {
                self.chars.next();
                end = i + 1;
            } else if c == '.' && self.peek_second().is_some_and(|n| n.is_ascii_digit()) {
                // `1..5` is a range, `1.5` is a fraction
                self.chars.next();
                end = i + 1;
            } else {
                break;
            }
        }

        // Exponent: `1e3`, `2.5E-4`
        if let Some((i, 'e' | 'E')) = self.chars.peek().copied() {
            let rest = &self.source[i + 1..];
            let sign = usize::from(rest.starts_with(['+', '-']));
            let digits = rest[sign..].bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 {
                end = i + 1 + sign + digits;
                while self.chars.peek().is_some_and(|(j, _)| *j < end) {
                    self.chars.next();
                }
            }
        }

        let text: String = self.source[start..end].chars().filter(|c| *c != '_').collect();
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(TokenKind::Number(n)),
            Ok(_) => Err(ParseError::syntax(start, format!("number '{}' is out of range", text))),
            Err(_) => Err(ParseError::syntax(start, format!("invalid number '{}'", text))),
        }
    }

    fn string(&mut self, start: usize, quote: char) -> Result<TokenKind> {
        let mut value = String::new();
        while let Some((i, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(TokenKind::String(value)),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, escaped)) => value.push(escaped),
                    None => return Err(ParseError::syntax(i, "unterminated escape sequence")),
                },
                c => value.push(c),
            }
        }
        Err(ParseError::syntax(start, "unterminated string literal"))
    }

    fn identifier(&mut self, start: usize, first: char) -> TokenKind {
        let mut end = start + first.len_utf8();
        while let Some((i, c)) = self.chars.peek().copied() {
            if c.is_alphanumeric() || c == '_' {
                self.chars.next();
                end = i + c.len_utf8();
            } else {
                break;
            }
        }

        match &self.source[start..end] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "in" => TokenKind::In,
            name => TokenKind::Identifier(name.to_string()),
        }
    }
}
