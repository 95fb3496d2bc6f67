//! Template parser
//!
//! Splits text into literal runs and `{{ expression }}` spans. The closing
//! `}}` is searched outside of quoted strings, so `{{ '}}' + a }}` is a
//! single span.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use verdict_core::ast::{Template, TemplateSegment};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Template parser
pub struct TemplateParser;

impl TemplateParser {
    /// Parse a template
    pub fn parse(source: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(TemplateSegment::Text(rest[..start].to_string()));
            }

            let body_start = start + OPEN.len();
            let body_len = Self::find_close(&rest[body_start..]).ok_or(
                ParseError::UnclosedTemplate {
                    position: offset + start,
                },
            )?;

            let body = &rest[body_start..body_start + body_len];
            segments.push(TemplateSegment::Expression(ExpressionParser::parse(body)?));

            let consumed = body_start + body_len + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(TemplateSegment::Text(rest.to_string()));
        }

        Ok(Template::new(segments))
    }

    /// Whether the text contains at least one span opener
    pub fn has_spans(source: &str) -> bool {
        source.contains(OPEN)
    }

    /// Byte offset of the closing `}}`, skipping quoted strings
    fn find_close(body: &str) -> Option<usize> {
        let bytes = body.as_bytes();
        let mut quote: Option<u8> = None;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(_) if b == b'\\' => i += 1,
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'\'' || b == b'"' => quote = Some(b),
                None if bytes[i..].starts_with(CLOSE.as_bytes()) => return Some(i),
                None => {}
            }
            i += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::ast::{Expression, Operator};
    use verdict_core::Value;

    fn field(name: &str) -> Expression {
        Expression::field_access(vec![name.to_string()])
    }

    #[test]
    fn test_plain_text() {
        let template = TemplateParser::parse("no spans here").unwrap();
        assert_eq!(
            template.segments,
            vec![TemplateSegment::Text("no spans here".to_string())]
        );
        assert!(!TemplateParser::has_spans("no spans here"));
    }

    #[test]
    fn test_single_span() {
        let template = TemplateParser::parse("{{ a + 1 }}").unwrap();
        assert_eq!(
            template.single_expression(),
            Some(&Expression::binary(
                field("a"),
                Operator::Add,
                Expression::literal(Value::Number(1.0))
            ))
        );
    }

    #[test]
    fn test_mixed_text_and_spans() {
        let template = TemplateParser::parse("Hello {{ name }}, you are {{ age }}!").unwrap();
        assert_eq!(
            template.segments,
            vec![
                TemplateSegment::Text("Hello ".to_string()),
                TemplateSegment::Expression(field("name")),
                TemplateSegment::Text(", you are ".to_string()),
                TemplateSegment::Expression(field("age")),
                TemplateSegment::Text("!".to_string()),
            ]
        );
        assert!(template.single_expression().is_none());
    }

    #[test]
    fn test_close_inside_string() {
        let template = TemplateParser::parse("{{ '}}' }}").unwrap();
        assert_eq!(
            template.single_expression(),
            Some(&Expression::literal(Value::String("}}".to_string())))
        );
    }

    #[test]
    fn test_unclosed_span() {
        assert!(matches!(
            TemplateParser::parse("abc {{ a"),
            Err(ParseError::UnclosedTemplate { position: 4 })
        ));
    }

    #[test]
    fn test_invalid_span_expression() {
        assert!(TemplateParser::parse("{{ }}").is_err());
        assert!(TemplateParser::parse("{{ a + }}").is_err());
    }
}
