//! Template AST
//!
//! A template is text with embedded `{{ expression }}` spans.

use super::expression::Expression;
use serde::{Deserialize, Serialize};

/// Parsed template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

/// A literal text run or an embedded expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    Text(String),
    Expression(Expression),
}

impl Template {
    /// Create a template from segments
    pub fn new(segments: Vec<TemplateSegment>) -> Self {
        Self { segments }
    }

    /// The sole expression when the template is exactly one span.
    ///
    /// Whitespace-only text around the span is ignored, so `" {{ a }} "`
    /// still counts as a single span and renders to a typed value.
    pub fn single_expression(&self) -> Option<&Expression> {
        let mut found = None;
        for segment in &self.segments {
            match segment {
                TemplateSegment::Text(text) if text.trim().is_empty() => {}
                TemplateSegment::Text(_) => return None,
                TemplateSegment::Expression(expr) => {
                    if found.is_some() {
                        return None;
                    }
                    found = Some(expr);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_single_expression() {
        let expr = Expression::literal(Value::Number(1.0));
        let single = Template::new(vec![
            TemplateSegment::Text(" ".to_string()),
            TemplateSegment::Expression(expr.clone()),
        ]);
        assert_eq!(single.single_expression(), Some(&expr));

        let mixed = Template::new(vec![
            TemplateSegment::Text("Hello: ".to_string()),
            TemplateSegment::Expression(expr.clone()),
        ]);
        assert_eq!(mixed.single_expression(), None);

        let double = Template::new(vec![
            TemplateSegment::Expression(expr.clone()),
            TemplateSegment::Expression(expr),
        ]);
        assert_eq!(double.single_expression(), None);

        assert_eq!(Template::default().single_expression(), None);
    }
}
