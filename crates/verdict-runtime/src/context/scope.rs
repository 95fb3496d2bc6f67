//! Expression scope
//!
//! The bindings an expression can see: the root value its identifiers
//! resolve against, the unary subject `$` and the closure element `#`.

use crate::error::{Result, RuntimeError};
use verdict_core::Value;

/// Key under which a caller may supply the subject in the root value
pub const SUBJECT_KEY: &str = "$";

/// Bindings visible to an expression
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    root: &'a Value,
    subject: Option<&'a Value>,
    element: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    /// Scope over a root value with no subject or element bound
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            subject: None,
            element: None,
        }
    }

    /// Bind the unary subject
    pub fn with_subject(self, subject: &'a Value) -> Self {
        Self {
            subject: Some(subject),
            ..self
        }
    }

    /// Bind the closure element, narrowing the scope lifetime to it
    pub fn with_element<'b>(&self, element: &'b Value) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            root: self.root,
            subject: self.subject,
            element: Some(element),
        }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// The subject: explicit binding first, then a `$` member of the root
    pub fn subject(&self) -> Result<&'a Value> {
        self.subject
            .or_else(|| self.root.get(SUBJECT_KEY))
            .ok_or_else(|| RuntimeError::UndefinedReference(SUBJECT_KEY.to_string()))
    }

    pub fn element(&self) -> Result<&'a Value> {
        self.element
            .ok_or_else(|| RuntimeError::UndefinedReference("#".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_resolution() {
        let root: Value = serde_json::json!({ "$": 5, "a": 1 }).into();
        let scope = Scope::new(&root);
        assert_eq!(scope.subject().unwrap(), &Value::Number(5.0));

        let bound = Value::Number(9.0);
        assert_eq!(scope.with_subject(&bound).subject().unwrap(), &bound);

        let empty = Value::empty_object();
        assert!(matches!(
            Scope::new(&empty).subject(),
            Err(RuntimeError::UndefinedReference(name)) if name == "$"
        ));
    }

    #[test]
    fn test_element_binding() {
        let root = Value::empty_object();
        let scope = Scope::new(&root);
        assert!(scope.element().is_err());

        let element = Value::Bool(true);
        assert_eq!(scope.with_element(&element).element().unwrap(), &element);
    }
}
