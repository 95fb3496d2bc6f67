//! Built-in functions callable from expressions

use serde::{Deserialize, Serialize};

/// Built-in function identifiers
///
/// The set is closed: an unknown function name is rejected when the
/// expression is parsed, never at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinFunction {
    // String functions
    Len,
    Upper,
    Lower,
    Trim,
    StartsWith,
    EndsWith,
    Contains,
    Join,
    Split,

    // Numeric functions
    Abs,
    Floor,
    Ceil,
    Round,
    Min,
    Max,
    Sum,
    Avg,

    // Conversions
    Number,
    String,
    Bool,
    IsNull,

    // Collections
    Keys,
    Values,
    Flatten,

    // Closure functions (second argument is evaluated per element with `#`)
    Filter,
    Map,
    Some,
    All,
    None,
    Count,
}

impl BuiltinFunction {
    /// Resolve a function by its source name
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "len" => BuiltinFunction::Len,
            "upper" => BuiltinFunction::Upper,
            "lower" => BuiltinFunction::Lower,
            "trim" => BuiltinFunction::Trim,
            "startsWith" => BuiltinFunction::StartsWith,
            "endsWith" => BuiltinFunction::EndsWith,
            "contains" => BuiltinFunction::Contains,
            "join" => BuiltinFunction::Join,
            "split" => BuiltinFunction::Split,
            "abs" => BuiltinFunction::Abs,
            "floor" => BuiltinFunction::Floor,
            "ceil" => BuiltinFunction::Ceil,
            "round" => BuiltinFunction::Round,
            "min" => BuiltinFunction::Min,
            "max" => BuiltinFunction::Max,
            "sum" => BuiltinFunction::Sum,
            "avg" => BuiltinFunction::Avg,
            "number" => BuiltinFunction::Number,
            "string" => BuiltinFunction::String,
            "bool" => BuiltinFunction::Bool,
            "isNull" => BuiltinFunction::IsNull,
            "keys" => BuiltinFunction::Keys,
            "values" => BuiltinFunction::Values,
            "flatten" => BuiltinFunction::Flatten,
            "filter" => BuiltinFunction::Filter,
            "map" => BuiltinFunction::Map,
            "some" => BuiltinFunction::Some,
            "all" => BuiltinFunction::All,
            "none" => BuiltinFunction::None,
            "count" => BuiltinFunction::Count,
            _ => return None,
        };
        Some(function)
    }

    /// Source name of the function
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunction::Len => "len",
            BuiltinFunction::Upper => "upper",
            BuiltinFunction::Lower => "lower",
            BuiltinFunction::Trim => "trim",
            BuiltinFunction::StartsWith => "startsWith",
            BuiltinFunction::EndsWith => "endsWith",
            BuiltinFunction::Contains => "contains",
            BuiltinFunction::Join => "join",
            BuiltinFunction::Split => "split",
            BuiltinFunction::Abs => "abs",
            BuiltinFunction::Floor => "floor",
            BuiltinFunction::Ceil => "ceil",
            BuiltinFunction::Round => "round",
            BuiltinFunction::Min => "min",
            BuiltinFunction::Max => "max",
            BuiltinFunction::Sum => "sum",
            BuiltinFunction::Avg => "avg",
            BuiltinFunction::Number => "number",
            BuiltinFunction::String => "string",
            BuiltinFunction::Bool => "bool",
            BuiltinFunction::IsNull => "isNull",
            BuiltinFunction::Keys => "keys",
            BuiltinFunction::Values => "values",
            BuiltinFunction::Flatten => "flatten",
            BuiltinFunction::Filter => "filter",
            BuiltinFunction::Map => "map",
            BuiltinFunction::Some => "some",
            BuiltinFunction::All => "all",
            BuiltinFunction::None => "none",
            BuiltinFunction::Count => "count",
        }
    }

    /// Accepted argument count as (min, max); `None` means unbounded
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            BuiltinFunction::StartsWith
            | BuiltinFunction::EndsWith
            | BuiltinFunction::Contains
            | BuiltinFunction::Join
            | BuiltinFunction::Split => (2, Some(2)),
            BuiltinFunction::Round => (1, Some(2)),
            BuiltinFunction::Min | BuiltinFunction::Max => (1, None),
            f if f.is_closure() => (2, Some(2)),
            _ => (1, Some(1)),
        }
    }

    /// Whether the second argument is a per-element closure
    pub fn is_closure(&self) -> bool {
        matches!(
            self,
            BuiltinFunction::Filter
                | BuiltinFunction::Map
                | BuiltinFunction::Some
                | BuiltinFunction::All
                | BuiltinFunction::None
                | BuiltinFunction::Count
        )
    }

    /// Check an argument count against this function's arity
    pub fn accepts(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        count >= min && max.map_or(true, |max| count <= max)
    }
}
