//! Field Lookup Utilities
//!
//! Helper functions for navigating nested values using identifier paths
//! (expressions) and dot-notation paths (custom node config).

use crate::error::{Result, RuntimeError};
use verdict_core::Value;

/// Resolve an identifier path against the root value.
///
/// The first segment must name a member of the root; an unknown top-level
/// identifier is an error. Past that, any segment that cannot be followed
/// yields `Null`.
pub fn lookup_field(root: &Value, path: &[String]) -> Result<Value> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(Value::Null);
    };

    let mut current = root
        .get(first)
        .ok_or_else(|| RuntimeError::UndefinedReference(first.clone()))?;

    for segment in rest {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => {
                tracing::trace!("Field '{}' not found under '{}', returning Null", segment, first);
                return Ok(Value::Null);
            }
        }
    }

    Ok(current.clone())
}

/// Follow a dot path (`a.b.0.c`) through raw JSON config.
///
/// Numeric segments index arrays. Returns `None` when any segment is missing.
pub fn resolve_config_path<'a>(
    config: &'a serde_json::Value,
    path: &str,
) -> Option<&'a serde_json::Value> {
    if path.is_empty() {
        return Some(config);
    }

    path.split('.').try_fold(config, |current, segment| match current {
        serde_json::Value::Object(map) => map.get(segment),
        serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
