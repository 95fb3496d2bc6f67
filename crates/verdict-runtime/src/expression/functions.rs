//! Built-in functions
//!
//! Closure functions (`filter`, `map`, `some`, `all`, `none`, `count`)
//! receive their second argument unevaluated and run it once per element
//! with `#` bound. Every other function gets evaluated argument values.

use super::evaluator::eval;
use super::operators::{finite, values_equal};
use crate::context::Scope;
use crate::error::{Result, RuntimeError};
use verdict_core::ast::{BuiltinFunction, Expression};
use verdict_core::types::value::format_number;
use verdict_core::Value;

/// Call a built-in function
pub(crate) fn call_function(
    function: &BuiltinFunction,
    args: &[Expression],
    scope: &Scope<'_>,
) -> Result<Value> {
    if !function.accepts(args.len()) {
        return Err(invalid(
            function,
            format!("unexpected argument count {}", args.len()),
        ));
    }

    if function.is_closure() {
        return call_closure(function, &args[0], &args[1], scope);
    }

    let values = args
        .iter()
        .map(|arg| eval(arg, scope))
        .collect::<Result<Vec<_>>>()?;

    call_with_values(function, &values)
}

fn call_with_values(function: &BuiltinFunction, args: &[Value]) -> Result<Value> {
    use BuiltinFunction as F;

    let value = match function {
        F::Len => match &args[0] {
            Value::String(s) => Value::Number(s.chars().count() as f64),
            Value::Array(items) => Value::Number(items.len() as f64),
            Value::Object(map) => Value::Number(map.len() as f64),
            other => return Err(unexpected(function, "string, array or object", other)),
        },
        F::Upper => Value::String(string_arg(function, &args[0])?.to_uppercase()),
        F::Lower => Value::String(string_arg(function, &args[0])?.to_lowercase()),
        F::Trim => Value::String(string_arg(function, &args[0])?.trim().to_string()),
        F::StartsWith => Value::Bool(
            string_arg(function, &args[0])?.starts_with(string_arg(function, &args[1])?),
        ),
        F::EndsWith => Value::Bool(
            string_arg(function, &args[0])?.ends_with(string_arg(function, &args[1])?),
        ),
        F::Contains => match &args[0] {
            Value::String(s) => Value::Bool(s.contains(string_arg(function, &args[1])?)),
            Value::Array(items) => {
                Value::Bool(items.iter().any(|item| values_equal(item, &args[1])))
            }
            other => return Err(unexpected(function, "string or array", other)),
        },
        F::Join => {
            let items = array_arg(function, &args[0])?;
            let separator = string_arg(function, &args[1])?;
            Value::String(
                items
                    .iter()
                    .map(Value::to_template_string)
                    .collect::<Vec<_>>()
                    .join(separator),
            )
        }
        F::Split => {
            let text = string_arg(function, &args[0])?;
            let separator = string_arg(function, &args[1])?;
            Value::Array(
                text.split(separator)
                    .map(|part| Value::String(part.to_string()))
                    .collect(),
            )
        }

        F::Abs => Value::Number(number_arg(function, &args[0])?.abs()),
        F::Floor => Value::Number(number_arg(function, &args[0])?.floor()),
        F::Ceil => Value::Number(number_arg(function, &args[0])?.ceil()),
        F::Round => {
            let n = number_arg(function, &args[0])?;
            let digits = match args.get(1) {
                Some(d) => number_arg(function, d)?,
                None => 0.0,
            };
            let factor = 10f64.powi(digits.clamp(-308.0, 308.0) as i32);
            let scaled = n * factor;
            if scaled.is_finite() {
                Value::Number(scaled.round() / factor)
            } else {
                // More digits than an f64 holds
                Value::Number(n)
            }
        }
        F::Min | F::Max => {
            let numbers = numbers_of(function, args)?;
            let pick = |a: f64, b: f64| if *function == F::Min { a.min(b) } else { a.max(b) };
            numbers
                .into_iter()
                .reduce(pick)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }
        F::Sum => finite(numbers_of(function, args)?.iter().sum())?,
        F::Avg => {
            let numbers = numbers_of(function, args)?;
            if numbers.is_empty() {
                Value::Null
            } else {
                finite(numbers.iter().sum::<f64>() / numbers.len() as f64)?
            }
        }

        F::Number => match &args[0] {
            Value::Number(n) => Value::Number(*n),
            Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number)
                .ok_or_else(|| invalid(function, format!("'{}' is not a number", s)))?,
            other => return Err(unexpected(function, "number, bool or string", other)),
        },
        F::String => match &args[0] {
            Value::Number(n) => Value::String(format_number(*n)),
            other => Value::String(other.to_template_string()),
        },
        F::Bool => match &args[0] {
            Value::Bool(b) => Value::Bool(*b),
            Value::String(s) if s == "true" => Value::Bool(true),
            Value::String(s) if s == "false" => Value::Bool(false),
            other => return Err(unexpected(function, "bool or 'true'/'false'", other)),
        },
        F::IsNull => Value::Bool(args[0].is_null()),

        F::Keys => match &args[0] {
            Value::Object(map) => Value::Array(map.keys().cloned().map(Value::String).collect()),
            other => return Err(unexpected(function, "object", other)),
        },
        F::Values => match &args[0] {
            Value::Object(map) => Value::Array(map.values().cloned().collect()),
            other => return Err(unexpected(function, "object", other)),
        },
        F::Flatten => {
            let mut flat = Vec::new();
            for item in array_arg(function, &args[0])? {
                match item {
                    Value::Array(inner) => flat.extend(inner.iter().cloned()),
                    other => flat.push(other.clone()),
                }
            }
            Value::Array(flat)
        }

        F::Filter | F::Map | F::Some | F::All | F::None | F::Count => {
            return Err(invalid(function, "closure function called without a closure"))
        }
    };

    Ok(value)
}

fn call_closure(
    function: &BuiltinFunction,
    collection: &Expression,
    body: &Expression,
    scope: &Scope<'_>,
) -> Result<Value> {
    use BuiltinFunction as F;

    let collection = eval(collection, scope)?;
    let items: &[Value] = match &collection {
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        other => return Err(unexpected(function, "array", other)),
    };

    let test = |item: &Value| -> Result<bool> {
        match eval(body, &scope.with_element(item))? {
            Value::Bool(b) => Ok(b),
            other => Err(unexpected(function, "bool closure result", &other)),
        }
    };

    let value = match function {
        F::Map => Value::Array(
            items
                .iter()
                .map(|item| eval(body, &scope.with_element(item)))
                .collect::<Result<Vec<_>>>()?,
        ),
        F::Filter => {
            let mut kept = Vec::new();
            for item in items {
                if test(item)? {
                    kept.push(item.clone());
                }
            }
            Value::Array(kept)
        }
        F::Some => {
            let mut any = false;
            for item in items {
                if test(item)? {
                    any = true;
                    break;
                }
            }
            Value::Bool(any)
        }
        F::All => {
            let mut all = true;
            for item in items {
                if !test(item)? {
                    all = false;
                    break;
                }
            }
            Value::Bool(all)
        }
        F::None => {
            let mut none = true;
            for item in items {
                if test(item)? {
                    none = false;
                    break;
                }
            }
            Value::Bool(none)
        }
        F::Count => {
            let mut count = 0usize;
            for item in items {
                if test(item)? {
                    count += 1;
                }
            }
            Value::Number(count as f64)
        }
        other => return Err(invalid(other, "not a closure function")),
    };

    Ok(value)
}

/// Numbers from either a single array argument or the argument list
fn numbers_of(function: &BuiltinFunction, args: &[Value]) -> Result<Vec<f64>> {
    let values: &[Value] = match args {
        [Value::Array(items)] => items,
        other => other,
    };
    values.iter().map(|v| number_arg(function, v)).collect()
}

fn string_arg<'v>(function: &BuiltinFunction, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| unexpected(function, "string", value))
}

fn number_arg(function: &BuiltinFunction, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| unexpected(function, "number", value))
}

fn array_arg<'v>(function: &BuiltinFunction, value: &'v Value) -> Result<&'v [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| unexpected(function, "array", value))
}

fn unexpected(function: &BuiltinFunction, expected: &str, got: &Value) -> RuntimeError {
    invalid(function, format!("expected {}, got {}", expected, got.type_name()))
}

fn invalid(function: &BuiltinFunction, message: impl Into<String>) -> RuntimeError {
    RuntimeError::InvalidArgument {
        function: function.name().to_string(),
        message: message.into(),
    }
}
