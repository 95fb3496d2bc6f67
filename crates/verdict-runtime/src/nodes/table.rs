//! Decision table matcher
//!
//! Rows are tested top to bottom. Each input column's field is evaluated
//! once against the node input and bound as `$` for that column's cells.
//! Default rows are only considered when no regular row matched.

use super::{pass_through, NodeOutput};
use crate::context::Scope;
use crate::error::{Result, RuntimeError};
use crate::expression::{evaluate, evaluate_unary};
use std::collections::BTreeMap;
use verdict_core::document::HitPolicy;
use verdict_core::ir::{CompiledRow, CompiledTable};
use verdict_core::Value;

/// Evaluate a decision table against its node input
pub(crate) fn evaluate_table(table: &CompiledTable, input: &Value) -> Result<NodeOutput> {
    let scope = Scope::new(input);
    let subjects = column_subjects(table, &scope)?;

    let mut matched = matching_rows(table, &scope, &subjects, false)?;
    if matched.is_empty() {
        matched = matching_rows(table, &scope, &subjects, true)?;
    }

    let mut output = Value::empty_object();
    for row in &matched {
        output.merge(row_output(table, row, &scope)?);
    }

    tracing::trace!("Decision table matched {} row(s)", matched.len());

    let trace_data = matched_trace(&matched);
    Ok(NodeOutput::new(pass_through(input, output, table.pass_through)).with_trace_data(trace_data))
}

/// Subject value per input column; `None` for columns without a field
fn column_subjects(table: &CompiledTable, scope: &Scope<'_>) -> Result<Vec<Option<Value>>> {
    table
        .inputs
        .iter()
        .map(|column| match &column.field {
            Some(field) => match evaluate(field, scope) {
                Ok(value) => Ok(Some(value)),
                // Missing input data is tested as null
                Err(RuntimeError::UndefinedReference(_)) => Ok(Some(Value::Null)),
                Err(e) => Err(e),
            },
            None => Ok(None),
        })
        .collect()
}

fn matching_rows<'t>(
    table: &'t CompiledTable,
    scope: &Scope<'_>,
    subjects: &[Option<Value>],
    defaults: bool,
) -> Result<Vec<&'t CompiledRow>> {
    let mut matched = Vec::new();

    for row in table.rows.iter().filter(|row| row.is_default == defaults) {
        if row_matches(row, scope, subjects)? {
            matched.push(row);
            if table.hit_policy == HitPolicy::First {
                break;
            }
        }
    }

    Ok(matched)
}

fn row_matches(row: &CompiledRow, scope: &Scope<'_>, subjects: &[Option<Value>]) -> Result<bool> {
    for (condition, subject) in row.conditions.iter().zip(subjects) {
        let Some(condition) = condition else {
            continue;
        };
        let passed = match subject {
            Some(subject) => evaluate_unary(condition, &scope.with_subject(subject))?,
            None => evaluate_unary(condition, scope)?,
        };
        if !passed {
            return Ok(false);
        }
    }
    Ok(true)
}

fn row_output(table: &CompiledTable, row: &CompiledRow, scope: &Scope<'_>) -> Result<Value> {
    let mut output = Value::empty_object();
    for (column, cell) in table.outputs.iter().zip(&row.outputs) {
        if let Some(expr) = cell {
            output.set_path(column.path.as_slice(), evaluate(expr, scope)?);
        }
    }
    Ok(output)
}

fn matched_trace(rows: &[&CompiledRow]) -> Value {
    let matched = rows
        .iter()
        .map(|row| {
            let mut entry = BTreeMap::new();
            entry.insert("index".to_string(), Value::Number(row.index as f64));
            entry.insert(
                "id".to_string(),
                row.id.clone().map(Value::String).unwrap_or(Value::Null),
            );
            Value::Object(entry)
        })
        .collect();

    let mut trace = BTreeMap::new();
    trace.insert("matched".to_string(), Value::Array(matched));
    Value::Object(trace)
}
