//! Decision table compiler
//!
//! Input cells are compiled in unary mode against the column field, or as
//! plain boolean expressions when the column has no field. Output cells are
//! standard expressions.

use super::expression_codegen::ExpressionCompiler;
use crate::error::{CompileError, Result};
use verdict_core::document::{DecisionTableContent, TableColumn, TableRule};
use verdict_core::ir::{CompiledRow, CompiledTable, TableInput, TableOutput};

/// Decision table compiler
pub struct TableCompiler<'a> {
    expressions: &'a ExpressionCompiler,
}

impl<'a> TableCompiler<'a> {
    pub fn new(expressions: &'a ExpressionCompiler) -> Self {
        Self { expressions }
    }

    /// Compile a decision table
    pub fn compile(&self, node_id: &str, content: &DecisionTableContent) -> Result<CompiledTable> {
        let inputs = content
            .inputs
            .iter()
            .map(|column| self.input_column(node_id, column))
            .collect::<Result<Vec<_>>>()?;

        let outputs = content
            .outputs
            .iter()
            .map(|column| Self::output_column(node_id, column))
            .collect::<Result<Vec<_>>>()?;

        let rows = content
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| self.row(node_id, index, rule, content, &inputs))
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledTable {
            hit_policy: content.hit_policy,
            inputs,
            outputs,
            rows,
            pass_through: content.pass_through,
        })
    }

    fn input_column(&self, node_id: &str, column: &TableColumn) -> Result<TableInput> {
        let field = match column.field.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => Some(self.expressions.compile(
                node_id,
                &format!("input column '{}'", column.id),
                field,
            )?),
            _ => None,
        };

        Ok(TableInput {
            id: column.id.clone(),
            name: column.name.clone(),
            field,
        })
    }

    fn output_column(node_id: &str, column: &TableColumn) -> Result<TableOutput> {
        let field = column.field.as_deref().map(str::trim).unwrap_or_default();
        if field.is_empty() {
            return Err(CompileError::InvalidContent {
                node_id: node_id.to_string(),
                message: format!("output column '{}' has no field", column.id),
            });
        }

        Ok(TableOutput {
            id: column.id.clone(),
            name: column.name.clone(),
            path: split_path(field),
        })
    }

    fn row(
        &self,
        node_id: &str,
        index: usize,
        rule: &TableRule,
        content: &DecisionTableContent,
        inputs: &[TableInput],
    ) -> Result<CompiledRow> {
        let row_label = rule.id.clone().unwrap_or_else(|| index.to_string());

        let conditions = content
            .inputs
            .iter()
            .zip(inputs)
            .map(|(column, input)| {
                let Some(cell) = rule.cell(&column.id) else {
                    return Ok(None);
                };
                let location = format!("rule '{}', column '{}'", row_label, column.id);
                let expr = if input.field.is_some() {
                    self.expressions.compile_unary(node_id, &location, &cell)?
                } else {
                    self.expressions.compile(node_id, &location, &cell)?
                };
                Ok(Some(expr))
            })
            .collect::<Result<Vec<_>>>()?;

        let outputs = content
            .outputs
            .iter()
            .map(|column| {
                rule.cell(&column.id)
                    .map(|cell| {
                        let location = format!("rule '{}', column '{}'", row_label, column.id);
                        self.expressions.compile(node_id, &location, &cell)
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledRow {
            index,
            id: rule.id.clone(),
            is_default: rule.is_default,
            conditions,
            outputs,
        })
    }
}

/// Split a dot path into segments
pub(crate) fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(|segment| segment.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::ast::{Expression, Operator};
    use verdict_core::Value;

    fn table(json: &str) -> DecisionTableContent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_compile_table() {
        let content = table(
            r#"{
                "inputs": [
                    { "id": "c1", "field": "input" },
                    { "id": "c2" }
                ],
                "outputs": [{ "id": "o1", "field": "result.code" }],
                "rules": [
                    { "_id": "r1", "c1": "< 10", "c2": "flag == true", "o1": "'low'" },
                    { "_id": "r2", "c1": "", "o1": "'any'", "_default": true }
                ]
            }"#,
        );
        let expressions = ExpressionCompiler::new(true);
        let compiled = TableCompiler::new(&expressions).compile("t", &content).unwrap();

        assert_eq!(compiled.outputs[0].path, vec!["result", "code"]);
        assert!(compiled.inputs[1].field.is_none());

        let first = &compiled.rows[0];
        assert_eq!(
            first.conditions[0],
            Some(Expression::binary(
                Expression::Subject,
                Operator::Lt,
                Expression::literal(Value::Number(10.0))
            ))
        );
        assert!(matches!(
            first.conditions[1],
            Some(Expression::Binary { op: Operator::Eq, .. })
        ));
        assert_eq!(
            first.outputs[0],
            Some(Expression::literal(Value::String("low".to_string())))
        );

        let second = &compiled.rows[1];
        assert!(second.is_default);
        assert_eq!(second.conditions, vec![None, None]);
    }

    #[test]
    fn test_output_column_requires_field() {
        let content = table(r#"{ "outputs": [{ "id": "o1" }], "rules": [] }"#);
        let expressions = ExpressionCompiler::new(true);
        assert!(matches!(
            TableCompiler::new(&expressions).compile("t", &content),
            Err(CompileError::InvalidContent { .. })
        ));
    }

    #[test]
    fn test_invalid_cell_reports_location() {
        let content = table(
            r#"{
                "inputs": [{ "id": "c1", "field": "input" }],
                "outputs": [],
                "rules": [{ "_id": "r7", "c1": "> > 1" }]
            }"#,
        );
        let expressions = ExpressionCompiler::new(true);
        match TableCompiler::new(&expressions).compile("t", &content) {
            Err(CompileError::InvalidExpression { location, .. }) => {
                assert_eq!(location, "rule 'r7', column 'c1'");
            }
            other => panic!("Expected InvalidExpression, got {:?}", other),
        }
    }
}
