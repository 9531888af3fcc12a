use serde_json::Value;

use tsql_ast::{
    AssignmentSetClause, BulkInsertStatement, DeleteStatement, InsertSource, InsertStatement,
    LiteralBulkInsertOption, MergeAction, MergeActionClause, MergeSpecification, MergeStatement,
    OutputClause, SelectStatement, TruncateTableStatement, UpdateStatement,
};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::expr::marshal_scalar_expression;
use crate::ident::{marshal_identifier, marshal_schema_object_name};
use crate::node::*;
use crate::query::marshal_query_expression;
use crate::table::marshal_table_reference;

pub(crate) fn marshal_select_statement(ctx: &mut MarshalContext, stmt: &SelectStatement) -> Value {
    let mut map = node("SelectStatement");
    map.insert(
        "QueryExpression".to_string(),
        marshal_query_expression(ctx, &stmt.query_expression),
    );
    finish(map)
}

fn marshal_insert_source(ctx: &mut MarshalContext, source: &InsertSource) -> Value {
    match source {
        InsertSource::Values(rows) => {
            let mut map = node("ValuesInsertSource");
            insert_bool(&mut map, "IsDefaultValues", false);
            insert_array(
                &mut map,
                "RowValues",
                rows.iter()
                    .map(|row| {
                        let mut m = node("RowValue");
                        insert_array(
                            &mut m,
                            "ColumnValues",
                            row.iter().map(|e| marshal_scalar_expression(ctx, e)).collect(),
                        );
                        finish(m)
                    })
                    .collect(),
            );
            finish(map)
        }
        InsertSource::Select(query) => {
            let mut map = node("SelectInsertSource");
            map.insert(
                "Select".to_string(),
                marshal_query_expression(ctx, query),
            );
            finish(map)
        }
        InsertSource::DefaultValues => finish(node("DefaultValuesInsertSource")),
        InsertSource::Execute(exec) => {
            let mut map = node("ExecuteInsertSource");
            map.insert(
                "Execute".to_string(),
                crate::misc::marshal_execute_statement(ctx, exec),
            );
            finish(map)
        }
    }
}

fn marshal_output_clause(ctx: &mut MarshalContext, clause: &OutputClause) -> Value {
    let mut map = node("OutputClause");
    insert_array(
        &mut map,
        "SelectColumns",
        clause
            .select_columns
            .iter()
            .map(|e| marshal_scalar_expression(ctx, e))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "IntoTable",
        clause
            .into_table
            .as_ref()
            .map(|t| marshal_schema_object_name(ctx, t)),
    );
    insert_array_if_nonempty(
        &mut map,
        "IntoClauseColumns",
        clause
            .into_columns
            .iter()
            .map(|c| marshal_identifier(ctx, c))
            .collect(),
    );
    finish(map)
}

pub(crate) fn marshal_assignment_set_clause(
    ctx: &mut MarshalContext,
    clause: &AssignmentSetClause,
) -> Value {
    let mut map = node("AssignmentSetClause");
    map.insert("Column".to_string(), marshal_scalar_expression(ctx, &clause.column));
    insert_string(&mut map, "AssignmentKind", assignment_operator_str(clause.op));
    map.insert(
        "NewValue".to_string(),
        marshal_scalar_expression(ctx, &clause.source),
    );
    finish(map)
}

pub(crate) fn marshal_insert_statement(ctx: &mut MarshalContext, stmt: &InsertStatement) -> Value {
    let mut map = node("InsertStatement");
    map.insert(
        "Target".to_string(),
        marshal_schema_object_name(ctx, &stmt.target),
    );
    insert_array_if_nonempty(
        &mut map,
        "Columns",
        stmt.columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
    );
    insert_if_some(
        &mut map,
        "TopRowFilter",
        stmt.top
            .as_ref()
            .map(|t| crate::query::marshal_top_row_filter(ctx, t)),
    );
    map.insert(
        "InsertSource".to_string(),
        marshal_insert_source(ctx, &stmt.source),
    );
    insert_if_some(
        &mut map,
        "OutputClause",
        stmt.output_clause
            .as_ref()
            .map(|o| marshal_output_clause(ctx, o)),
    );
    finish(map)
}

pub(crate) fn marshal_update_statement(ctx: &mut MarshalContext, stmt: &UpdateStatement) -> Value {
    let mut map = node("UpdateStatement");
    map.insert(
        "Target".to_string(),
        marshal_schema_object_name(ctx, &stmt.target),
    );
    insert_if_some(
        &mut map,
        "TopRowFilter",
        stmt.top
            .as_ref()
            .map(|t| crate::query::marshal_top_row_filter(ctx, t)),
    );
    insert_array(
        &mut map,
        "SetClauses",
        stmt.set_clauses
            .iter()
            .map(|c| marshal_assignment_set_clause(ctx, c))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "FromClause",
        stmt.from_clause
            .iter()
            .map(|t| marshal_table_reference(ctx, t))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "WhereClause",
        stmt.where_clause
            .as_ref()
            .map(|w| crate::expr::marshal_boolean_expression(ctx, w)),
    );
    insert_if_some(
        &mut map,
        "OutputClause",
        stmt.output_clause
            .as_ref()
            .map(|o| marshal_output_clause(ctx, o)),
    );
    finish(map)
}

pub(crate) fn marshal_delete_statement(ctx: &mut MarshalContext, stmt: &DeleteStatement) -> Value {
    let mut map = node("DeleteStatement");
    map.insert(
        "Target".to_string(),
        marshal_schema_object_name(ctx, &stmt.target),
    );
    insert_if_some(
        &mut map,
        "TopRowFilter",
        stmt.top
            .as_ref()
            .map(|t| crate::query::marshal_top_row_filter(ctx, t)),
    );
    insert_array_if_nonempty(
        &mut map,
        "FromClause",
        stmt.from_clause
            .iter()
            .map(|t| marshal_table_reference(ctx, t))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "WhereClause",
        stmt.where_clause
            .as_ref()
            .map(|w| crate::expr::marshal_boolean_expression(ctx, w)),
    );
    insert_if_some(
        &mut map,
        "OutputClause",
        stmt.output_clause
            .as_ref()
            .map(|o| marshal_output_clause(ctx, o)),
    );
    finish(map)
}

pub(crate) fn marshal_truncate_table_statement(
    ctx: &mut MarshalContext,
    stmt: &TruncateTableStatement,
) -> Value {
    let mut map = node("TruncateTableStatement");
    map.insert(
        "TableName".to_string(),
        marshal_schema_object_name(ctx, &stmt.target),
    );
    finish(map)
}

fn marshal_merge_action(ctx: &mut MarshalContext, action: &MergeAction) -> Value {
    match action {
        MergeAction::Delete => finish(node("DeleteMergeAction")),
        MergeAction::Update { set_clauses } => {
            let mut map = node("UpdateMergeAction");
            insert_array(
                &mut map,
                "SetClauses",
                set_clauses
                    .iter()
                    .map(|c| marshal_assignment_set_clause(ctx, c))
                    .collect(),
            );
            finish(map)
        }
        MergeAction::Insert { columns, source } => {
            let mut map = node("InsertMergeAction");
            insert_array_if_nonempty(
                &mut map,
                "Columns",
                columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            map.insert(
                "Source".to_string(),
                marshal_insert_source(ctx, source),
            );
            finish(map)
        }
    }
}

fn marshal_merge_action_clause(ctx: &mut MarshalContext, clause: &MergeActionClause) -> Value {
    let mut map = node("MergeActionClause");
    insert_string(&mut map, "Condition", merge_action_condition_str(clause.condition));
    insert_if_some(
        &mut map,
        "SearchCondition",
        clause
            .search_condition
            .as_ref()
            .map(|c| crate::expr::marshal_boolean_expression(ctx, c)),
    );
    map.insert("Action".to_string(), marshal_merge_action(ctx, &clause.action));
    finish(map)
}

fn marshal_merge_specification(ctx: &mut MarshalContext, spec: &MergeSpecification) -> Value {
    let mut map = node("MergeSpecification");
    insert_if_some(
        &mut map,
        "TopRowFilter",
        spec.top
            .as_ref()
            .map(|t| crate::query::marshal_top_row_filter(ctx, t)),
    );
    map.insert("Target".to_string(), marshal_table_reference(ctx, &spec.target));
    insert_if_some(
        &mut map,
        "TableAlias",
        spec.table_alias.as_ref().map(|a| marshal_identifier(ctx, a)),
    );
    map.insert(
        "TableReference".to_string(),
        marshal_table_reference(ctx, &spec.table_source),
    );
    map.insert(
        "SearchCondition".to_string(),
        crate::expr::marshal_boolean_expression(ctx, &spec.search_condition),
    );
    insert_array(
        &mut map,
        "ActionClauses",
        spec.action_clauses
            .iter()
            .map(|c| marshal_merge_action_clause(ctx, c))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "OutputClause",
        spec.output_clause
            .as_ref()
            .map(|o| marshal_output_clause(ctx, o)),
    );
    finish(map)
}

pub(crate) fn marshal_merge_statement(ctx: &mut MarshalContext, stmt: &MergeStatement) -> Value {
    let mut map = node("MergeStatement");
    map.insert(
        "MergeSpecification".to_string(),
        marshal_merge_specification(ctx, &stmt.merge_specification),
    );
    finish(map)
}

/// Canonicalizes a `ROWSET_OPTIONS` literal value per spec §4.5/§8 scenario
/// 6: parse the (unquoted) literal text as JSON, uppercase every object key
/// and every array string element, and re-serialize with no whitespace.
/// Leaves the value untouched (rather than panicking) if it does not parse
/// as JSON, since `LiteralBulkInsertOption.value` is otherwise free text.
fn canonicalize_rowset_options(raw: &str) -> String {
    let stripped = strip_option_value_quotes(raw);
    let parsed: serde_json::Result<Value> = serde_json::from_str(&stripped);
    match parsed {
        Ok(value) => {
            let upper = uppercase_json(value);
            serde_json::to_string(&upper).unwrap_or_else(|_| raw.to_string())
        }
        Err(_) => raw.to_string(),
    }
}

fn strip_option_value_quotes(raw: &str) -> String {
    let raw = raw.strip_prefix('N').unwrap_or(raw);
    let inner = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    inner.replace("''", "'")
}

fn uppercase_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                out.insert(k.to_uppercase(), uppercase_json(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(uppercase_json).collect()),
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    }
}

fn marshal_literal_bulk_insert_option(option: &LiteralBulkInsertOption) -> Value {
    let mut map = node("LiteralBulkInsertOption");
    insert_string(&mut map, "OptionKind", option.option_kind.clone());
    let value = if option.option_kind.eq_ignore_ascii_case("RowsetOptions") {
        canonicalize_rowset_options(&option.value)
    } else {
        option.value.clone()
    };
    insert_string(&mut map, "Value", value);
    finish(map)
}

pub(crate) fn marshal_bulk_insert_statement(
    ctx: &mut MarshalContext,
    stmt: &BulkInsertStatement,
) -> Value {
    let mut map = node("BulkInsertStatement");
    map.insert(
        "To".to_string(),
        marshal_schema_object_name(ctx, &stmt.target),
    );
    insert_string(&mut map, "DataFile", stmt.data_file.clone());
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_literal_bulk_insert_option).collect(),
    );
    finish(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rowset_options_are_canonicalized() {
        let out = canonicalize_rowset_options("'{\"key\": \"value\"}'");
        assert_eq!(out, r#"{"KEY":"VALUE"}"#);
    }

    #[test]
    fn rowset_options_canonicalize_national_string() {
        let out = canonicalize_rowset_options("N'{\"key\": [\"a\", \"b\"]}'");
        assert_eq!(out, r#"{"KEY":["A","B"]}"#);
    }
}
