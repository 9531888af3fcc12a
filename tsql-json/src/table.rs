use serde_json::Value;

use tsql_ast::{FunctionCallForPivot, OpenJsonColumnDefinition, TableReference};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::expr::{marshal_boolean_expression, marshal_scalar_expression};
use crate::ident::{marshal_identifier, marshal_schema_object_name};
use crate::node::*;
use crate::query::marshal_query_expression;

pub(crate) fn marshal_table_reference(ctx: &mut MarshalContext, table: &TableReference) -> Value {
    match table {
        TableReference::NamedTableReference {
            schema_object,
            alias,
            table_hints,
        } => {
            let mut map = node("NamedTableReference");
            map.insert(
                "SchemaObject".to_string(),
                marshal_schema_object_name(ctx, schema_object),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            insert_array_if_nonempty(
                &mut map,
                "TableHints",
                table_hints
                    .iter()
                    .map(|h| Value::String(h.clone()))
                    .collect(),
            );
            finish(map)
        }
        TableReference::QualifiedJoin {
            first_table_reference,
            second_table_reference,
            join_type,
            join_hint,
            search_condition,
        } => {
            let mut map = node("QualifiedJoin");
            insert_string(&mut map, "QualifiedJoinType", join_type_str(*join_type));
            insert_string(&mut map, "JoinHint", join_hint_str(*join_hint));
            map.insert(
                "FirstTableReference".to_string(),
                marshal_table_reference(ctx, first_table_reference),
            );
            map.insert(
                "SecondTableReference".to_string(),
                marshal_table_reference(ctx, second_table_reference),
            );
            insert_if_some(
                &mut map,
                "SearchCondition",
                search_condition
                    .as_ref()
                    .map(|s| marshal_boolean_expression(ctx, s)),
            );
            finish(map)
        }
        TableReference::UnqualifiedJoin {
            first_table_reference,
            second_table_reference,
            unqualified_join_type,
        } => {
            let mut map = node("UnqualifiedJoin");
            insert_string(
                &mut map,
                "UnqualifiedJoinType",
                unqualified_join_type_str(*unqualified_join_type),
            );
            map.insert(
                "FirstTableReference".to_string(),
                marshal_table_reference(ctx, first_table_reference),
            );
            map.insert(
                "SecondTableReference".to_string(),
                marshal_table_reference(ctx, second_table_reference),
            );
            finish(map)
        }
        TableReference::QueryDerivedTable {
            query_expression,
            alias,
            columns,
        } => {
            let mut map = node("QueryDerivedTable");
            map.insert(
                "QueryExpression".to_string(),
                marshal_query_expression(ctx, query_expression),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            insert_array_if_nonempty(
                &mut map,
                "Columns",
                columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            finish(map)
        }
        TableReference::InlineDerivedTable {
            row_values,
            alias,
            columns,
        } => {
            let mut map = node("InlineDerivedTable");
            insert_array(
                &mut map,
                "RowValues",
                row_values
                    .iter()
                    .map(|row| {
                        let mut row_map = node("RowValue");
                        insert_array(
                            &mut row_map,
                            "ColumnValues",
                            row.iter()
                                .map(|e| marshal_scalar_expression(ctx, e))
                                .collect(),
                        );
                        finish(row_map)
                    })
                    .collect(),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            insert_array_if_nonempty(
                &mut map,
                "Columns",
                columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            finish(map)
        }
        TableReference::SchemaObjectFunctionTableReference {
            schema_object,
            parameters,
            alias,
        } => {
            let mut map = node("SchemaObjectFunctionTableReference");
            map.insert(
                "SchemaObject".to_string(),
                marshal_schema_object_name(ctx, schema_object),
            );
            insert_array(
                &mut map,
                "Parameters",
                parameters
                    .iter()
                    .map(|p| marshal_scalar_expression(ctx, p))
                    .collect(),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            finish(map)
        }
        TableReference::OpenJsonTableReference {
            variable,
            path,
            schema_declaration,
            alias,
        } => {
            let mut map = node("OpenJsonTableReference");
            map.insert(
                "Variable".to_string(),
                marshal_scalar_expression(ctx, variable),
            );
            insert_if_some(
                &mut map,
                "Path",
                path.as_ref().map(|p| marshal_scalar_expression(ctx, p)),
            );
            insert_array_if_nonempty(
                &mut map,
                "SchemaDeclaration",
                schema_declaration
                    .iter()
                    .map(|c| marshal_open_json_column_definition(ctx, c))
                    .collect(),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            finish(map)
        }
        TableReference::PivotedTableReference {
            table_reference,
            pivot_function,
            for_column,
            in_columns,
            alias,
        } => {
            let mut map = node("PivotedTableReference");
            map.insert(
                "TableReference".to_string(),
                marshal_table_reference(ctx, table_reference),
            );
            map.insert(
                "PivotFunction".to_string(),
                marshal_function_call_for_pivot(ctx, pivot_function),
            );
            map.insert(
                "ForColumn".to_string(),
                marshal_identifier(ctx, for_column),
            );
            insert_array(
                &mut map,
                "InColumns",
                in_columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            finish(map)
        }
        TableReference::UnpivotedTableReference {
            table_reference,
            value_column,
            for_column,
            in_columns,
            alias,
        } => {
            let mut map = node("UnpivotedTableReference");
            map.insert(
                "TableReference".to_string(),
                marshal_table_reference(ctx, table_reference),
            );
            map.insert(
                "ValueColumn".to_string(),
                marshal_identifier(ctx, value_column),
            );
            map.insert(
                "ForColumn".to_string(),
                marshal_identifier(ctx, for_column),
            );
            insert_array(
                &mut map,
                "InColumns",
                in_columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            insert_if_some(
                &mut map,
                "Alias",
                alias.as_ref().map(|a| marshal_identifier(ctx, a)),
            );
            finish(map)
        }
    }
}

fn marshal_open_json_column_definition(
    ctx: &mut MarshalContext,
    column: &OpenJsonColumnDefinition,
) -> Value {
    let mut map = node("OpenJsonColumnDefinition");
    map.insert(
        "ColumnName".to_string(),
        marshal_identifier(ctx, &column.column_name),
    );
    insert_string(&mut map, "DataType", column.data_type.clone());
    insert_if_some(
        &mut map,
        "Path",
        column.path.clone().map(Value::String),
    );
    finish(map)
}

fn marshal_function_call_for_pivot(ctx: &mut MarshalContext, call: &FunctionCallForPivot) -> Value {
    let mut map = node("FunctionCallForPivot");
    map.insert(
        "FunctionName".to_string(),
        marshal_identifier(ctx, &call.function_name),
    );
    insert_array(
        &mut map,
        "Parameters",
        call.parameters
            .iter()
            .map(|p| marshal_scalar_expression(ctx, p))
            .collect(),
    );
    finish(map)
}
