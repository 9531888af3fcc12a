use serde_json::Value;

use tsql_ast::{
    CommonTableExpression, GroupByClause, OffsetFetchClause, QueryExpression, QueryExpressionKind,
    QuerySpecification, SelectElement, TopRowFilter,
};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::expr::{
    marshal_boolean_expression, marshal_expression_with_sort_order, marshal_scalar_expression,
};
use crate::ident::{marshal_identifier, marshal_multi_part_identifier};
use crate::node::*;
use crate::table::marshal_table_reference;

pub(crate) fn marshal_query_expression(ctx: &mut MarshalContext, query: &QueryExpression) -> Value {
    let mut map = match &query.query {
        QueryExpressionKind::QuerySpecification(spec) => marshal_query_specification(ctx, spec),
        QueryExpressionKind::BinaryQueryExpression {
            op,
            all,
            first,
            second,
        } => {
            let mut map = node("BinaryQueryExpression");
            insert_string(
                &mut map,
                "BinaryQueryExpressionType",
                binary_query_expression_type_str(*op),
            );
            insert_bool(&mut map, "All", *all);
            map.insert(
                "FirstQueryExpression".to_string(),
                marshal_query_expression(ctx, first),
            );
            map.insert(
                "SecondQueryExpression".to_string(),
                marshal_query_expression(ctx, second),
            );
            map
        }
    };
    insert_array_if_nonempty(
        &mut map,
        "WithCtesAndXmlNamespaces",
        query
            .with_ctes
            .iter()
            .map(|c| marshal_common_table_expression(ctx, c))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "OrderByClause",
        query
            .order_by
            .iter()
            .map(|o| marshal_expression_with_sort_order(ctx, o))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "TopRowFilter",
        query.top.as_ref().map(|t| marshal_top_row_filter(ctx, t)),
    );
    insert_if_some(
        &mut map,
        "OffsetClause",
        query
            .offset_fetch
            .as_ref()
            .map(|o| marshal_offset_fetch_clause(ctx, o)),
    );
    finish(map)
}

fn marshal_common_table_expression(ctx: &mut MarshalContext, cte: &CommonTableExpression) -> Value {
    let mut map = node("CommonTableExpression");
    map.insert(
        "ExpressionName".to_string(),
        marshal_identifier(ctx, &cte.expression_name),
    );
    insert_array_if_nonempty(
        &mut map,
        "Columns",
        cte.columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
    );
    map.insert(
        "QueryExpression".to_string(),
        marshal_query_expression(ctx, &cte.query_expression),
    );
    finish(map)
}

pub(crate) fn marshal_top_row_filter(ctx: &mut MarshalContext, top: &TopRowFilter) -> Value {
    let mut map = node("TopRowFilter");
    map.insert(
        "Expression".to_string(),
        marshal_scalar_expression(ctx, &top.expression),
    );
    insert_bool(&mut map, "Percent", top.percent);
    insert_bool(&mut map, "WithTies", top.with_ties);
    finish(map)
}

fn marshal_offset_fetch_clause(ctx: &mut MarshalContext, clause: &OffsetFetchClause) -> Value {
    let mut map = node("OffsetFetchClause");
    map.insert(
        "OffsetExpression".to_string(),
        marshal_scalar_expression(ctx, &clause.offset_expression),
    );
    insert_if_some(
        &mut map,
        "FetchExpression",
        clause
            .fetch_expression
            .as_ref()
            .map(|e| marshal_scalar_expression(ctx, e)),
    );
    finish(map)
}

fn marshal_query_specification(
    ctx: &mut MarshalContext,
    spec: &QuerySpecification,
) -> serde_json::Map<String, Value> {
    let mut map = node("QuerySpecification");
    insert_string(
        &mut map,
        "UniqueRowFilter",
        unique_row_filter_str(spec.unique_row_filter),
    );
    insert_if_some(
        &mut map,
        "TopRowFilter",
        spec.top.as_ref().map(|t| marshal_top_row_filter(ctx, t)),
    );
    insert_array(
        &mut map,
        "SelectElements",
        spec.select_elements
            .iter()
            .map(|e| marshal_select_element(ctx, e))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "FromClause",
        spec.from_clause
            .iter()
            .map(|t| marshal_table_reference(ctx, t))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "WhereClause",
        spec.where_clause
            .as_ref()
            .map(|w| marshal_boolean_expression(ctx, w)),
    );
    insert_if_some(
        &mut map,
        "GroupByClause",
        spec.group_by_clause
            .as_ref()
            .map(|g| marshal_group_by_clause(ctx, g)),
    );
    insert_if_some(
        &mut map,
        "HavingClause",
        spec.having_clause
            .as_ref()
            .map(|h| marshal_boolean_expression(ctx, h)),
    );
    insert_if_some(
        &mut map,
        "ForClause",
        spec.for_clause.map(|f| finish(node(for_clause_type_name(f)))),
    );
    map
}

fn for_clause_type_name(clause: tsql_ast::ForClause) -> &'static str {
    match clause {
        tsql_ast::ForClause::Xml => "XmlForClause",
        tsql_ast::ForClause::Json => "JsonForClause",
        tsql_ast::ForClause::Browse => "BrowseForClause",
    }
}

fn marshal_select_element(ctx: &mut MarshalContext, element: &SelectElement) -> Value {
    match element {
        SelectElement::SelectScalarExpression {
            expression,
            column_name,
        } => {
            let mut map = node("SelectScalarExpression");
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            insert_if_some(
                &mut map,
                "ColumnName",
                column_name.as_ref().map(|c| marshal_identifier(ctx, c)),
            );
            finish(map)
        }
        SelectElement::SelectStarExpression { qualifier } => {
            let mut map = node("SelectStarExpression");
            insert_if_some(
                &mut map,
                "Qualifier",
                qualifier
                    .as_ref()
                    .map(|q| marshal_multi_part_identifier(ctx, q)),
            );
            finish(map)
        }
        SelectElement::SelectSetVariable {
            variable_name,
            expression,
        } => {
            let mut map = node("SelectSetVariable");
            insert_string(&mut map, "VariableName", variable_name.clone());
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            finish(map)
        }
    }
}

fn marshal_group_by_clause(ctx: &mut MarshalContext, clause: &GroupByClause) -> Value {
    let mut map = node("GroupByClause");
    insert_array(
        &mut map,
        "GroupingSpecifications",
        clause
            .grouping_specifications
            .iter()
            .map(|e| marshal_scalar_expression(ctx, e))
            .collect(),
    );
    insert_bool(&mut map, "All", clause.all);
    finish(map)
}
