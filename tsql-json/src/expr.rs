use serde_json::Value;
use std::rc::Rc;

use tsql_ast::{
    BooleanExpression, ExpressionWithSortOrder, FunctionCall, GraphMatchCompositeExpression,
    GraphMatchEdgeExpression, GraphMatchExpression, GraphMatchNodeExpression, JsonKeyValue,
    OverClause, ScalarExpression, SearchedCaseWhen, SimpleCaseWhen, WindowDelimiter, WindowFrame,
};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::ident::{marshal_identifier, marshal_multi_part_identifier};
use crate::node::*;
use crate::query::marshal_query_expression;

fn literal(type_name: &str, literal_type: &str) -> Value {
    let mut map = node(type_name);
    insert_string(&mut map, "LiteralType", literal_type);
    finish(map)
}

fn literal_with_value(type_name: &str, literal_type: &str, value: &str) -> Value {
    let mut map = node(type_name);
    insert_string(&mut map, "LiteralType", literal_type);
    insert_string(&mut map, "Value", value.to_string());
    finish(map)
}

pub(crate) fn marshal_scalar_expression(ctx: &mut MarshalContext, expr: &ScalarExpression) -> Value {
    match expr {
        ScalarExpression::IntegerLiteral { value } => {
            literal_with_value("IntegerLiteral", "Integer", value)
        }
        ScalarExpression::RealLiteral { value } => literal_with_value("RealLiteral", "Real", value),
        ScalarExpression::MoneyLiteral { value } => {
            literal_with_value("MoneyLiteral", "Money", value)
        }
        ScalarExpression::NumericLiteral { value } => {
            literal_with_value("NumericLiteral", "Numeric", value)
        }
        ScalarExpression::StringLiteral { value, is_national } => {
            let mut map = node("StringLiteral");
            insert_string(&mut map, "LiteralType", "String");
            insert_bool(&mut map, "IsNational", *is_national);
            insert_string(&mut map, "Value", value.clone());
            finish(map)
        }
        ScalarExpression::BinaryLiteral { value } => {
            literal_with_value("BinaryLiteral", "Binary", value)
        }
        ScalarExpression::NullLiteral => literal("NullLiteral", "Null"),
        ScalarExpression::DefaultLiteral => literal("DefaultLiteral", "Default"),
        ScalarExpression::MaxLiteral => literal("MaxLiteral", "Max"),
        ScalarExpression::OdbcLiteral { value } => literal_with_value("OdbcLiteral", "Odbc", value),
        ScalarExpression::IdentifierLiteral { value } => {
            literal_with_value("IdentifierLiteral", "Identifier", value)
        }

        ScalarExpression::VariableReference { name } => {
            let mut map = node("VariableReference");
            insert_string(&mut map, "Name", name.clone());
            finish(map)
        }
        ScalarExpression::GlobalVariableExpression { name } => {
            let mut map = node("GlobalVariableExpression");
            insert_string(&mut map, "Name", name.clone());
            finish(map)
        }

        ScalarExpression::ColumnReferenceExpression {
            column_type,
            multi_part_identifier,
        } => {
            let mut map = node("ColumnReferenceExpression");
            insert_string(&mut map, "ColumnType", column_type_str(*column_type));
            map.insert(
                "MultiPartIdentifier".to_string(),
                marshal_multi_part_identifier(ctx, multi_part_identifier),
            );
            finish(map)
        }

        ScalarExpression::BinaryExpression { op, left, right } => {
            let mut map = node("BinaryExpression");
            insert_string(&mut map, "BinaryExpressionType", binary_operator_str(*op));
            map.insert(
                "FirstExpression".to_string(),
                marshal_scalar_expression(ctx, left),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_scalar_expression(ctx, right),
            );
            finish(map)
        }
        ScalarExpression::UnaryExpression { op, expression } => {
            let mut map = node("UnaryExpression");
            insert_string(&mut map, "UnaryExpressionType", unary_operator_str(*op));
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            finish(map)
        }
        ScalarExpression::ParenthesisExpression { expression } => {
            let mut map = node("ParenthesisExpression");
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            finish(map)
        }
        ScalarExpression::ScalarSubquery { query_expression } => {
            let mut map = node("ScalarSubquery");
            map.insert(
                "QueryExpression".to_string(),
                marshal_query_expression(ctx, query_expression),
            );
            finish(map)
        }

        ScalarExpression::SearchedCaseExpression {
            when_clauses,
            else_expression,
        } => {
            let mut map = node("SearchedCaseExpression");
            insert_array(
                &mut map,
                "WhenClauses",
                when_clauses
                    .iter()
                    .map(|w| marshal_searched_case_when(ctx, w))
                    .collect(),
            );
            insert_if_some(
                &mut map,
                "ElseExpression",
                else_expression
                    .as_ref()
                    .map(|e| marshal_scalar_expression(ctx, e)),
            );
            finish(map)
        }
        ScalarExpression::SimpleCaseExpression {
            input_expression,
            when_clauses,
            else_expression,
        } => {
            let mut map = node("SimpleCaseExpression");
            map.insert(
                "InputExpression".to_string(),
                marshal_scalar_expression(ctx, input_expression),
            );
            insert_array(
                &mut map,
                "WhenClauses",
                when_clauses
                    .iter()
                    .map(|w| marshal_simple_case_when(ctx, w))
                    .collect(),
            );
            insert_if_some(
                &mut map,
                "ElseExpression",
                else_expression
                    .as_ref()
                    .map(|e| marshal_scalar_expression(ctx, e)),
            );
            finish(map)
        }

        ScalarExpression::FunctionCall(call) => marshal_function_call(ctx, call),
        ScalarExpression::CastCall {
            try_cast,
            parameter,
            data_type,
        } => {
            let mut map = node(if *try_cast { "TryCastCall" } else { "CastCall" });
            map.insert(
                "Parameter".to_string(),
                marshal_scalar_expression(ctx, parameter),
            );
            insert_string(&mut map, "DataType", data_type.clone());
            finish(map)
        }
        ScalarExpression::ConvertCall {
            try_convert,
            data_type,
            parameter,
            style,
        } => {
            let mut map = node(if *try_convert {
                "TryConvertCall"
            } else {
                "ConvertCall"
            });
            insert_string(&mut map, "DataType", data_type.clone());
            map.insert(
                "Parameter".to_string(),
                marshal_scalar_expression(ctx, parameter),
            );
            insert_if_some(
                &mut map,
                "Style",
                style.as_ref().map(|s| marshal_scalar_expression(ctx, s)),
            );
            finish(map)
        }
        ScalarExpression::ParseCall {
            try_parse,
            parameter,
            data_type,
            culture,
        } => {
            let mut map = node(if *try_parse { "TryParseCall" } else { "ParseCall" });
            map.insert(
                "Parameter".to_string(),
                marshal_scalar_expression(ctx, parameter),
            );
            insert_string(&mut map, "DataType", data_type.clone());
            insert_if_some(
                &mut map,
                "Culture",
                culture.as_ref().map(|c| marshal_scalar_expression(ctx, c)),
            );
            finish(map)
        }
        ScalarExpression::IifCall {
            search_condition,
            then_expression,
            else_expression,
        } => {
            let mut map = node("IIfCall");
            map.insert(
                "SearchCondition".to_string(),
                marshal_boolean_expression(ctx, search_condition),
            );
            map.insert(
                "ThenExpression".to_string(),
                marshal_scalar_expression(ctx, then_expression),
            );
            map.insert(
                "ElseExpression".to_string(),
                marshal_scalar_expression(ctx, else_expression),
            );
            finish(map)
        }
        ScalarExpression::LeftFunctionCall { parameters } => {
            let mut map = node("LeftFunctionCall");
            insert_array(
                &mut map,
                "Parameters",
                parameters
                    .iter()
                    .map(|p| marshal_scalar_expression(ctx, p))
                    .collect(),
            );
            finish(map)
        }
        ScalarExpression::RightFunctionCall { parameters } => {
            let mut map = node("RightFunctionCall");
            insert_array(
                &mut map,
                "Parameters",
                parameters
                    .iter()
                    .map(|p| marshal_scalar_expression(ctx, p))
                    .collect(),
            );
            finish(map)
        }
        ScalarExpression::AtTimeZoneCall {
            date_value,
            time_zone,
        } => {
            let mut map = node("AtTimeZoneCall");
            map.insert(
                "DateValue".to_string(),
                marshal_scalar_expression(ctx, date_value),
            );
            map.insert(
                "TimeZone".to_string(),
                marshal_scalar_expression(ctx, time_zone),
            );
            finish(map)
        }
        ScalarExpression::NextValueForExpression {
            sequence_name,
            over_clause,
        } => {
            let mut map = node("NextValueForExpression");
            map.insert(
                "SequenceName".to_string(),
                marshal_multi_part_identifier(ctx, sequence_name),
            );
            insert_if_some(
                &mut map,
                "OverClause",
                over_clause.as_ref().map(|o| marshal_over_clause(ctx, o)),
            );
            finish(map)
        }
        ScalarExpression::PartitionFunctionCall {
            function_name,
            parameters,
        } => {
            let mut map = node("PartitionFunctionCall");
            map.insert(
                "FunctionName".to_string(),
                marshal_identifier(ctx, function_name),
            );
            insert_array(
                &mut map,
                "Parameters",
                parameters
                    .iter()
                    .map(|p| marshal_scalar_expression(ctx, p))
                    .collect(),
            );
            finish(map)
        }
        ScalarExpression::IdentityFunctionCall => finish(node("IdentityFunctionCall")),
    }
}

fn marshal_searched_case_when(ctx: &mut MarshalContext, when: &SearchedCaseWhen) -> Value {
    let mut map = node("SearchedCaseWhenClause");
    map.insert(
        "WhenExpression".to_string(),
        marshal_boolean_expression(ctx, &when.when_expression),
    );
    map.insert(
        "ThenExpression".to_string(),
        marshal_scalar_expression(ctx, &when.then_expression),
    );
    finish(map)
}

fn marshal_simple_case_when(ctx: &mut MarshalContext, when: &SimpleCaseWhen) -> Value {
    let mut map = node("SimpleCaseWhenClause");
    map.insert(
        "WhenExpression".to_string(),
        marshal_scalar_expression(ctx, &when.when_expression),
    );
    map.insert(
        "ThenExpression".to_string(),
        marshal_scalar_expression(ctx, &when.then_expression),
    );
    finish(map)
}

pub(crate) fn marshal_function_call(ctx: &mut MarshalContext, call: &FunctionCall) -> Value {
    let mut map = node("FunctionCall");
    insert_if_some(
        &mut map,
        "CallTarget",
        call.call_target
            .as_ref()
            .map(|t| marshal_multi_part_identifier(ctx, t)),
    );
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
    insert_string(
        &mut map,
        "UniqueRowFilter",
        unique_row_filter_str(call.unique_row_filter),
    );
    insert_if_some(
        &mut map,
        "Collation",
        call.collation.as_ref().map(|c| marshal_identifier(ctx, c)),
    );
    insert_if_some(
        &mut map,
        "OverClause",
        call.over_clause.as_ref().map(|o| marshal_over_clause(ctx, o)),
    );
    insert_if_some(
        &mut map,
        "WithinGroupClause",
        call.within_group_clause.as_ref().map(|sorts| {
            Value::Array(
                sorts
                    .iter()
                    .map(|s| marshal_expression_with_sort_order(ctx, s))
                    .collect(),
            )
        }),
    );
    insert_if_some(
        &mut map,
        "FilterClause",
        call.filter_clause
            .as_ref()
            .map(|f| marshal_boolean_expression(ctx, f)),
    );
    insert_if_some(
        &mut map,
        "NullsHandling",
        call.nulls_handling
            .map(|n| Value::String(nulls_handling_str(n).to_string())),
    );
    insert_array_if_nonempty(
        &mut map,
        "JsonPairs",
        call.json_pairs
            .iter()
            .map(|p| marshal_json_key_value(ctx, p))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "AbsentOrNullOnNull",
        call.absent_or_null_on_null
            .map(|m| Value::String(on_null_mode_str(m).to_string())),
    );
    insert_bool(&mut map, "WithArrayWrapper", call.with_array_wrapper);
    finish(map)
}

fn marshal_json_key_value(ctx: &mut MarshalContext, pair: &JsonKeyValue) -> Value {
    let mut map = node("JsonKeyValue");
    map.insert(
        "Key".to_string(),
        marshal_scalar_expression(ctx, &pair.key),
    );
    map.insert(
        "Value".to_string(),
        marshal_scalar_expression(ctx, &pair.value),
    );
    finish(map)
}

pub(crate) fn marshal_over_clause(ctx: &mut MarshalContext, over: &OverClause) -> Value {
    let mut map = node("OverClause");
    insert_array_if_nonempty(
        &mut map,
        "Partitions",
        over.partition_by
            .iter()
            .map(|p| marshal_scalar_expression(ctx, p))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "OrderByColumns",
        over.order_by
            .iter()
            .map(|o| marshal_expression_with_sort_order(ctx, o))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "WindowFrameClause",
        over.window_frame.as_ref().map(|w| marshal_window_frame(ctx, w)),
    );
    finish(map)
}

pub(crate) fn marshal_expression_with_sort_order(
    ctx: &mut MarshalContext,
    e: &ExpressionWithSortOrder,
) -> Value {
    let mut map = node("ExpressionWithSortOrder");
    map.insert(
        "Expression".to_string(),
        marshal_scalar_expression(ctx, &e.expression),
    );
    insert_string(&mut map, "SortOrder", sort_order_str(e.sort_order));
    finish(map)
}

fn marshal_window_frame(ctx: &mut MarshalContext, frame: &WindowFrame) -> Value {
    let mut map = node("WindowFrameClause");
    insert_string(&mut map, "WindowFrameType", window_frame_type_str(frame.frame_type));
    map.insert("Top".to_string(), marshal_window_delimiter(ctx, &frame.top));
    insert_if_some(
        &mut map,
        "Bottom",
        frame
            .bottom
            .as_ref()
            .map(|b| marshal_window_delimiter(ctx, b)),
    );
    finish(map)
}

fn marshal_window_delimiter(ctx: &mut MarshalContext, delimiter: &WindowDelimiter) -> Value {
    match delimiter {
        WindowDelimiter::UnboundedPreceding => finish(node("WindowDelimiterUnboundedPreceding")),
        WindowDelimiter::UnboundedFollowing => finish(node("WindowDelimiterUnboundedFollowing")),
        WindowDelimiter::CurrentRow => finish(node("WindowDelimiterCurrentRow")),
        WindowDelimiter::ValuePreceding(expr) => {
            let mut map = node("WindowDelimiterValuePreceding");
            map.insert(
                "OffsetValue".to_string(),
                marshal_scalar_expression(ctx, expr),
            );
            finish(map)
        }
        WindowDelimiter::ValueFollowing(expr) => {
            let mut map = node("WindowDelimiterValueFollowing");
            map.insert(
                "OffsetValue".to_string(),
                marshal_scalar_expression(ctx, expr),
            );
            finish(map)
        }
    }
}

pub(crate) fn marshal_boolean_expression(ctx: &mut MarshalContext, expr: &BooleanExpression) -> Value {
    match expr {
        BooleanExpression::BooleanComparisonExpression {
            op,
            first_expression,
            second_expression,
        } => {
            let mut map = node("BooleanComparisonExpression");
            insert_string(&mut map, "ComparisonType", boolean_comparison_type_str(*op));
            map.insert(
                "FirstExpression".to_string(),
                marshal_scalar_expression(ctx, first_expression),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_scalar_expression(ctx, second_expression),
            );
            finish(map)
        }
        BooleanExpression::BooleanBinaryExpression { op, first, second } => {
            let mut map = node("BooleanBinaryExpression");
            insert_string(&mut map, "BinaryExpressionType", boolean_binary_operator_str(*op));
            map.insert(
                "FirstExpression".to_string(),
                marshal_boolean_expression(ctx, first),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_boolean_expression(ctx, second),
            );
            finish(map)
        }
        BooleanExpression::BooleanParenthesisExpression { expression } => {
            let mut map = node("BooleanParenthesisExpression");
            map.insert(
                "Expression".to_string(),
                marshal_boolean_expression(ctx, expression),
            );
            finish(map)
        }
        BooleanExpression::BooleanNotExpression { expression } => {
            let mut map = node("BooleanNotExpression");
            map.insert(
                "Expression".to_string(),
                marshal_boolean_expression(ctx, expression),
            );
            finish(map)
        }
        BooleanExpression::BooleanIsNullExpression { expression, is_not } => {
            let mut map = node("BooleanIsNullExpression");
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            insert_bool(&mut map, "IsNot", *is_not);
            finish(map)
        }
        BooleanExpression::LikePredicate {
            first_expression,
            second_expression,
            not_defined,
            escape_expression,
        } => {
            let mut map = node("LikePredicate");
            map.insert(
                "FirstExpression".to_string(),
                marshal_scalar_expression(ctx, first_expression),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_scalar_expression(ctx, second_expression),
            );
            insert_bool(&mut map, "NotDefined", *not_defined);
            insert_if_some(
                &mut map,
                "OdbcEscape",
                escape_expression
                    .as_ref()
                    .map(|e| marshal_scalar_expression(ctx, e)),
            );
            finish(map)
        }
        BooleanExpression::InPredicate {
            expression,
            not_defined,
            subquery,
            values,
        } => {
            let mut map = node("InPredicate");
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            insert_bool(&mut map, "NotDefined", *not_defined);
            insert_if_some(
                &mut map,
                "Subquery",
                subquery
                    .as_ref()
                    .map(|q| marshal_query_expression(ctx, q)),
            );
            insert_array(
                &mut map,
                "Values",
                values
                    .iter()
                    .map(|v| marshal_scalar_expression(ctx, v))
                    .collect(),
            );
            finish(map)
        }
        BooleanExpression::SubqueryComparisonPredicate {
            op,
            comparison_type,
            expression,
            subquery,
        } => {
            let mut map = node("SubqueryComparisonPredicate");
            insert_string(&mut map, "ComparisonType", boolean_comparison_type_str(*op));
            insert_string(
                &mut map,
                "SubqueryComparisonPredicateType",
                subquery_comparison_predicate_type_str(*comparison_type),
            );
            map.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            map.insert(
                "Subquery".to_string(),
                marshal_query_expression(ctx, subquery),
            );
            finish(map)
        }
        BooleanExpression::ExistsPredicate { subquery } => {
            let mut map = node("ExistsPredicate");
            map.insert(
                "Subquery".to_string(),
                marshal_query_expression(ctx, subquery),
            );
            finish(map)
        }
        BooleanExpression::BooleanDistinctFromExpression {
            first_expression,
            second_expression,
            not_distinct,
        } => {
            let mut map = node("BooleanDistinctFromExpression");
            map.insert(
                "FirstExpression".to_string(),
                marshal_scalar_expression(ctx, first_expression),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_scalar_expression(ctx, second_expression),
            );
            insert_bool(&mut map, "NotDistinct", *not_distinct);
            finish(map)
        }
        BooleanExpression::BooleanTernaryExpression {
            op,
            first_expression,
            second_expression,
            third_expression,
        } => {
            let mut map = node("BooleanTernaryExpression");
            insert_string(
                &mut map,
                "TernaryExpressionType",
                boolean_ternary_operator_str(*op),
            );
            map.insert(
                "FirstExpression".to_string(),
                marshal_scalar_expression(ctx, first_expression),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_scalar_expression(ctx, second_expression),
            );
            map.insert(
                "ThirdExpression".to_string(),
                marshal_scalar_expression(ctx, third_expression),
            );
            finish(map)
        }
        BooleanExpression::GraphMatchPredicate { expression } => {
            marshal_graph_match_as_boolean(ctx, expression)
        }
        BooleanExpression::FullTextPredicate {
            columns,
            value,
            language_term,
            predicate_type,
        } => {
            let mut map = node("FullTextPredicate");
            insert_array(
                &mut map,
                "Columns",
                columns
                    .iter()
                    .map(|c| marshal_multi_part_identifier(ctx, c))
                    .collect(),
            );
            map.insert(
                "Value".to_string(),
                marshal_scalar_expression(ctx, value),
            );
            insert_if_some(
                &mut map,
                "LanguageTerm",
                language_term
                    .as_ref()
                    .map(|t| marshal_scalar_expression(ctx, t)),
            );
            insert_string(
                &mut map,
                "FullTextFunctionType",
                full_text_predicate_type_str(*predicate_type),
            );
            finish(map)
        }
    }
}

/// Marshals a (possibly chained) graph `MATCH` expression into the boolean
/// expression tree position it occupies: a single composite triple marshals
/// as `GraphMatchPredicate`, while a chain marshals as the
/// `BooleanBinaryExpression{And}` wrapping two predicates that the reference
/// shape uses for chained patterns (spec §4.4, §9).
fn marshal_graph_match_as_boolean(ctx: &mut MarshalContext, expr: &GraphMatchExpression) -> Value {
    match expr {
        GraphMatchExpression::Composite(composite) => {
            let mut map = node("GraphMatchPredicate");
            map.insert(
                "Expression".to_string(),
                marshal_graph_match_composite(ctx, composite),
            );
            finish(map)
        }
        GraphMatchExpression::Chain { first, second } => {
            let mut map = node("BooleanBinaryExpression");
            insert_string(&mut map, "BinaryExpressionType", "And");
            map.insert(
                "FirstExpression".to_string(),
                marshal_graph_match_as_boolean(ctx, first),
            );
            map.insert(
                "SecondExpression".to_string(),
                marshal_graph_match_as_boolean(ctx, second),
            );
            finish(map)
        }
    }
}

fn marshal_graph_match_composite(
    ctx: &mut MarshalContext,
    composite: &GraphMatchCompositeExpression,
) -> Value {
    let mut map = node("GraphMatchCompositeExpression");
    map.insert(
        "LeftNode".to_string(),
        marshal_graph_match_node(ctx, &composite.left_node),
    );
    map.insert(
        "Edge".to_string(),
        marshal_graph_match_edge(ctx, &composite.edge),
    );
    map.insert(
        "RightNode".to_string(),
        marshal_graph_match_node(ctx, &composite.right_node),
    );
    insert_bool(&mut map, "ArrowOnRight", composite.arrow_on_right);
    finish(map)
}

fn marshal_graph_match_node(
    ctx: &mut MarshalContext,
    node_rc: &Rc<GraphMatchNodeExpression>,
) -> Value {
    if !ctx.mark_graph_node(node_rc) {
        return node_ref("GraphMatchNodeExpression");
    }
    let mut map = node("GraphMatchNodeExpression");
    map.insert(
        "MultiPartIdentifier".to_string(),
        marshal_multi_part_identifier(ctx, &node_rc.multi_part_identifier),
    );
    finish(map)
}

fn marshal_graph_match_edge(ctx: &mut MarshalContext, edge: &GraphMatchEdgeExpression) -> Value {
    let mut map = node("GraphMatchEdgeExpression");
    map.insert(
        "MultiPartIdentifier".to_string(),
        marshal_multi_part_identifier(ctx, &edge.multi_part_identifier),
    );
    insert_bool(&mut map, "IsParenthesized", edge.is_parenthesized);
    finish(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal_matches_reference_shape() {
        let mut ctx = MarshalContext::new();
        let expr = ScalarExpression::IntegerLiteral {
            value: "1".to_string(),
        };
        let value = marshal_scalar_expression(&mut ctx, &expr);
        assert_eq!(value["$type"], "IntegerLiteral");
        assert_eq!(value["LiteralType"], "Integer");
        assert_eq!(value["Value"], "1");
    }

    #[test]
    fn chained_graph_match_shares_middle_node_by_ref() {
        let mut ctx = MarshalContext::new();
        let mk_node = |name: &str| {
            Rc::new(GraphMatchNodeExpression {
                multi_part_identifier: tsql_ast::MultiPartIdentifier::new(vec![
                    tsql_ast::Identifier::plain(name),
                ]),
            })
        };
        let a = mk_node("a");
        let b = mk_node("b");
        let c = mk_node("c");
        let edge = |name: &str| GraphMatchEdgeExpression {
            multi_part_identifier: tsql_ast::MultiPartIdentifier::new(vec![
                tsql_ast::Identifier::plain(name),
            ]),
            is_parenthesized: true,
        };
        let first = GraphMatchExpression::Composite(GraphMatchCompositeExpression {
            left_node: a,
            edge: edge("e1"),
            right_node: b.clone(),
            arrow_on_right: true,
        });
        let second = GraphMatchExpression::Composite(GraphMatchCompositeExpression {
            left_node: b,
            edge: edge("e2"),
            right_node: c,
            arrow_on_right: true,
        });
        let chain = GraphMatchExpression::Chain {
            first: Box::new(first),
            second: Box::new(second),
        };
        let value = marshal_graph_match_as_boolean(&mut ctx, &chain);
        assert_eq!(value["$type"], "BooleanBinaryExpression");
        let first_json = &value["FirstExpression"]["Expression"];
        let second_json = &value["SecondExpression"]["Expression"];
        assert_eq!(first_json["RightNode"]["$type"], "GraphMatchNodeExpression");
        assert_eq!(second_json["LeftNode"]["$ref"], "GraphMatchNodeExpression");
    }
}
