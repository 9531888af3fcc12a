use crate::expr::{BooleanExpression, ExpressionWithSortOrder, ScalarExpression};
use crate::ident::Identifier;
use crate::table::TableReference;
use std::rc::Rc;

/// A query expression: either a primitive `SELECT` or a binary combination
/// (`UNION`/`INTERSECT`/`EXCEPT`) of two, optionally preceded by a `WITH`
/// clause of common table expressions (spec §3, §4.4).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryExpression {
    pub with_ctes: Vec<CommonTableExpression>,
    pub query: QueryExpressionKind,
    pub order_by: Vec<ExpressionWithSortOrder>,
    pub top: Option<TopRowFilter>,
    pub offset_fetch: Option<OffsetFetchClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryExpressionKind {
    QuerySpecification(Box<QuerySpecification>),
    BinaryQueryExpression {
        op: BinaryQueryExpressionType,
        all: bool,
        first: Box<QueryExpression>,
        second: Box<QueryExpression>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryQueryExpressionType {
    Union,
    Intersect,
    Except,
}

/// `WITH cte_name (columns) AS (query)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonTableExpression {
    pub expression_name: Rc<Identifier>,
    pub columns: Vec<Rc<Identifier>>,
    pub query_expression: Box<QueryExpression>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopRowFilter {
    pub expression: ScalarExpression,
    pub percent: bool,
    pub with_ties: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetFetchClause {
    pub offset_expression: ScalarExpression,
    pub fetch_expression: Option<ScalarExpression>,
}

/// A single `SELECT ... FROM ... WHERE ...` block (spec §3).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuerySpecification {
    pub unique_row_filter: crate::expr::UniqueRowFilter,
    pub top: Option<TopRowFilter>,
    pub select_elements: Vec<SelectElement>,
    pub from_clause: Vec<TableReference>,
    pub where_clause: Option<BooleanExpression>,
    pub group_by_clause: Option<GroupByClause>,
    pub having_clause: Option<BooleanExpression>,
    pub for_clause: Option<ForClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectElement {
    SelectScalarExpression {
        expression: ScalarExpression,
        column_name: Option<Rc<Identifier>>,
    },
    SelectStarExpression {
        qualifier: Option<crate::ident::MultiPartIdentifier>,
    },
    /// `SET @x = expr` / `SELECT @x = expr` style set-variable select element.
    SelectSetVariable {
        variable_name: String,
        expression: ScalarExpression,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupByClause {
    pub grouping_specifications: Vec<ScalarExpression>,
    pub all: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForClause {
    Xml,
    Json,
    Browse,
}
