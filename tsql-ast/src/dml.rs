use std::rc::Rc;

use crate::expr::{AssignmentOperator, BooleanExpression, ScalarExpression};
use crate::ident::{Identifier, SchemaObjectName};
use crate::query::{QueryExpression, TopRowFilter};
use crate::table::TableReference;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectStatement {
    pub query_expression: Box<QueryExpression>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertSource {
    Values(Vec<Vec<ScalarExpression>>),
    Select(Box<QueryExpression>),
    DefaultValues,
    Execute(Box<crate::misc::ExecuteStatement>),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputClause {
    pub select_columns: Vec<ScalarExpression>,
    pub into_table: Option<SchemaObjectName>,
    pub into_columns: Vec<Rc<Identifier>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertStatement {
    pub top: Option<TopRowFilter>,
    pub target: SchemaObjectName,
    pub columns: Vec<Rc<Identifier>>,
    pub source: InsertSource,
    pub output_clause: Option<OutputClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentSetClause {
    pub column: ScalarExpression,
    pub op: AssignmentOperator,
    pub source: ScalarExpression,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateStatement {
    pub top: Option<TopRowFilter>,
    pub target: SchemaObjectName,
    pub set_clauses: Vec<AssignmentSetClause>,
    pub from_clause: Vec<TableReference>,
    pub where_clause: Option<BooleanExpression>,
    pub output_clause: Option<OutputClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteStatement {
    pub top: Option<TopRowFilter>,
    pub target: SchemaObjectName,
    pub from_clause: Vec<TableReference>,
    pub where_clause: Option<BooleanExpression>,
    pub output_clause: Option<OutputClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruncateTableStatement {
    pub target: SchemaObjectName,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeActionCondition {
    Matched,
    NotMatchedByTarget,
    NotMatchedBySource,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeAction {
    Delete,
    Update {
        set_clauses: Vec<AssignmentSetClause>,
    },
    Insert {
        columns: Vec<Rc<Identifier>>,
        source: InsertSource,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeActionClause {
    pub condition: MergeActionCondition,
    pub search_condition: Option<BooleanExpression>,
    pub action: MergeAction,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeSpecification {
    pub top: Option<TopRowFilter>,
    pub target: TableReference,
    pub table_alias: Option<Rc<Identifier>>,
    pub table_source: TableReference,
    pub search_condition: BooleanExpression,
    pub action_clauses: Vec<MergeActionClause>,
    pub output_clause: Option<OutputClause>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStatement {
    pub merge_specification: MergeSpecification,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NullNotNull {
    Unspecified,
    Null,
    NotNull,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BulkInsertStatement {
    pub target: SchemaObjectName,
    pub data_file: String,
    pub options: Vec<LiteralBulkInsertOption>,
}

/// A single `WITH (...)` option of `BULK INSERT`. `option_kind` of
/// `"RowsetOptions"` triggers the canonicalization pass in `tsql-json`
/// (spec §4.5, §8, end-to-end scenario 6).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiteralBulkInsertOption {
    pub option_kind: String,
    pub value: String,
}
