use std::rc::Rc;

use crate::expr::{BooleanExpression, ScalarExpression};
use crate::ident::{Identifier, SchemaObjectName};
use crate::query::QueryExpression;

/// A FROM-clause table source (spec §3). This models a representative
/// slice of the ~30 reference variants rather than the full catalog (spec
/// §12): named tables, joins, derived queries, row-constructor tables,
/// table-valued function calls, `OPENJSON`, and pivot/unpivot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableReference {
    NamedTableReference {
        schema_object: SchemaObjectName,
        alias: Option<Rc<Identifier>>,
        table_hints: Vec<String>,
    },
    QualifiedJoin {
        first_table_reference: Box<TableReference>,
        second_table_reference: Box<TableReference>,
        join_type: JoinType,
        join_hint: JoinHint,
        search_condition: Option<BooleanExpression>,
    },
    UnqualifiedJoin {
        first_table_reference: Box<TableReference>,
        second_table_reference: Box<TableReference>,
        unqualified_join_type: UnqualifiedJoinType,
    },
    QueryDerivedTable {
        query_expression: Box<QueryExpression>,
        alias: Option<Rc<Identifier>>,
        columns: Vec<Rc<Identifier>>,
    },
    InlineDerivedTable {
        row_values: Vec<Vec<ScalarExpression>>,
        alias: Option<Rc<Identifier>>,
        columns: Vec<Rc<Identifier>>,
    },
    SchemaObjectFunctionTableReference {
        schema_object: SchemaObjectName,
        parameters: Vec<ScalarExpression>,
        alias: Option<Rc<Identifier>>,
    },
    OpenJsonTableReference {
        variable: ScalarExpression,
        path: Option<ScalarExpression>,
        schema_declaration: Vec<OpenJsonColumnDefinition>,
        alias: Option<Rc<Identifier>>,
    },
    PivotedTableReference {
        table_reference: Box<TableReference>,
        pivot_function: FunctionCallForPivot,
        for_column: Rc<Identifier>,
        in_columns: Vec<Rc<Identifier>>,
        alias: Option<Rc<Identifier>>,
    },
    UnpivotedTableReference {
        table_reference: Box<TableReference>,
        value_column: Rc<Identifier>,
        for_column: Rc<Identifier>,
        in_columns: Vec<Rc<Identifier>>,
        alias: Option<Rc<Identifier>>,
    },
}

impl TableReference {
    /// Takes this reference's own alias, leaving `None` behind (spec §4.4's
    /// `MERGE` target alias hoist: the target is parsed as an ordinary table
    /// reference, then its alias is lifted out into
    /// `MergeSpecification.table_alias` rather than left on the target
    /// itself). Joins have no alias slot of their own and yield `None`.
    pub fn take_alias(&mut self) -> Option<Rc<Identifier>> {
        match self {
            TableReference::NamedTableReference { alias, .. }
            | TableReference::QueryDerivedTable { alias, .. }
            | TableReference::InlineDerivedTable { alias, .. }
            | TableReference::SchemaObjectFunctionTableReference { alias, .. }
            | TableReference::OpenJsonTableReference { alias, .. }
            | TableReference::PivotedTableReference { alias, .. }
            | TableReference::UnpivotedTableReference { alias, .. } => alias.take(),
            TableReference::QualifiedJoin { .. } | TableReference::UnqualifiedJoin { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenJsonColumnDefinition {
    pub column_name: Rc<Identifier>,
    pub data_type: String,
    pub path: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCallForPivot {
    pub function_name: Rc<Identifier>,
    pub parameters: Vec<ScalarExpression>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnqualifiedJoinType {
    CrossJoin,
    CrossApply,
    OuterApply,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinHint {
    None,
    Loop,
    Hash,
    Merge,
    Remote,
}
