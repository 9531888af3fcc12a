use std::rc::Rc;

use crate::ident::{Identifier, MultiPartIdentifier};
use crate::query::QueryExpression;

/// Every scalar (value-producing) expression form this crate models
/// (spec §3, §4.3).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarExpression {
    IntegerLiteral { value: String },
    RealLiteral { value: String },
    MoneyLiteral { value: String },
    NumericLiteral { value: String },
    StringLiteral { value: String, is_national: bool },
    BinaryLiteral { value: String },
    NullLiteral,
    DefaultLiteral,
    MaxLiteral,
    OdbcLiteral { value: String },
    IdentifierLiteral { value: String },

    VariableReference { name: String },
    GlobalVariableExpression { name: String },

    ColumnReferenceExpression {
        column_type: ColumnType,
        multi_part_identifier: MultiPartIdentifier,
    },

    BinaryExpression {
        op: BinaryOperator,
        left: Box<ScalarExpression>,
        right: Box<ScalarExpression>,
    },
    UnaryExpression {
        op: UnaryOperator,
        expression: Box<ScalarExpression>,
    },
    ParenthesisExpression {
        expression: Box<ScalarExpression>,
    },
    ScalarSubquery {
        query_expression: Box<QueryExpression>,
    },

    SearchedCaseExpression {
        when_clauses: Vec<SearchedCaseWhen>,
        else_expression: Option<Box<ScalarExpression>>,
    },
    SimpleCaseExpression {
        input_expression: Box<ScalarExpression>,
        when_clauses: Vec<SimpleCaseWhen>,
        else_expression: Option<Box<ScalarExpression>>,
    },

    FunctionCall(Box<FunctionCall>),
    CastCall {
        try_cast: bool,
        parameter: Box<ScalarExpression>,
        data_type: String,
    },
    ConvertCall {
        try_convert: bool,
        data_type: String,
        parameter: Box<ScalarExpression>,
        style: Option<Box<ScalarExpression>>,
    },
    ParseCall {
        try_parse: bool,
        parameter: Box<ScalarExpression>,
        data_type: String,
        culture: Option<Box<ScalarExpression>>,
    },
    IifCall {
        search_condition: Box<BooleanExpression>,
        then_expression: Box<ScalarExpression>,
        else_expression: Box<ScalarExpression>,
    },
    LeftFunctionCall {
        parameters: Vec<ScalarExpression>,
    },
    RightFunctionCall {
        parameters: Vec<ScalarExpression>,
    },
    AtTimeZoneCall {
        date_value: Box<ScalarExpression>,
        time_zone: Box<ScalarExpression>,
    },
    NextValueForExpression {
        sequence_name: MultiPartIdentifier,
        over_clause: Option<Box<OverClause>>,
    },
    PartitionFunctionCall {
        function_name: Rc<Identifier>,
        parameters: Vec<ScalarExpression>,
    },
    IdentityFunctionCall,
}

/// `ColumnType` distinguishes a regular column reference from a pseudo
/// column such as `$ACTION` (spec §3).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    Regular,
    PseudoColumnAction,
    PseudoColumnCuid,
    PseudoColumnGraphNodeId,
    PseudoColumnGraphEdgeId,
    PseudoColumnGraphFromId,
    PseudoColumnGraphToId,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    Positive,
    Negative,
    BitwiseNot,
}

/// The assignment operator used by `SET @x = ...`, `SELECT @x += ...`, and
/// `UPDATE ... SET col = ...` (spec §4.3, assignment-style precedence level).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchedCaseWhen {
    pub when_expression: BooleanExpression,
    pub then_expression: ScalarExpression,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleCaseWhen {
    pub when_expression: ScalarExpression,
    pub then_expression: ScalarExpression,
}

/// A general function call (spec §4.3): name, parameters, and the optional
/// clauses that attach to the *syntactic position* of a call rather than to
/// any particular function identity (`WITHIN GROUP`, `OVER`, nulls handling,
/// JSON object arguments).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    pub call_target: Option<MultiPartIdentifier>,
    pub function_name: Rc<Identifier>,
    pub parameters: Vec<ScalarExpression>,
    pub unique_row_filter: UniqueRowFilter,
    pub collation: Option<Rc<Identifier>>,
    pub over_clause: Option<OverClause>,
    pub within_group_clause: Option<Vec<ExpressionWithSortOrder>>,
    pub filter_clause: Option<Box<BooleanExpression>>,
    pub nulls_handling: Option<NullsHandling>,
    pub json_pairs: Vec<JsonKeyValue>,
    pub absent_or_null_on_null: Option<OnNullMode>,
    pub with_array_wrapper: bool,
}

impl FunctionCall {
    pub fn simple(function_name: Rc<Identifier>, parameters: Vec<ScalarExpression>) -> Self {
        FunctionCall {
            call_target: None,
            function_name,
            parameters,
            unique_row_filter: UniqueRowFilter::NotSpecified,
            collation: None,
            over_clause: None,
            within_group_clause: None,
            filter_clause: None,
            nulls_handling: None,
            json_pairs: Vec::new(),
            absent_or_null_on_null: None,
            with_array_wrapper: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UniqueRowFilter {
    NotSpecified,
    All,
    Distinct,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NullsHandling {
    IgnoreNulls,
    RespectNulls,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnNullMode {
    AbsentOnNull,
    NullOnNull,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsonKeyValue {
    pub key: ScalarExpression,
    pub value: ScalarExpression,
}

/// `OVER (PARTITION BY ... ORDER BY ... <frame>)` (spec §4.3).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverClause {
    pub partition_by: Vec<ScalarExpression>,
    pub order_by: Vec<ExpressionWithSortOrder>,
    pub window_frame: Option<WindowFrame>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionWithSortOrder {
    pub expression: ScalarExpression,
    pub sort_order: SortOrder,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    NotSpecified,
    Ascending,
    Descending,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFrame {
    pub frame_type: WindowFrameType,
    pub top: WindowDelimiter,
    pub bottom: Option<WindowDelimiter>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowFrameType {
    Rows,
    Range,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowDelimiter {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    ValuePreceding(ScalarExpression),
    ValueFollowing(ScalarExpression),
}

/// Every boolean (predicate) expression form this crate models, parallel to
/// [`ScalarExpression`] (spec §3, §4.3).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanExpression {
    BooleanComparisonExpression {
        op: BooleanComparisonType,
        first_expression: Box<ScalarExpression>,
        second_expression: Box<ScalarExpression>,
    },
    BooleanBinaryExpression {
        op: BooleanBinaryOperator,
        first: Box<BooleanExpression>,
        second: Box<BooleanExpression>,
    },
    BooleanParenthesisExpression {
        expression: Box<BooleanExpression>,
    },
    BooleanNotExpression {
        expression: Box<BooleanExpression>,
    },
    BooleanIsNullExpression {
        expression: Box<ScalarExpression>,
        is_not: bool,
    },
    LikePredicate {
        first_expression: Box<ScalarExpression>,
        second_expression: Box<ScalarExpression>,
        not_defined: bool,
        escape_expression: Option<Box<ScalarExpression>>,
    },
    InPredicate {
        expression: Box<ScalarExpression>,
        not_defined: bool,
        subquery: Option<Box<QueryExpression>>,
        values: Vec<ScalarExpression>,
    },
    SubqueryComparisonPredicate {
        op: BooleanComparisonType,
        comparison_type: SubqueryComparisonPredicateType,
        expression: Box<ScalarExpression>,
        subquery: Box<QueryExpression>,
    },
    ExistsPredicate {
        subquery: Box<QueryExpression>,
    },
    BooleanDistinctFromExpression {
        first_expression: Box<ScalarExpression>,
        second_expression: Box<ScalarExpression>,
        not_distinct: bool,
    },
    BooleanTernaryExpression {
        op: BooleanTernaryOperator,
        first_expression: Box<ScalarExpression>,
        second_expression: Box<ScalarExpression>,
        third_expression: Box<ScalarExpression>,
    },
    GraphMatchPredicate {
        expression: Box<GraphMatchExpression>,
    },
    FullTextPredicate {
        columns: Vec<MultiPartIdentifier>,
        value: Box<ScalarExpression>,
        language_term: Option<Box<ScalarExpression>>,
        predicate_type: FullTextPredicateType,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanComparisonType {
    Equals,
    NotEqualToBrackets,
    NotEqualToExclamation,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    NotLessThan,
    NotGreaterThan,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanBinaryOperator {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanTernaryOperator {
    Between,
    NotBetween,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubqueryComparisonPredicateType {
    All,
    Any,
    Some,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FullTextPredicateType {
    Contains,
    FreeText,
}

/// A graph `MATCH(...)` expression: either a single node-edge-node triple or
/// a chain of them joined by `AND` (spec §4.4, §9). Chaining shares the
/// connecting node's `Rc` identity between the two composite expressions
/// that reference it, mirroring [`crate::SchemaObjectName`]'s back-reference
/// scheme.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphMatchExpression {
    Composite(GraphMatchCompositeExpression),
    /// A chain of triples: `BooleanBinaryExpression{And}` wrapping two (or,
    /// recursively, more) composite expressions, per spec §9.
    Chain {
        first: Box<GraphMatchExpression>,
        second: Box<GraphMatchExpression>,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphMatchCompositeExpression {
    pub left_node: Rc<GraphMatchNodeExpression>,
    pub edge: GraphMatchEdgeExpression,
    pub right_node: Rc<GraphMatchNodeExpression>,
    pub arrow_on_right: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphMatchNodeExpression {
    pub multi_part_identifier: MultiPartIdentifier,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphMatchEdgeExpression {
    pub multi_part_identifier: MultiPartIdentifier,
    pub is_parenthesized: bool,
}
