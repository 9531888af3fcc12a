//! String spellings for the AST's plain enums, matching the reference
//! shape's fixed vocabulary (spec §6).

use tsql_ast::*;

pub(crate) fn quote_type_str(value: QuoteType) -> &'static str {
    match value {
        QuoteType::NotQuoted => "NotQuoted",
        QuoteType::SquareBracket => "SquareBracket",
        QuoteType::DoubleQuote => "DoubleQuote",
        QuoteType::Backtick => "Backtick",
    }
}

pub(crate) fn sort_order_str(value: SortOrder) -> &'static str {
    match value {
        SortOrder::NotSpecified => "NotSpecified",
        SortOrder::Ascending => "Ascending",
        SortOrder::Descending => "Descending",
    }
}

pub(crate) fn unique_row_filter_str(value: UniqueRowFilter) -> &'static str {
    match value {
        UniqueRowFilter::NotSpecified => "NotSpecified",
        UniqueRowFilter::All => "All",
        UniqueRowFilter::Distinct => "Distinct",
    }
}

pub(crate) fn binary_operator_str(value: BinaryOperator) -> &'static str {
    match value {
        BinaryOperator::Add => "Add",
        BinaryOperator::Subtract => "Subtract",
        BinaryOperator::Multiply => "Multiply",
        BinaryOperator::Divide => "Divide",
        BinaryOperator::Modulo => "Modulo",
        BinaryOperator::BitwiseAnd => "BitwiseAnd",
        BinaryOperator::BitwiseOr => "BitwiseOr",
        BinaryOperator::BitwiseXor => "BitwiseXor",
    }
}

pub(crate) fn unary_operator_str(value: UnaryOperator) -> &'static str {
    match value {
        UnaryOperator::Positive => "Positive",
        UnaryOperator::Negative => "Negative",
        UnaryOperator::BitwiseNot => "BitwiseNot",
    }
}

pub(crate) fn assignment_operator_str(value: AssignmentOperator) -> &'static str {
    match value {
        AssignmentOperator::Assign => "Assign",
        AssignmentOperator::AddAssign => "AddAssign",
        AssignmentOperator::SubtractAssign => "SubtractAssign",
        AssignmentOperator::MultiplyAssign => "MultiplyAssign",
        AssignmentOperator::DivideAssign => "DivideAssign",
        AssignmentOperator::ModuloAssign => "ModuloAssign",
        AssignmentOperator::BitwiseAndAssign => "BitwiseAndAssign",
        AssignmentOperator::BitwiseOrAssign => "BitwiseOrAssign",
        AssignmentOperator::BitwiseXorAssign => "BitwiseXorAssign",
    }
}

pub(crate) fn column_type_str(value: ColumnType) -> &'static str {
    match value {
        ColumnType::Regular => "Regular",
        ColumnType::PseudoColumnAction => "PseudoColumnAction",
        ColumnType::PseudoColumnCuid => "PseudoColumnCuid",
        ColumnType::PseudoColumnGraphNodeId => "PseudoColumnGraphNodeId",
        ColumnType::PseudoColumnGraphEdgeId => "PseudoColumnGraphEdgeId",
        ColumnType::PseudoColumnGraphFromId => "PseudoColumnGraphFromId",
        ColumnType::PseudoColumnGraphToId => "PseudoColumnGraphToId",
    }
}

pub(crate) fn nulls_handling_str(value: NullsHandling) -> &'static str {
    match value {
        NullsHandling::IgnoreNulls => "IgnoreNulls",
        NullsHandling::RespectNulls => "RespectNulls",
    }
}

pub(crate) fn on_null_mode_str(value: OnNullMode) -> &'static str {
    match value {
        OnNullMode::AbsentOnNull => "AbsentOnNull",
        OnNullMode::NullOnNull => "NullOnNull",
    }
}

pub(crate) fn window_frame_type_str(value: WindowFrameType) -> &'static str {
    match value {
        WindowFrameType::Rows => "Rows",
        WindowFrameType::Range => "Range",
    }
}

pub(crate) fn boolean_comparison_type_str(value: BooleanComparisonType) -> &'static str {
    match value {
        BooleanComparisonType::Equals => "Equals",
        BooleanComparisonType::NotEqualToBrackets => "NotEqualToBrackets",
        BooleanComparisonType::NotEqualToExclamation => "NotEqualToExclamation",
        BooleanComparisonType::LessThan => "LessThan",
        BooleanComparisonType::GreaterThan => "GreaterThan",
        BooleanComparisonType::LessThanOrEqualTo => "LessThanOrEqualTo",
        BooleanComparisonType::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
        BooleanComparisonType::NotLessThan => "NotLessThan",
        BooleanComparisonType::NotGreaterThan => "NotGreaterThan",
    }
}

pub(crate) fn boolean_binary_operator_str(value: BooleanBinaryOperator) -> &'static str {
    match value {
        BooleanBinaryOperator::And => "And",
        BooleanBinaryOperator::Or => "Or",
    }
}

pub(crate) fn boolean_ternary_operator_str(value: BooleanTernaryOperator) -> &'static str {
    match value {
        BooleanTernaryOperator::Between => "Between",
        BooleanTernaryOperator::NotBetween => "NotBetween",
    }
}

pub(crate) fn subquery_comparison_predicate_type_str(
    value: SubqueryComparisonPredicateType,
) -> &'static str {
    match value {
        SubqueryComparisonPredicateType::All => "All",
        SubqueryComparisonPredicateType::Any => "Any",
        SubqueryComparisonPredicateType::Some => "Some",
    }
}

pub(crate) fn full_text_predicate_type_str(value: FullTextPredicateType) -> &'static str {
    match value {
        FullTextPredicateType::Contains => "Contains",
        FullTextPredicateType::FreeText => "FreeText",
    }
}

pub(crate) fn join_type_str(value: JoinType) -> &'static str {
    match value {
        JoinType::Inner => "Inner",
        JoinType::LeftOuter => "LeftOuter",
        JoinType::RightOuter => "RightOuter",
        JoinType::FullOuter => "FullOuter",
    }
}

pub(crate) fn join_hint_str(value: JoinHint) -> &'static str {
    match value {
        JoinHint::None => "None",
        JoinHint::Loop => "Loop",
        JoinHint::Hash => "Hash",
        JoinHint::Merge => "Merge",
        JoinHint::Remote => "Remote",
    }
}

pub(crate) fn unqualified_join_type_str(value: UnqualifiedJoinType) -> &'static str {
    match value {
        UnqualifiedJoinType::CrossJoin => "CrossJoin",
        UnqualifiedJoinType::CrossApply => "CrossApply",
        UnqualifiedJoinType::OuterApply => "OuterApply",
    }
}

pub(crate) fn binary_query_expression_type_str(value: BinaryQueryExpressionType) -> &'static str {
    match value {
        BinaryQueryExpressionType::Union => "Union",
        BinaryQueryExpressionType::Intersect => "Intersect",
        BinaryQueryExpressionType::Except => "Except",
    }
}

pub(crate) fn for_clause_str(value: ForClause) -> &'static str {
    match value {
        ForClause::Xml => "Xml",
        ForClause::Json => "Json",
        ForClause::Browse => "Browse",
    }
}

pub(crate) fn delete_update_action_str(value: DeleteUpdateAction) -> &'static str {
    match value {
        DeleteUpdateAction::NotSpecified => "NotSpecified",
        DeleteUpdateAction::NoAction => "NoAction",
        DeleteUpdateAction::Cascade => "Cascade",
        DeleteUpdateAction::SetNull => "SetNull",
        DeleteUpdateAction::SetDefault => "SetDefault",
    }
}

pub(crate) fn table_object_kind_str(value: TableObjectKind) -> &'static str {
    match value {
        TableObjectKind::Table => "Table",
        TableObjectKind::FileTable => "FileTable",
        TableObjectKind::Node => "Node",
        TableObjectKind::Edge => "Edge",
    }
}

pub(crate) fn trigger_scope_str(value: TriggerScope) -> &'static str {
    match value {
        TriggerScope::Object => "Object",
        TriggerScope::Database => "Database",
        TriggerScope::AllServer => "AllServer",
    }
}

pub(crate) fn trigger_type_str(value: TriggerType) -> &'static str {
    match value {
        TriggerType::For => "For",
        TriggerType::After => "After",
        TriggerType::InsteadOf => "InsteadOf",
    }
}

pub(crate) fn attach_mode_str(value: AttachMode) -> &'static str {
    match value {
        AttachMode::None => "None",
        AttachMode::Attach => "Attach",
        AttachMode::AttachRebuildLog => "AttachRebuildLog",
    }
}

pub(crate) fn alter_index_type_str(value: AlterIndexType) -> &'static str {
    match value {
        AlterIndexType::Rebuild => "Rebuild",
        AlterIndexType::Reorganize => "Reorganize",
        AlterIndexType::Disable => "Disable",
        AlterIndexType::Set => "Set",
        AlterIndexType::Resume => "Resume",
        AlterIndexType::Pause => "Pause",
        AlterIndexType::Abort => "Abort",
    }
}

pub(crate) fn drop_object_kind_str(value: DropObjectKind) -> &'static str {
    match value {
        DropObjectKind::Table => "Table",
        DropObjectKind::View => "View",
        DropObjectKind::Procedure => "Procedure",
        DropObjectKind::Function => "Function",
        DropObjectKind::Index => "Index",
        DropObjectKind::Schema => "Schema",
        DropObjectKind::Trigger => "Trigger",
    }
}

pub(crate) fn drop_behavior_str(value: DropBehavior) -> &'static str {
    match value {
        DropBehavior::None => "None",
        DropBehavior::Cascade => "Cascade",
        DropBehavior::Restrict => "Restrict",
    }
}

pub(crate) fn null_not_null_str(value: NullNotNull) -> &'static str {
    match value {
        NullNotNull::Unspecified => "NotSpecified",
        NullNotNull::Null => "Null",
        NullNotNull::NotNull => "NotNull",
    }
}

pub(crate) fn merge_action_condition_str(value: MergeActionCondition) -> &'static str {
    match value {
        MergeActionCondition::Matched => "Matched",
        MergeActionCondition::NotMatchedByTarget => "NotMatchedByTarget",
        MergeActionCondition::NotMatchedBySource => "NotMatchedBySource",
    }
}

pub(crate) fn security_object_kind_str(value: SecurityObjectKind) -> &'static str {
    match value {
        SecurityObjectKind::NotSpecified => "NotSpecified",
        SecurityObjectKind::Object => "Object",
        SecurityObjectKind::Schema => "Schema",
        SecurityObjectKind::ServerRole => "ServerRole",
        SecurityObjectKind::ApplicationRole => "ApplicationRole",
        SecurityObjectKind::AsymmetricKey => "AsymmetricKey",
        SecurityObjectKind::SymmetricKey => "SymmetricKey",
        SecurityObjectKind::RemoteServiceBinding => "RemoteServiceBinding",
        SecurityObjectKind::FullTextCatalog => "FullTextCatalog",
        SecurityObjectKind::FullTextStoplist => "FullTextStoplist",
        SecurityObjectKind::MessageType => "MessageType",
        SecurityObjectKind::XmlSchemaCollection => "XmlSchemaCollection",
        SecurityObjectKind::SearchPropertyList => "SearchPropertyList",
        SecurityObjectKind::AvailabilityGroup => "AvailabilityGroup",
    }
}

pub(crate) fn principal_type_str(value: PrincipalType) -> &'static str {
    match value {
        PrincipalType::Regular => "Regular",
        PrincipalType::Public => "Public",
        PrincipalType::Null => "Null",
    }
}

pub(crate) fn cursor_option_str(value: CursorOption) -> &'static str {
    match value {
        CursorOption::Local => "Local",
        CursorOption::Global => "Global",
        CursorOption::ForwardOnly => "ForwardOnly",
        CursorOption::Scroll => "Scroll",
        CursorOption::Static => "Static",
        CursorOption::Keyset => "Keyset",
        CursorOption::Dynamic => "Dynamic",
        CursorOption::FastForward => "FastForward",
        CursorOption::ReadOnly => "ReadOnly",
    }
}

pub(crate) fn fetch_orientation_str(value: FetchOrientation) -> &'static str {
    match value {
        FetchOrientation::Next => "Next",
        FetchOrientation::Prior => "Prior",
        FetchOrientation::First => "First",
        FetchOrientation::Last => "Last",
        FetchOrientation::Absolute => "Absolute",
        FetchOrientation::Relative => "Relative",
    }
}
