use std::rc::Rc;

use crate::expr::{BooleanExpression, ExpressionWithSortOrder, ScalarExpression, SortOrder};
use crate::ident::{Identifier, SchemaObjectName};
use crate::query::QueryExpression;
use crate::statement::StatementList;

/// A `<type>(<len>)`-shaped data type reference (e.g. `NVARCHAR(50)`,
/// `DECIMAL(18, 2)`, `VARCHAR(MAX)`). Kept as a thin, string-based model
/// rather than the reference's full catalog of built-in type descriptors
/// (spec §12).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataType {
    pub name: String,
    pub parameters: Vec<String>,
}

/// A single column in a `CREATE TABLE`/`ALTER TABLE ADD` column list
/// (spec §4.4).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefinition {
    pub column_identifier: Rc<Identifier>,
    pub data_type: DataType,
    pub identity: Option<IdentityOptions>,
    pub constraints: Vec<ConstraintDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityOptions {
    pub seed: Option<ScalarExpression>,
    pub increment: Option<ScalarExpression>,
    pub not_for_replication: bool,
}

/// A column- or table-level constraint (spec §4.4). `columns` is empty for
/// an inline column constraint (the column it applies to is implicit) and
/// populated for a table-level constraint naming one or more columns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintDefinition {
    pub constraint_identifier: Option<Rc<Identifier>>,
    pub kind: ConstraintKind,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    Unique {
        is_primary_key: bool,
        clustered: Option<bool>,
        columns: Vec<(Rc<Identifier>, SortOrder)>,
    },
    Nullable {
        nullable: bool,
    },
    Check {
        expression: BooleanExpression,
    },
    Default {
        expression: ScalarExpression,
        for_column: Option<Rc<Identifier>>,
    },
    ForeignKey {
        columns: Vec<Rc<Identifier>>,
        referenced_table: SchemaObjectName,
        referenced_columns: Vec<Rc<Identifier>>,
        delete_action: DeleteUpdateAction,
        update_action: DeleteUpdateAction,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeleteUpdateAction {
    NotSpecified,
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
}

/// Markers parsed right before the column-list paren of `CREATE TABLE`
/// (spec §4.4: `AS {FILETABLE|NODE|EDGE}`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableObjectKind {
    Table,
    FileTable,
    Node,
    Edge,
}

/// A `WITH (...)` table option (spec §4.4). Option names follow the
/// generic `IDENT [= value] (, IDENT [= value])*` mini-grammar (spec §9);
/// unrecognized options are preserved with their raw value text rather than
/// silently skipped, so lenient parsing never loses what was parsed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOption {
    pub name: String,
    pub value: Option<String>,
}

/// `WITH (DISTRIBUTION = HASH(col1, col2, ...))` (spec §4.4's `DISTRIBUTION`
/// option, spec §4.5/§9's `TableHashDistributionPolicy`/
/// `ViewHashDistributionPolicy` shapes). `distribution_columns[0]` shares
/// `Rc` identity with `distribution_column` — the same identifier object
/// reachable through two slots, exactly like [`SchemaObjectName`]'s named
/// slot plus flat list. The marshaller emits the first occurrence in full
/// and the second as a `$ref` (spec §9, Open Question 2).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashDistributionPolicy {
    pub distribution_column: Rc<Identifier>,
    pub distribution_columns: Vec<Rc<Identifier>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableDefinitionBody {
    /// The ordinary form: column definitions, table constraints.
    Columns {
        columns: Vec<ColumnDefinition>,
        constraints: Vec<ConstraintDefinition>,
    },
    /// `CREATE TABLE ... (c1, c2, ...) AS SELECT ...` — a bare column-name list.
    CtasColumnList { columns: Vec<Rc<Identifier>> },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTableStatement {
    pub schema_object_name: SchemaObjectName,
    pub as_kind: TableObjectKind,
    pub definition: TableDefinitionBody,
    pub on_filegroup: Option<String>,
    pub textimage_on: Option<String>,
    pub filestream_on: Option<String>,
    pub options: Vec<TableOption>,
    pub distribution_policy: Option<HashDistributionPolicy>,
    pub as_select: Option<Box<QueryExpression>>,
    pub federated_on: Vec<(Rc<Identifier>, ScalarExpression)>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateViewStatement {
    pub schema_object_name: SchemaObjectName,
    pub columns: Vec<Rc<Identifier>>,
    pub with_options: Vec<String>,
    pub distribution_policy: Option<HashDistributionPolicy>,
    pub select_statement: Box<QueryExpression>,
    pub with_check_option: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcedureParameter {
    pub variable_name: String,
    pub data_type: DataType,
    pub default_value: Option<ScalarExpression>,
    pub is_output: bool,
    pub is_readonly: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateProcedureStatement {
    pub schema_object_name: SchemaObjectName,
    pub parameters: Vec<ProcedureParameter>,
    pub with_options: Vec<String>,
    pub statement_list: StatementList,
    pub is_external: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateFunctionStatement {
    pub schema_object_name: SchemaObjectName,
    pub parameters: Vec<ProcedureParameter>,
    pub returns: FunctionReturnType,
    pub with_options: Vec<String>,
    pub statement_list: Option<StatementList>,
    pub return_expression: Option<ScalarExpression>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionReturnType {
    Scalar(DataType),
    Table,
    TableWithColumns(Vec<ColumnDefinition>),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTriggerStatement {
    pub name: SchemaObjectName,
    pub trigger_scope: TriggerScope,
    pub trigger_object: Option<SchemaObjectName>,
    pub with_options: Vec<String>,
    pub trigger_type: TriggerType,
    pub event_types: Vec<String>,
    pub not_for_replication: bool,
    pub statement_list: Option<StatementList>,
    pub external_name: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerScope {
    Object,
    Database,
    AllServer,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerType {
    For,
    After,
    InsteadOf,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateSchemaStatement {
    pub name: Rc<Identifier>,
    pub authorization: Option<Rc<Identifier>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateDatabaseStatement {
    pub name: Rc<Identifier>,
    pub attach_mode: AttachMode,
    pub containment: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachMode {
    None,
    Attach,
    AttachRebuildLog,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateIndexStatement {
    pub name: Rc<Identifier>,
    pub unique: bool,
    pub clustered: Option<bool>,
    pub on_table: SchemaObjectName,
    pub columns: Vec<(Rc<Identifier>, SortOrder)>,
    pub included_columns: Vec<Rc<Identifier>>,
    pub where_clause: Option<BooleanExpression>,
    pub options: Vec<TableOption>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterIndexStatement {
    pub name: Option<Rc<Identifier>>,
    pub all: bool,
    pub on_table: SchemaObjectName,
    pub alter_index_type: AlterIndexType,
    pub partition_number: Option<ScalarExpression>,
    pub options: Vec<TableOption>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterIndexType {
    Rebuild,
    Reorganize,
    Disable,
    Set,
    Resume,
    Pause,
    Abort,
}

/// Common table element added by `ALTER TABLE ... ADD`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterTableAction {
    AddTableElements {
        columns: Vec<ColumnDefinition>,
        constraints: Vec<ConstraintDefinition>,
    },
    DropTableElements {
        constraint_names: Vec<Rc<Identifier>>,
        column_names: Vec<Rc<Identifier>>,
    },
    AlterColumn {
        column: ColumnDefinition,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterTableStatement {
    pub schema_object_name: SchemaObjectName,
    pub action: AlterTableAction,
}

/// The object class a `DROP` statement targets. Covers the handful of
/// classes exercised by this crate's test suite; see spec §12 for the
/// coverage boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropObjectKind {
    Table,
    View,
    Procedure,
    Function,
    Index,
    Schema,
    Trigger,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropBehavior {
    None,
    Cascade,
    Restrict,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropObjectsStatement {
    pub object_kind: DropObjectKind,
    pub if_exists: bool,
    pub objects: Vec<SchemaObjectName>,
    pub drop_behavior: DropBehavior,
}
