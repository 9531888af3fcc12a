use serde_json::Value;
use std::rc::Rc;

use tsql_ast::{
    AlterIndexStatement, AlterTableAction, AlterTableStatement, ColumnDefinition,
    ConstraintDefinition, ConstraintKind, CreateDatabaseStatement, CreateFunctionStatement,
    CreateIndexStatement, CreateProcedureStatement, CreateSchemaStatement, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, DataType, DropObjectsStatement,
    FunctionReturnType, HashDistributionPolicy, Identifier, IdentityOptions, ProcedureParameter,
    SortOrder, TableDefinitionBody, TableOption,
};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::expr::{marshal_boolean_expression, marshal_scalar_expression};
use crate::ident::{marshal_identifier, marshal_schema_object_name};
use crate::node::*;
use crate::query::marshal_query_expression;
use crate::statement::marshal_statement_list;

pub(crate) fn marshal_data_type(dt: &DataType) -> Value {
    let mut map = node("SqlDataTypeReference");
    insert_string(&mut map, "Name", dt.name.clone());
    insert_array_if_nonempty(
        &mut map,
        "Parameters",
        dt.parameters.iter().map(|p| Value::String(p.clone())).collect(),
    );
    finish(map)
}

pub(crate) fn marshal_table_option(option: &TableOption) -> Value {
    let mut map = node("TableOption");
    insert_string(&mut map, "Name", option.name.clone());
    insert_if_some(&mut map, "Value", option.value.clone().map(Value::String));
    finish(map)
}

fn marshal_identity_options(ctx: &mut MarshalContext, identity: &IdentityOptions) -> Value {
    let mut map = node("IdentityOptions");
    insert_if_some(
        &mut map,
        "IdentitySeed",
        identity.seed.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_if_some(
        &mut map,
        "IdentityIncrement",
        identity
            .increment
            .as_ref()
            .map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_bool(&mut map, "NotForReplication", identity.not_for_replication);
    finish(map)
}

pub(crate) fn marshal_column_definition(ctx: &mut MarshalContext, column: &ColumnDefinition) -> Value {
    let mut map = node("ColumnDefinition");
    map.insert(
        "ColumnIdentifier".to_string(),
        marshal_identifier(ctx, &column.column_identifier),
    );
    map.insert("DataType".to_string(), marshal_data_type(&column.data_type));
    insert_if_some(
        &mut map,
        "IdentityOptions",
        column
            .identity
            .as_ref()
            .map(|i| marshal_identity_options(ctx, i)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Constraints",
        column
            .constraints
            .iter()
            .map(|c| marshal_constraint_definition(ctx, c))
            .collect(),
    );
    finish(map)
}

fn marshal_column_with_sort_order(
    ctx: &mut MarshalContext,
    pair: &(Rc<Identifier>, SortOrder),
) -> Value {
    let mut map = node("ColumnWithSortOrder");
    map.insert("Column".to_string(), marshal_identifier(ctx, &pair.0));
    insert_string(&mut map, "SortOrder", sort_order_str(pair.1));
    finish(map)
}

pub(crate) fn marshal_constraint_definition(
    ctx: &mut MarshalContext,
    constraint: &ConstraintDefinition,
) -> Value {
    let mut map = match &constraint.kind {
        ConstraintKind::Unique {
            is_primary_key,
            clustered,
            columns,
        } => {
            let mut m = node("UniqueConstraintDefinition");
            insert_bool(&mut m, "IsPrimaryKey", *is_primary_key);
            insert_if_some(&mut m, "Clustered", clustered.map(Value::Bool));
            insert_array(
                &mut m,
                "Columns",
                columns
                    .iter()
                    .map(|c| marshal_column_with_sort_order(ctx, c))
                    .collect(),
            );
            m
        }
        ConstraintKind::Nullable { nullable } => {
            let mut m = node("NullableConstraintDefinition");
            insert_bool(&mut m, "Nullable", *nullable);
            m
        }
        ConstraintKind::Check { expression } => {
            let mut m = node("CheckConstraintDefinition");
            m.insert(
                "Expression".to_string(),
                marshal_boolean_expression(ctx, expression),
            );
            m
        }
        ConstraintKind::Default {
            expression,
            for_column,
        } => {
            let mut m = node("DefaultConstraintDefinition");
            m.insert(
                "Expression".to_string(),
                marshal_scalar_expression(ctx, expression),
            );
            insert_if_some(
                &mut m,
                "Column",
                for_column.as_ref().map(|c| marshal_identifier(ctx, c)),
            );
            m
        }
        ConstraintKind::ForeignKey {
            columns,
            referenced_table,
            referenced_columns,
            delete_action,
            update_action,
        } => {
            let mut m = node("ForeignKeyConstraintDefinition");
            insert_array(
                &mut m,
                "Columns",
                columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
            m.insert(
                "ReferenceTableName".to_string(),
                marshal_schema_object_name(ctx, referenced_table),
            );
            insert_array(
                &mut m,
                "ReferencedTableColumns",
                referenced_columns
                    .iter()
                    .map(|c| marshal_identifier(ctx, c))
                    .collect(),
            );
            insert_string(&mut m, "DeleteAction", delete_update_action_str(*delete_action));
            insert_string(&mut m, "UpdateAction", delete_update_action_str(*update_action));
            m
        }
    };
    insert_if_some(
        &mut map,
        "ConstraintIdentifier",
        constraint
            .constraint_identifier
            .as_ref()
            .map(|id| marshal_identifier(ctx, id)),
    );
    finish(map)
}

/// Marshals a `DISTRIBUTION = HASH(...)` policy (spec §4.5, §9). The first
/// element of `distribution_columns` is the same `Rc` allocation as
/// `distribution_column`, so marshalling `distribution_column` first and
/// `distribution_columns` second makes the marshaller's own `$ref` tracking
/// emit the first array element as a back-reference automatically, with no
/// special-casing needed here beyond call order.
fn marshal_hash_distribution_policy(
    ctx: &mut MarshalContext,
    type_name: &str,
    policy: &HashDistributionPolicy,
) -> Value {
    let mut map = node(type_name);
    map.insert(
        "DistributionColumn".to_string(),
        marshal_identifier(ctx, &policy.distribution_column),
    );
    insert_array(
        &mut map,
        "DistributionColumns",
        policy
            .distribution_columns
            .iter()
            .map(|c| marshal_identifier(ctx, c))
            .collect(),
    );
    finish(map)
}

pub(crate) fn marshal_create_table_statement(
    ctx: &mut MarshalContext,
    stmt: &CreateTableStatement,
) -> Value {
    let mut map = node("CreateTableStatement");
    map.insert(
        "SchemaObjectName".to_string(),
        marshal_schema_object_name(ctx, &stmt.schema_object_name),
    );
    insert_string(&mut map, "ObjectTableType", table_object_kind_str(stmt.as_kind));
    match &stmt.definition {
        TableDefinitionBody::Columns {
            columns,
            constraints,
        } => {
            insert_array(
                &mut map,
                "ColumnDefinitions",
                columns
                    .iter()
                    .map(|c| marshal_column_definition(ctx, c))
                    .collect(),
            );
            insert_array_if_nonempty(
                &mut map,
                "TableConstraints",
                constraints
                    .iter()
                    .map(|c| marshal_constraint_definition(ctx, c))
                    .collect(),
            );
        }
        TableDefinitionBody::CtasColumnList { columns } => {
            insert_array(
                &mut map,
                "CtasColumns",
                columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
        }
    }
    insert_if_some(
        &mut map,
        "OnFileGroupOrPartitionScheme",
        stmt.on_filegroup.clone().map(Value::String),
    );
    insert_if_some(&mut map, "TextImageOn", stmt.textimage_on.clone().map(Value::String));
    insert_if_some(&mut map, "FileStreamOn", stmt.filestream_on.clone().map(Value::String));
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_table_option).collect(),
    );
    insert_if_some(
        &mut map,
        "DistributionPolicy",
        stmt.distribution_policy
            .as_ref()
            .map(|p| marshal_hash_distribution_policy(ctx, "TableHashDistributionPolicy", p)),
    );
    insert_if_some(
        &mut map,
        "AsSelect",
        stmt.as_select
            .as_ref()
            .map(|q| marshal_query_expression(ctx, q)),
    );
    insert_array_if_nonempty(
        &mut map,
        "FederatedOn",
        stmt.federated_on
            .iter()
            .map(|(id, value)| {
                let mut m = node("FederatedOnElement");
                m.insert("Identifier".to_string(), marshal_identifier(ctx, id));
                m.insert("Value".to_string(), marshal_scalar_expression(ctx, value));
                finish(m)
            })
            .collect(),
    );
    finish(map)
}

pub(crate) fn marshal_create_view_statement(ctx: &mut MarshalContext, stmt: &CreateViewStatement) -> Value {
    let mut map = node("CreateViewStatement");
    map.insert(
        "SchemaObjectName".to_string(),
        marshal_schema_object_name(ctx, &stmt.schema_object_name),
    );
    insert_array_if_nonempty(
        &mut map,
        "Columns",
        stmt.columns.iter().map(|c| marshal_identifier(ctx, c)).collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "ViewOptions",
        stmt.with_options
            .iter()
            .map(|o| Value::String(o.clone()))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "DistributionPolicy",
        stmt.distribution_policy
            .as_ref()
            .map(|p| marshal_hash_distribution_policy(ctx, "ViewHashDistributionPolicy", p)),
    );
    map.insert(
        "SelectStatement".to_string(),
        marshal_query_expression(ctx, &stmt.select_statement),
    );
    insert_bool(&mut map, "WithCheckOption", stmt.with_check_option);
    finish(map)
}

fn marshal_procedure_parameter(ctx: &mut MarshalContext, param: &ProcedureParameter) -> Value {
    let mut map = node("ProcedureParameter");
    insert_string(&mut map, "VariableName", param.variable_name.clone());
    map.insert("DataType".to_string(), marshal_data_type(&param.data_type));
    insert_if_some(
        &mut map,
        "Value",
        param
            .default_value
            .as_ref()
            .map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_bool(&mut map, "IsOutput", param.is_output);
    insert_bool(&mut map, "IsReadOnly", param.is_readonly);
    finish(map)
}

pub(crate) fn marshal_create_procedure_statement(
    ctx: &mut MarshalContext,
    stmt: &CreateProcedureStatement,
) -> Value {
    let mut map = node("CreateProcedureStatement");
    map.insert(
        "SchemaObjectName".to_string(),
        marshal_schema_object_name(ctx, &stmt.schema_object_name),
    );
    insert_array_if_nonempty(
        &mut map,
        "Parameters",
        stmt.parameters
            .iter()
            .map(|p| marshal_procedure_parameter(ctx, p))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "ProcedureOptions",
        stmt.with_options
            .iter()
            .map(|o| Value::String(o.clone()))
            .collect(),
    );
    insert_bool(&mut map, "IsExternal", stmt.is_external);
    insert_array_if_nonempty(
        &mut map,
        "StatementList",
        marshal_statement_list(ctx, &stmt.statement_list),
    );
    finish(map)
}

pub(crate) fn marshal_create_function_statement(
    ctx: &mut MarshalContext,
    stmt: &CreateFunctionStatement,
) -> Value {
    let mut map = node("CreateFunctionStatement");
    map.insert(
        "SchemaObjectName".to_string(),
        marshal_schema_object_name(ctx, &stmt.schema_object_name),
    );
    insert_array_if_nonempty(
        &mut map,
        "Parameters",
        stmt.parameters
            .iter()
            .map(|p| marshal_procedure_parameter(ctx, p))
            .collect(),
    );
    map.insert(
        "ReturnType".to_string(),
        marshal_function_return_type(ctx, &stmt.returns),
    );
    insert_array_if_nonempty(
        &mut map,
        "FunctionOptions",
        stmt.with_options
            .iter()
            .map(|o| Value::String(o.clone()))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "StatementList",
        stmt.statement_list
            .as_ref()
            .map(|list| Value::Array(marshal_statement_list(ctx, list))),
    );
    insert_if_some(
        &mut map,
        "ReturnExpression",
        stmt.return_expression
            .as_ref()
            .map(|e| marshal_scalar_expression(ctx, e)),
    );
    finish(map)
}

fn marshal_function_return_type(ctx: &mut MarshalContext, returns: &FunctionReturnType) -> Value {
    match returns {
        FunctionReturnType::Scalar(dt) => {
            let mut map = node("ScalarFunctionReturnType");
            map.insert("DataType".to_string(), marshal_data_type(dt));
            finish(map)
        }
        FunctionReturnType::Table => finish(node("SelectFunctionReturnType")),
        FunctionReturnType::TableWithColumns(columns) => {
            let mut map = node("TableValuedFunctionReturnType");
            insert_array(
                &mut map,
                "DeclareTableVariableBody",
                columns
                    .iter()
                    .map(|c| marshal_column_definition(ctx, c))
                    .collect(),
            );
            finish(map)
        }
    }
}

pub(crate) fn marshal_create_trigger_statement(
    ctx: &mut MarshalContext,
    stmt: &CreateTriggerStatement,
) -> Value {
    let mut map = node("CreateTriggerStatement");
    map.insert(
        "Name".to_string(),
        marshal_schema_object_name(ctx, &stmt.name),
    );
    insert_string(&mut map, "TriggerScope", trigger_scope_str(stmt.trigger_scope));
    insert_if_some(
        &mut map,
        "TriggerObject",
        stmt.trigger_object
            .as_ref()
            .map(|o| marshal_schema_object_name(ctx, o)),
    );
    insert_array_if_nonempty(
        &mut map,
        "TriggerOptions",
        stmt.with_options
            .iter()
            .map(|o| Value::String(o.clone()))
            .collect(),
    );
    insert_string(&mut map, "TriggerType", trigger_type_str(stmt.trigger_type));
    insert_array_if_nonempty(
        &mut map,
        "TriggerEvents",
        stmt.event_types
            .iter()
            .map(|e| {
                let mut m = node("EventTypeContainer");
                insert_string(&mut m, "EventType", e.clone());
                finish(m)
            })
            .collect(),
    );
    insert_bool(&mut map, "NotForReplication", stmt.not_for_replication);
    insert_if_some(
        &mut map,
        "StatementList",
        stmt.statement_list
            .as_ref()
            .map(|list| Value::Array(marshal_statement_list(ctx, list))),
    );
    insert_if_some(&mut map, "ExternalName", stmt.external_name.clone().map(Value::String));
    finish(map)
}

pub(crate) fn marshal_create_schema_statement(ctx: &mut MarshalContext, stmt: &CreateSchemaStatement) -> Value {
    let mut map = node("CreateSchemaStatement");
    map.insert("Name".to_string(), marshal_identifier(ctx, &stmt.name));
    insert_if_some(
        &mut map,
        "Authorization",
        stmt.authorization
            .as_ref()
            .map(|a| marshal_identifier(ctx, a)),
    );
    finish(map)
}

pub(crate) fn marshal_create_database_statement(
    ctx: &mut MarshalContext,
    stmt: &CreateDatabaseStatement,
) -> Value {
    let mut map = node("CreateDatabaseStatement");
    map.insert("Name".to_string(), marshal_identifier(ctx, &stmt.name));
    insert_string(&mut map, "AttachMode", attach_mode_str(stmt.attach_mode));
    insert_if_some(&mut map, "Containment", stmt.containment.clone().map(Value::String));
    finish(map)
}

pub(crate) fn marshal_create_index_statement(ctx: &mut MarshalContext, stmt: &CreateIndexStatement) -> Value {
    let mut map = node("CreateIndexStatement");
    map.insert("Name".to_string(), marshal_identifier(ctx, &stmt.name));
    insert_bool(&mut map, "Unique", stmt.unique);
    insert_if_some(&mut map, "Clustered", stmt.clustered.map(Value::Bool));
    map.insert(
        "OnTable".to_string(),
        marshal_schema_object_name(ctx, &stmt.on_table),
    );
    insert_array(
        &mut map,
        "Columns",
        stmt.columns
            .iter()
            .map(|c| marshal_column_with_sort_order(ctx, c))
            .collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "IncludedColumns",
        stmt.included_columns
            .iter()
            .map(|c| marshal_identifier(ctx, c))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "FilterPredicate",
        stmt.where_clause
            .as_ref()
            .map(|w| marshal_boolean_expression(ctx, w)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_table_option).collect(),
    );
    finish(map)
}

pub(crate) fn marshal_alter_index_statement(ctx: &mut MarshalContext, stmt: &AlterIndexStatement) -> Value {
    let mut map = node("AlterIndexStatement");
    insert_if_some(
        &mut map,
        "Name",
        stmt.name.as_ref().map(|n| marshal_identifier(ctx, n)),
    );
    insert_bool(&mut map, "All", stmt.all);
    map.insert(
        "OnTable".to_string(),
        marshal_schema_object_name(ctx, &stmt.on_table),
    );
    insert_string(&mut map, "AlterIndexType", alter_index_type_str(stmt.alter_index_type));
    insert_if_some(
        &mut map,
        "PartitionNumber",
        stmt.partition_number
            .as_ref()
            .map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_table_option).collect(),
    );
    finish(map)
}

pub(crate) fn marshal_alter_table_statement(ctx: &mut MarshalContext, stmt: &AlterTableStatement) -> Value {
    let mut map = node("AlterTableStatement");
    map.insert(
        "SchemaObjectName".to_string(),
        marshal_schema_object_name(ctx, &stmt.schema_object_name),
    );
    match &stmt.action {
        AlterTableAction::AddTableElements { columns, constraints } => {
            insert_string(&mut map, "AlterTableActionType", "Add");
            insert_array_if_nonempty(
                &mut map,
                "ColumnDefinitions",
                columns
                    .iter()
                    .map(|c| marshal_column_definition(ctx, c))
                    .collect(),
            );
            insert_array_if_nonempty(
                &mut map,
                "TableConstraints",
                constraints
                    .iter()
                    .map(|c| marshal_constraint_definition(ctx, c))
                    .collect(),
            );
        }
        AlterTableAction::DropTableElements {
            constraint_names,
            column_names,
        } => {
            insert_string(&mut map, "AlterTableActionType", "Drop");
            insert_array_if_nonempty(
                &mut map,
                "DroppedConstraints",
                constraint_names
                    .iter()
                    .map(|c| marshal_identifier(ctx, c))
                    .collect(),
            );
            insert_array_if_nonempty(
                &mut map,
                "DroppedColumns",
                column_names.iter().map(|c| marshal_identifier(ctx, c)).collect(),
            );
        }
        AlterTableAction::AlterColumn { column } => {
            insert_string(&mut map, "AlterTableActionType", "Alter");
            map.insert(
                "ColumnDefinition".to_string(),
                marshal_column_definition(ctx, column),
            );
        }
    }
    finish(map)
}

pub(crate) fn marshal_drop_objects_statement(ctx: &mut MarshalContext, stmt: &DropObjectsStatement) -> Value {
    let mut map = node("DropObjectsStatement");
    insert_string(&mut map, "ObjectKind", drop_object_kind_str(stmt.object_kind));
    insert_bool(&mut map, "IsIfExists", stmt.if_exists);
    insert_array(
        &mut map,
        "Objects",
        stmt.objects
            .iter()
            .map(|o| marshal_schema_object_name(ctx, o))
            .collect(),
    );
    insert_string(&mut map, "DropBehavior", drop_behavior_str(stmt.drop_behavior));
    finish(map)
}
