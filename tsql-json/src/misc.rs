use serde_json::Value;

use tsql_ast::{
    BackupDatabaseStatement, CheckpointStatement, ExecuteParameter, ExecuteStatement,
    KillStatement, ReconfigureStatement, RestoreStatement, ShutdownStatement,
    UnsupportedStatement, UseStatement, WaitForOption, WaitForStatement,
};

use crate::context::MarshalContext;
use crate::ddl::marshal_table_option;
use crate::expr::marshal_scalar_expression;
use crate::ident::marshal_schema_object_name;
use crate::node::*;

pub(crate) fn marshal_use_statement(stmt: &UseStatement) -> Value {
    let mut map = node("UseStatement");
    insert_string(&mut map, "DatabaseName", stmt.database_name.clone());
    finish(map)
}

fn marshal_execute_parameter(ctx: &mut MarshalContext, param: &ExecuteParameter) -> Value {
    let mut map = node("ExecuteParameter");
    insert_if_some(
        &mut map,
        "Variable",
        param.variable_name.clone().map(Value::String),
    );
    map.insert(
        "ParameterValue".to_string(),
        marshal_scalar_expression(ctx, &param.value),
    );
    insert_bool(&mut map, "IsOutput", param.is_output);
    finish(map)
}

/// Shared by the top-level `EXEC`/`EXECUTE` statement and `INSERT ...
/// EXEC` (spec §4.4's `InsertSource::Execute`).
pub(crate) fn marshal_execute_statement(ctx: &mut MarshalContext, stmt: &ExecuteStatement) -> Value {
    let mut map = node("ExecuteStatement");
    insert_if_some(
        &mut map,
        "ReturnStatus",
        stmt.return_status_variable.clone().map(Value::String),
    );
    map.insert(
        "ProcedureName".to_string(),
        marshal_schema_object_name(ctx, &stmt.procedure_name),
    );
    insert_array_if_nonempty(
        &mut map,
        "Parameters",
        stmt.parameters
            .iter()
            .map(|p| marshal_execute_parameter(ctx, p))
            .collect(),
    );
    finish(map)
}

pub(crate) fn marshal_waitfor_statement(ctx: &mut MarshalContext, stmt: &WaitForStatement) -> Value {
    let mut map = node("WaitForStatement");
    let (kind, expr) = match &stmt.option {
        WaitForOption::Delay(e) => ("Delay", e),
        WaitForOption::Time(e) => ("Time", e),
    };
    insert_string(&mut map, "WaitForOptionKind", kind);
    map.insert("Parameter".to_string(), marshal_scalar_expression(ctx, expr));
    finish(map)
}

pub(crate) fn marshal_kill_statement(ctx: &mut MarshalContext, stmt: &KillStatement) -> Value {
    let mut map = node("KillStatement");
    map.insert(
        "SessionId".to_string(),
        marshal_scalar_expression(ctx, &stmt.session_id),
    );
    finish(map)
}

pub(crate) fn marshal_checkpoint_statement(ctx: &mut MarshalContext, stmt: &CheckpointStatement) -> Value {
    let mut map = node("CheckpointStatement");
    insert_if_some(
        &mut map,
        "Duration",
        stmt.duration.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    finish(map)
}

pub(crate) fn marshal_reconfigure_statement(stmt: &ReconfigureStatement) -> Value {
    let mut map = node("ReconfigureStatement");
    insert_bool(&mut map, "WithOverride", stmt.with_override);
    finish(map)
}

pub(crate) fn marshal_shutdown_statement(stmt: &ShutdownStatement) -> Value {
    let mut map = node("ShutdownStatement");
    insert_bool(&mut map, "WithNoWait", stmt.with_no_wait);
    finish(map)
}

pub(crate) fn marshal_backup_database_statement(stmt: &BackupDatabaseStatement) -> Value {
    let mut map = node("BackupDatabaseStatement");
    insert_string(&mut map, "DatabaseName", stmt.database_name.clone());
    insert_array(
        &mut map,
        "Devices",
        stmt.devices.iter().map(|d| Value::String(d.clone())).collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_table_option).collect(),
    );
    finish(map)
}

pub(crate) fn marshal_restore_statement(stmt: &RestoreStatement) -> Value {
    let mut map = node("RestoreStatement");
    insert_string(&mut map, "DatabaseName", stmt.database_name.clone());
    insert_array(
        &mut map,
        "Devices",
        stmt.devices.iter().map(|d| Value::String(d.clone())).collect(),
    );
    insert_array_if_nonempty(
        &mut map,
        "Options",
        stmt.options.iter().map(marshal_table_option).collect(),
    );
    finish(map)
}

/// The marshaller arm for `Statement::Unsupported` (spec §12): always
/// present, always exhaustively handled, distinct from the
/// [`crate::error::internal_invariant`] panic path.
pub(crate) fn marshal_unsupported_statement(stmt: &UnsupportedStatement) -> Value {
    let mut map = node("UnsupportedStatement");
    insert_array(
        &mut map,
        "LeadingKeywords",
        stmt.leading_keywords
            .iter()
            .map(|k| Value::String(k.clone()))
            .collect(),
    );
    insert_string(&mut map, "RawText", stmt.raw_text.clone());
    finish(map)
}
