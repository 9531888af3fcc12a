use serde_json::Value;

use tsql_ast::{ParsedStatement, Statement, StatementList};

use crate::context::MarshalContext;
use crate::error::internal_invariant;

/// Marshals one [`Statement`], dispatching over every closed variant (spec
/// §4.5's "total function" contract). There is no bare default arm: a
/// future variant added to the enum without a matching arm here fails to
/// compile, and the only runtime escape hatch is
/// [`crate::error::internal_invariant`], reserved for cases that genuine
/// exhaustiveness checking should have already ruled out.
pub(crate) fn marshal_statement(ctx: &mut MarshalContext, statement: &Statement) -> Value {
    match statement {
        Statement::Select(s) => crate::dml::marshal_select_statement(ctx, s),
        Statement::Insert(s) => crate::dml::marshal_insert_statement(ctx, s),
        Statement::Update(s) => crate::dml::marshal_update_statement(ctx, s),
        Statement::Delete(s) => crate::dml::marshal_delete_statement(ctx, s),
        Statement::Merge(s) => crate::dml::marshal_merge_statement(ctx, s),
        Statement::TruncateTable(s) => crate::dml::marshal_truncate_table_statement(ctx, s),
        Statement::BulkInsert(s) => crate::dml::marshal_bulk_insert_statement(ctx, s),

        Statement::CreateTable(s) => crate::ddl::marshal_create_table_statement(ctx, s),
        Statement::CreateView(s) => crate::ddl::marshal_create_view_statement(ctx, s),
        Statement::CreateProcedure(s) => crate::ddl::marshal_create_procedure_statement(ctx, s),
        Statement::CreateFunction(s) => crate::ddl::marshal_create_function_statement(ctx, s),
        Statement::CreateTrigger(s) => crate::ddl::marshal_create_trigger_statement(ctx, s),
        Statement::CreateSchema(s) => crate::ddl::marshal_create_schema_statement(ctx, s),
        Statement::CreateDatabase(s) => crate::ddl::marshal_create_database_statement(ctx, s),
        Statement::CreateIndex(s) => crate::ddl::marshal_create_index_statement(ctx, s),
        Statement::AlterTable(s) => crate::ddl::marshal_alter_table_statement(ctx, s),
        Statement::AlterIndex(s) => crate::ddl::marshal_alter_index_statement(ctx, s),
        Statement::DropObjects(s) => crate::ddl::marshal_drop_objects_statement(ctx, s),

        Statement::Grant(s) => crate::security::marshal_grant_statement(ctx, s),
        Statement::Revoke(s) => crate::security::marshal_revoke_statement(ctx, s),
        Statement::Deny(s) => crate::security::marshal_deny_statement(ctx, s),

        Statement::DeclareVariable(s) => crate::procedural::marshal_declare_variable_statement(ctx, s),
        Statement::DeclareCursor(s) => crate::cursor::marshal_declare_cursor_statement(ctx, s),
        Statement::SetVariable(s) => crate::procedural::marshal_set_variable_statement(ctx, s),
        Statement::If(s) => crate::procedural::marshal_if_statement(ctx, s),
        Statement::While(s) => crate::procedural::marshal_while_statement(ctx, s),
        Statement::BeginEndBlock(s) => crate::procedural::marshal_begin_end_block_statement(ctx, s),
        Statement::Return(s) => crate::procedural::marshal_return_statement(ctx, s),
        Statement::Break(_) => crate::node::finish(crate::node::node("BreakStatement")),
        Statement::Continue(_) => crate::node::finish(crate::node::node("ContinueStatement")),
        Statement::Print(s) => crate::procedural::marshal_print_statement(ctx, s),
        Statement::Throw(s) => crate::procedural::marshal_throw_statement(ctx, s),
        Statement::TryCatch(s) => crate::procedural::marshal_try_catch_statement(ctx, s),
        Statement::GoTo(s) => crate::procedural::marshal_goto_statement(s),
        Statement::Label(s) => crate::procedural::marshal_label_statement(s),

        Statement::OpenCursor(s) => crate::cursor::marshal_open_cursor_statement(s),
        Statement::CloseCursor(s) => crate::cursor::marshal_close_cursor_statement(s),
        Statement::DeallocateCursor(s) => crate::cursor::marshal_deallocate_cursor_statement(s),
        Statement::FetchCursor(s) => crate::cursor::marshal_fetch_cursor_statement(s),

        Statement::BeginTransaction(s) => crate::transaction::marshal_begin_transaction_statement(s),
        Statement::CommitTransaction(s) => crate::transaction::marshal_commit_transaction_statement(s),
        Statement::RollbackTransaction(s) => {
            crate::transaction::marshal_rollback_transaction_statement(s)
        }
        Statement::SaveTransaction(s) => crate::transaction::marshal_save_transaction_statement(s),

        Statement::Use(s) => crate::misc::marshal_use_statement(s),
        Statement::Execute(s) => crate::misc::marshal_execute_statement(ctx, s),
        Statement::WaitFor(s) => crate::misc::marshal_waitfor_statement(ctx, s),
        Statement::Kill(s) => crate::misc::marshal_kill_statement(ctx, s),
        Statement::Checkpoint(s) => crate::misc::marshal_checkpoint_statement(ctx, s),
        Statement::Reconfigure(s) => crate::misc::marshal_reconfigure_statement(s),
        Statement::Shutdown(s) => crate::misc::marshal_shutdown_statement(s),
        Statement::BackupDatabase(s) => crate::misc::marshal_backup_database_statement(s),
        Statement::Restore(s) => crate::misc::marshal_restore_statement(s),

        Statement::Unsupported(s) => crate::misc::marshal_unsupported_statement(s),

        #[allow(unreachable_patterns)]
        _ => internal_invariant("unrecognized Statement variant"),
    }
}

pub(crate) fn marshal_statement_list(ctx: &mut MarshalContext, list: &StatementList) -> Vec<Value> {
    list.iter().map(|s| marshal_statement(ctx, s)).collect()
}

/// As [`marshal_statement_list`], but for a batch's top-level
/// `Vec<ParsedStatement>` (spec §4.2's lenient-recovery wrapper):
/// `partial_error` never reaches the emitted JSON (spec §13).
pub(crate) fn marshal_parsed_statement_list(
    ctx: &mut MarshalContext,
    list: &[ParsedStatement],
) -> Vec<Value> {
    list.iter().map(|s| marshal_statement(ctx, &s.statement)).collect()
}
