use serde_json::Value;

use tsql_ast::{
    BeginTransactionStatement, CommitTransactionStatement, RollbackTransactionStatement,
    SaveTransactionStatement,
};

use crate::node::*;

pub(crate) fn marshal_begin_transaction_statement(stmt: &BeginTransactionStatement) -> Value {
    let mut map = node("BeginTransactionStatement");
    insert_if_some(&mut map, "Name", stmt.name.clone().map(Value::String));
    insert_bool(&mut map, "Distributed", stmt.distributed);
    finish(map)
}

pub(crate) fn marshal_commit_transaction_statement(stmt: &CommitTransactionStatement) -> Value {
    let mut map = node("CommitTransactionStatement");
    insert_if_some(&mut map, "Name", stmt.name.clone().map(Value::String));
    finish(map)
}

pub(crate) fn marshal_rollback_transaction_statement(stmt: &RollbackTransactionStatement) -> Value {
    let mut map = node("RollbackTransactionStatement");
    insert_if_some(&mut map, "Name", stmt.name.clone().map(Value::String));
    finish(map)
}

pub(crate) fn marshal_save_transaction_statement(stmt: &SaveTransactionStatement) -> Value {
    let mut map = node("SaveTransactionStatement");
    insert_if_some(&mut map, "Name", stmt.name.clone().map(Value::String));
    finish(map)
}
