use serde_json::Value;

use tsql_ast::{
    BeginEndBlockStatement, DeclareVariableStatement, GoToStatement, IfStatement, LabelStatement,
    PrintStatement, ReturnStatement, SetVariableStatement, ThrowStatement, TryCatchStatement,
    WhileStatement,
};

use crate::context::MarshalContext;
use crate::enums::assignment_operator_str;
use crate::expr::marshal_scalar_expression;
use crate::node::*;
use crate::statement::{marshal_statement, marshal_statement_list};

pub(crate) fn marshal_declare_variable_statement(
    ctx: &mut MarshalContext,
    stmt: &DeclareVariableStatement,
) -> Value {
    let mut map = node("DeclareVariableStatement");
    insert_array(
        &mut map,
        "Declarations",
        stmt.declarations
            .iter()
            .map(|d| {
                let mut m = node("DeclareVariableElement");
                insert_string(&mut m, "VariableName", d.variable_name.clone());
                m.insert("DataType".to_string(), crate::ddl::marshal_data_type(&d.data_type));
                insert_if_some(
                    &mut m,
                    "Value",
                    d.value.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
                );
                finish(m)
            })
            .collect(),
    );
    finish(map)
}

pub(crate) fn marshal_set_variable_statement(
    ctx: &mut MarshalContext,
    stmt: &SetVariableStatement,
) -> Value {
    let mut map = node("SetVariableStatement");
    insert_string(&mut map, "VariableName", stmt.variable_name.clone());
    insert_string(&mut map, "AssignmentKind", assignment_operator_str(stmt.op));
    map.insert(
        "Expression".to_string(),
        marshal_scalar_expression(ctx, &stmt.expression),
    );
    finish(map)
}

pub(crate) fn marshal_if_statement(ctx: &mut MarshalContext, stmt: &IfStatement) -> Value {
    let mut map = node("IfStatement");
    map.insert(
        "Predicate".to_string(),
        crate::expr::marshal_boolean_expression(ctx, &stmt.predicate),
    );
    map.insert(
        "ThenStatement".to_string(),
        marshal_statement(ctx, &stmt.then_statement),
    );
    insert_if_some(
        &mut map,
        "ElseStatement",
        stmt.else_statement
            .as_ref()
            .map(|s| marshal_statement(ctx, s)),
    );
    finish(map)
}

pub(crate) fn marshal_while_statement(ctx: &mut MarshalContext, stmt: &WhileStatement) -> Value {
    let mut map = node("WhileStatement");
    map.insert(
        "Predicate".to_string(),
        crate::expr::marshal_boolean_expression(ctx, &stmt.predicate),
    );
    map.insert("Statement".to_string(), marshal_statement(ctx, &stmt.statement));
    finish(map)
}

pub(crate) fn marshal_begin_end_block_statement(
    ctx: &mut MarshalContext,
    stmt: &BeginEndBlockStatement,
) -> Value {
    let mut map = node("BeginEndBlockStatement");
    insert_array(
        &mut map,
        "StatementList",
        marshal_statement_list(ctx, &stmt.statement_list),
    );
    finish(map)
}

pub(crate) fn marshal_return_statement(ctx: &mut MarshalContext, stmt: &ReturnStatement) -> Value {
    let mut map = node("ReturnStatement");
    insert_if_some(
        &mut map,
        "Expression",
        stmt.expression.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    finish(map)
}

pub(crate) fn marshal_print_statement(ctx: &mut MarshalContext, stmt: &PrintStatement) -> Value {
    let mut map = node("PrintStatement");
    map.insert(
        "Expression".to_string(),
        marshal_scalar_expression(ctx, &stmt.expression),
    );
    finish(map)
}

pub(crate) fn marshal_throw_statement(ctx: &mut MarshalContext, stmt: &ThrowStatement) -> Value {
    let mut map = node("ThrowStatement");
    insert_if_some(
        &mut map,
        "ErrorNumber",
        stmt.error_number.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_if_some(
        &mut map,
        "Message",
        stmt.message.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    insert_if_some(
        &mut map,
        "State",
        stmt.state.as_ref().map(|e| marshal_scalar_expression(ctx, e)),
    );
    finish(map)
}

pub(crate) fn marshal_try_catch_statement(ctx: &mut MarshalContext, stmt: &TryCatchStatement) -> Value {
    let mut map = node("TryCatchStatement");
    insert_array(
        &mut map,
        "TryStatements",
        marshal_statement_list(ctx, &stmt.try_statements),
    );
    insert_array(
        &mut map,
        "CatchStatements",
        marshal_statement_list(ctx, &stmt.catch_statements),
    );
    finish(map)
}

pub(crate) fn marshal_goto_statement(stmt: &GoToStatement) -> Value {
    let mut map = node("GoToStatement");
    insert_string(&mut map, "LabelName", stmt.label_name.clone());
    finish(map)
}

pub(crate) fn marshal_label_statement(stmt: &LabelStatement) -> Value {
    let mut map = node("LabelStatement");
    insert_string(&mut map, "LabelName", stmt.label_name.clone());
    finish(map)
}
