use serde_json::Value;

use tsql_ast::{
    CloseCursorStatement, DeallocateCursorStatement, DeclareCursorStatement, FetchCursorStatement,
    OpenCursorStatement,
};

use crate::context::MarshalContext;
use crate::enums::{cursor_option_str, fetch_orientation_str};
use crate::node::*;
use crate::query::marshal_query_expression;

pub(crate) fn marshal_declare_cursor_statement(
    ctx: &mut MarshalContext,
    stmt: &DeclareCursorStatement,
) -> Value {
    let mut map = node("DeclareCursorStatement");
    insert_string(&mut map, "Name", stmt.cursor_name.clone());
    insert_array_if_nonempty(
        &mut map,
        "CursorOptions",
        stmt.options
            .iter()
            .map(|o| Value::String(cursor_option_str(*o).to_string()))
            .collect(),
    );
    map.insert(
        "CursorDefinition".to_string(),
        marshal_query_expression(ctx, &stmt.select),
    );
    finish(map)
}

pub(crate) fn marshal_open_cursor_statement(stmt: &OpenCursorStatement) -> Value {
    let mut map = node("OpenCursorStatement");
    insert_string(&mut map, "Cursor", stmt.cursor_name.clone());
    finish(map)
}

pub(crate) fn marshal_close_cursor_statement(stmt: &CloseCursorStatement) -> Value {
    let mut map = node("CloseCursorStatement");
    insert_string(&mut map, "Cursor", stmt.cursor_name.clone());
    finish(map)
}

pub(crate) fn marshal_deallocate_cursor_statement(stmt: &DeallocateCursorStatement) -> Value {
    let mut map = node("DeallocateCursorStatement");
    insert_string(&mut map, "Cursor", stmt.cursor_name.clone());
    finish(map)
}

pub(crate) fn marshal_fetch_cursor_statement(stmt: &FetchCursorStatement) -> Value {
    let mut map = node("FetchCursorStatement");
    insert_string(&mut map, "FetchType", fetch_orientation_str(stmt.orientation));
    insert_string(&mut map, "Cursor", stmt.cursor_name.clone());
    insert_array_if_nonempty(
        &mut map,
        "IntoVariables",
        stmt.into_variables
            .iter()
            .map(|v| Value::String(v.clone()))
            .collect(),
    );
    finish(map)
}
