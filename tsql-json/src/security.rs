use serde_json::Value;

use tsql_ast::{DenyStatement, GrantStatement, Permission, PrincipalName, RevokeStatement, SecurityTargetObject};

use crate::context::MarshalContext;
use crate::enums::*;
use crate::ident::{marshal_identifier, marshal_schema_object_name};
use crate::node::*;

fn marshal_permission(ctx: &mut MarshalContext, permission: &Permission) -> Value {
    let mut map = node("Permission");
    insert_string(&mut map, "PermissionName", permission.permission_name.clone());
    insert_array_if_nonempty(
        &mut map,
        "Columns",
        permission
            .columns
            .iter()
            .map(|c| marshal_identifier(ctx, c))
            .collect(),
    );
    finish(map)
}

fn marshal_security_target_object(
    ctx: &mut MarshalContext,
    target: &SecurityTargetObject,
) -> Value {
    let mut map = node("SecurityTargetObject");
    insert_string(&mut map, "ObjectKind", security_object_kind_str(target.object_kind));
    map.insert(
        "ObjectName".to_string(),
        marshal_schema_object_name(ctx, &target.object_name),
    );
    finish(map)
}

fn marshal_principal_name(ctx: &mut MarshalContext, principal: &PrincipalName) -> Value {
    let mut map = node("PrincipalName");
    insert_string(&mut map, "PrincipalType", principal_type_str(principal.principal_type));
    insert_if_some(
        &mut map,
        "Identifier",
        principal.identifier.as_ref().map(|id| marshal_identifier(ctx, id)),
    );
    finish(map)
}

pub(crate) fn marshal_grant_statement(ctx: &mut MarshalContext, stmt: &GrantStatement) -> Value {
    let mut map = node("GrantStatement");
    insert_array(
        &mut map,
        "Permissions",
        stmt.permissions
            .iter()
            .map(|p| marshal_permission(ctx, p))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "SecurityTargetObject",
        stmt.security_target_object
            .as_ref()
            .map(|t| marshal_security_target_object(ctx, t)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Principals",
        stmt.principals
            .iter()
            .map(|p| marshal_principal_name(ctx, p))
            .collect(),
    );
    insert_bool(&mut map, "WithGrantOption", stmt.with_grant_option);
    insert_if_some(
        &mut map,
        "AsClause",
        stmt.as_principal.as_ref().map(|p| marshal_principal_name(ctx, p)),
    );
    finish(map)
}

pub(crate) fn marshal_revoke_statement(ctx: &mut MarshalContext, stmt: &RevokeStatement) -> Value {
    let mut map = node("RevokeStatement");
    insert_array(
        &mut map,
        "Permissions",
        stmt.permissions
            .iter()
            .map(|p| marshal_permission(ctx, p))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "SecurityTargetObject",
        stmt.security_target_object
            .as_ref()
            .map(|t| marshal_security_target_object(ctx, t)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Principals",
        stmt.principals
            .iter()
            .map(|p| marshal_principal_name(ctx, p))
            .collect(),
    );
    insert_bool(&mut map, "Cascade", stmt.cascade);
    insert_if_some(
        &mut map,
        "AsClause",
        stmt.as_principal.as_ref().map(|p| marshal_principal_name(ctx, p)),
    );
    finish(map)
}

pub(crate) fn marshal_deny_statement(ctx: &mut MarshalContext, stmt: &DenyStatement) -> Value {
    let mut map = node("DenyStatement");
    insert_array(
        &mut map,
        "Permissions",
        stmt.permissions
            .iter()
            .map(|p| marshal_permission(ctx, p))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "SecurityTargetObject",
        stmt.security_target_object
            .as_ref()
            .map(|t| marshal_security_target_object(ctx, t)),
    );
    insert_array_if_nonempty(
        &mut map,
        "Principals",
        stmt.principals
            .iter()
            .map(|p| marshal_principal_name(ctx, p))
            .collect(),
    );
    insert_bool(&mut map, "Cascade", stmt.cascade);
    insert_if_some(
        &mut map,
        "AsClause",
        stmt.as_principal.as_ref().map(|p| marshal_principal_name(ctx, p)),
    );
    finish(map)
}
