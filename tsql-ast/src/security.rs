use std::rc::Rc;

use crate::ident::{Identifier, SchemaObjectName};

/// `GRANT`/`REVOKE`/`DENY` share this model: a permission list, an optional
/// `ON` target, and a principal list (spec §4.4).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permission {
    pub permission_name: String,
    pub columns: Vec<Rc<Identifier>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecurityObjectKind {
    NotSpecified,
    Object,
    Schema,
    ServerRole,
    ApplicationRole,
    AsymmetricKey,
    SymmetricKey,
    RemoteServiceBinding,
    FullTextCatalog,
    FullTextStoplist,
    MessageType,
    XmlSchemaCollection,
    SearchPropertyList,
    AvailabilityGroup,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecurityTargetObject {
    pub object_kind: SecurityObjectKind,
    pub object_name: SchemaObjectName,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrincipalType {
    Regular,
    Public,
    Null,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrincipalName {
    pub principal_type: PrincipalType,
    pub identifier: Option<Rc<Identifier>>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantStatement {
    pub permissions: Vec<Permission>,
    pub security_target_object: Option<SecurityTargetObject>,
    pub principals: Vec<PrincipalName>,
    pub with_grant_option: bool,
    pub as_principal: Option<PrincipalName>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RevokeStatement {
    pub permissions: Vec<Permission>,
    pub security_target_object: Option<SecurityTargetObject>,
    pub principals: Vec<PrincipalName>,
    pub cascade: bool,
    pub as_principal: Option<PrincipalName>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenyStatement {
    pub permissions: Vec<Permission>,
    pub security_target_object: Option<SecurityTargetObject>,
    pub principals: Vec<PrincipalName>,
    pub cascade: bool,
    pub as_principal: Option<PrincipalName>,
}
