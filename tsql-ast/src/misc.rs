use crate::expr::ScalarExpression;
use crate::ident::SchemaObjectName;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseStatement {
    pub database_name: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteParameter {
    pub variable_name: Option<String>,
    pub value: ScalarExpression,
    pub is_output: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteStatement {
    pub return_status_variable: Option<String>,
    pub procedure_name: SchemaObjectName,
    pub parameters: Vec<ExecuteParameter>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitForOption {
    Delay(ScalarExpression),
    Time(ScalarExpression),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitForStatement {
    pub option: WaitForOption,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KillStatement {
    pub session_id: ScalarExpression,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckpointStatement {
    pub duration: Option<ScalarExpression>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconfigureStatement {
    pub with_override: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShutdownStatement {
    pub with_no_wait: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackupDatabaseStatement {
    pub database_name: String,
    pub devices: Vec<String>,
    pub options: Vec<crate::ddl::TableOption>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoreStatement {
    pub database_name: String,
    pub devices: Vec<String>,
    pub options: Vec<crate::ddl::TableOption>,
}

/// A statement whose leading keyword(s) this crate recognizes but whose full
/// grammar it does not model to the depth spec §4.4 demands (spec §12): the
/// dispatcher still recognizes it by keyword, still runs
/// `skip_to_end_of_statement` lenient recovery so nothing already scanned is
/// lost, and the marshaller still has a dedicated, exhaustively-handled arm
/// for it — this is not the `InternalInvariant` catch-all (spec §7), which is
/// reserved for a truly unrecognized `enum` discriminant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnsupportedStatement {
    pub leading_keywords: Vec<String>,
    pub raw_text: String,
}
