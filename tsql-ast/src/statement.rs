use crate::cursor::{
    CloseCursorStatement, DeallocateCursorStatement, DeclareCursorStatement, FetchCursorStatement,
    OpenCursorStatement,
};
use crate::ddl::{
    AlterIndexStatement, AlterTableStatement, CreateDatabaseStatement, CreateFunctionStatement,
    CreateIndexStatement, CreateProcedureStatement, CreateSchemaStatement, CreateTableStatement,
    CreateTriggerStatement, CreateViewStatement, DropObjectsStatement,
};
use crate::dml::{
    BulkInsertStatement, DeleteStatement, InsertStatement, MergeStatement, SelectStatement,
    TruncateTableStatement, UpdateStatement,
};
use crate::misc::{
    BackupDatabaseStatement, CheckpointStatement, ExecuteStatement, KillStatement,
    ReconfigureStatement, RestoreStatement, ShutdownStatement, UnsupportedStatement,
    UseStatement, WaitForStatement,
};
use crate::procedural::{
    BeginEndBlockStatement, BreakStatement, ContinueStatement, DeclareVariableStatement,
    GoToStatement, IfStatement, LabelStatement, PrintStatement, ReturnStatement,
    SetVariableStatement, ThrowStatement, TryCatchStatement, WhileStatement,
};
use crate::security::{DenyStatement, GrantStatement, RevokeStatement};
use crate::transaction::{
    BeginTransactionStatement, CommitTransactionStatement, RollbackTransactionStatement,
    SaveTransactionStatement,
};

/// The closed sum of every statement form this crate models (spec §3). See
/// spec §12 for the coverage boundary and the role of
/// [`Statement::Unsupported`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Statement {
    Select(Box<SelectStatement>),
    Insert(Box<InsertStatement>),
    Update(Box<UpdateStatement>),
    Delete(Box<DeleteStatement>),
    Merge(Box<MergeStatement>),
    TruncateTable(Box<TruncateTableStatement>),
    BulkInsert(Box<BulkInsertStatement>),

    CreateTable(Box<CreateTableStatement>),
    CreateView(Box<CreateViewStatement>),
    CreateProcedure(Box<CreateProcedureStatement>),
    CreateFunction(Box<CreateFunctionStatement>),
    CreateTrigger(Box<CreateTriggerStatement>),
    CreateSchema(Box<CreateSchemaStatement>),
    CreateDatabase(Box<CreateDatabaseStatement>),
    CreateIndex(Box<CreateIndexStatement>),
    AlterTable(Box<AlterTableStatement>),
    AlterIndex(Box<AlterIndexStatement>),
    DropObjects(Box<DropObjectsStatement>),

    Grant(Box<GrantStatement>),
    Revoke(Box<RevokeStatement>),
    Deny(Box<DenyStatement>),

    DeclareVariable(Box<DeclareVariableStatement>),
    DeclareCursor(Box<DeclareCursorStatement>),
    SetVariable(Box<SetVariableStatement>),
    If(Box<IfStatement>),
    While(Box<WhileStatement>),
    BeginEndBlock(Box<BeginEndBlockStatement>),
    Return(Box<ReturnStatement>),
    Break(Box<BreakStatement>),
    Continue(Box<ContinueStatement>),
    Print(Box<PrintStatement>),
    Throw(Box<ThrowStatement>),
    TryCatch(Box<TryCatchStatement>),
    GoTo(Box<GoToStatement>),
    Label(Box<LabelStatement>),

    OpenCursor(Box<OpenCursorStatement>),
    CloseCursor(Box<CloseCursorStatement>),
    DeallocateCursor(Box<DeallocateCursorStatement>),
    FetchCursor(Box<FetchCursorStatement>),

    BeginTransaction(Box<BeginTransactionStatement>),
    CommitTransaction(Box<CommitTransactionStatement>),
    RollbackTransaction(Box<RollbackTransactionStatement>),
    SaveTransaction(Box<SaveTransactionStatement>),

    Use(Box<UseStatement>),
    Execute(Box<ExecuteStatement>),
    WaitFor(Box<WaitForStatement>),
    Kill(Box<KillStatement>),
    Checkpoint(Box<CheckpointStatement>),
    Reconfigure(Box<ReconfigureStatement>),
    Shutdown(Box<ShutdownStatement>),
    BackupDatabase(Box<BackupDatabaseStatement>),
    Restore(Box<RestoreStatement>),

    Unsupported(Box<UnsupportedStatement>),
}

pub type StatementList = Vec<Statement>;

/// A statement as parsed, paired with the error that triggered lenient
/// recovery, if any (spec §4.2, §7; resolved per SPEC_FULL.md §13 in favor
/// of surfacing the error rather than discarding it). `partial_error` is
/// never part of the marshalled JSON — only `statement` is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedStatement {
    pub statement: Statement,
    pub partial_error: Option<String>,
}

impl ParsedStatement {
    pub fn complete(statement: Statement) -> Self {
        ParsedStatement {
            statement,
            partial_error: None,
        }
    }

    pub fn partial(statement: Statement, error: impl Into<String>) -> Self {
        ParsedStatement {
            statement,
            partial_error: Some(error.into()),
        }
    }
}

/// A batch: a run of statements terminated by `GO` or end-of-input
/// (spec §3, §4.2).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Batch {
    pub statements: Vec<ParsedStatement>,
}

/// The root of the AST forest (spec §3): an ordered sequence of batches.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Script {
    pub batches: Vec<Batch>,
}
