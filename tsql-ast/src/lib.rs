//! # tsql-ast
//!
//! tsql-ast is the abstract syntax tree for the T-SQL parser: the closed set
//! of node types a batch of Transact-SQL parses into.

#![warn(missing_docs)]

mod cursor;
mod ddl;
mod dml;
mod expr;
mod ident;
mod misc;
mod procedural;
mod query;
mod security;
mod statement;
mod table;
mod transaction;

pub use self::{
    cursor::*, ddl::*, dml::*, expr::*, ident::*, misc::*, procedural::*, query::*, security::*,
    statement::*, table::*, transaction::*,
};
