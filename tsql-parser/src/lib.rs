//! # tsql-parser
//!
//! tsql-parser is a recursive-descent parser that converts a sequence of
//! T-SQL tokens into the [`tsql_ast`] abstract syntax tree.

#![warn(missing_docs)]

mod error;
mod parser;
mod peek;

pub use self::{error::ParserError, parser::Parser, peek::{multipeek, MultiPeek, PeekIteratorExt}};
