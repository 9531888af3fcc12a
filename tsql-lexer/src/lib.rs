//! # tsql-lexer
//!
//! Token model and lexer for Microsoft T-SQL (spec §3, §4.1).

#![warn(missing_docs)]
#![allow(clippy::result_large_err)]

mod error;
mod keyword;
mod lexer;
mod token;

pub use self::{
    error::{LexerError, Location},
    keyword::Keyword,
    lexer::Lexer,
    token::{QuoteKind, Token, TokenKind},
};
