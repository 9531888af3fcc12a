use tsql_ast::{
    BeginTransactionStatement, CommitTransactionStatement, RollbackTransactionStatement,
    SaveTransactionStatement, Statement,
};
use tsql_lexer::{Keyword, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// `BEGIN TRAN[SACTION] [name]` — `BEGIN`/`TRANSACTION`/`TRAN` have
    /// already been consumed by the dispatcher (spec §4.6).
    pub(crate) fn parse_begin_transaction_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_optional_transaction_name();
        Ok(Statement::BeginTransaction(Box::new(
            BeginTransactionStatement {
                name,
                distributed: false,
            },
        )))
    }

    pub(crate) fn parse_commit_transaction_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_optional_transaction_name();
        Ok(Statement::CommitTransaction(Box::new(
            CommitTransactionStatement { name },
        )))
    }

    pub(crate) fn parse_rollback_transaction_statement(
        &mut self,
    ) -> Result<Statement, ParserError> {
        let name = self.parse_optional_transaction_name();
        Ok(Statement::RollbackTransaction(Box::new(
            RollbackTransactionStatement { name },
        )))
    }

    pub(crate) fn parse_save_transaction_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_optional_transaction_name();
        Ok(Statement::SaveTransaction(Box::new(
            SaveTransactionStatement { name },
        )))
    }

    /// `COMMIT`/`ROLLBACK` may be followed by the bare ODBC-style `WORK`
    /// keyword, which is not a transaction name (spec §4.6).
    fn parse_optional_transaction_name(&mut self) -> Option<String> {
        if self.parse_keyword(Keyword::WORK) {
            return None;
        }
        match self.peek_token().map(|t| t.kind.clone()) {
            Some(TokenKind::Identifier) | Some(TokenKind::QuotedIdentifier(_)) => {
                self.parse_identifier().ok().map(|id| id.value.clone())
            }
            _ => None,
        }
    }
}
