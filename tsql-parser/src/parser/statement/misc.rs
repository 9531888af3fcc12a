use tsql_ast::{
    BackupDatabaseStatement, CheckpointStatement, ExecuteParameter, ExecuteStatement,
    KillStatement, ReconfigureStatement, RestoreStatement, ShutdownStatement, Statement,
    TableOption, UseStatement, WaitForOption, WaitForStatement,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    pub(crate) fn parse_use_statement(&mut self) -> Result<Statement, ParserError> {
        let database_name = self.parse_identifier()?.value.clone();
        Ok(Statement::Use(Box::new(UseStatement { database_name })))
    }

    pub(crate) fn parse_execute_statement(&mut self) -> Result<Statement, ParserError> {
        let statement = self.parse_execute_statement_body()?;
        Ok(Statement::Execute(Box::new(statement)))
    }

    /// Shared by the top-level `EXEC`/`EXECUTE` statement and
    /// `INSERT ... EXEC` (spec §4.3, §4.4).
    pub(crate) fn parse_execute_statement_body(&mut self) -> Result<ExecuteStatement, ParserError> {
        let return_status_variable = self.parse_variable_assignment_prefix();
        let procedure_name = self.parse_schema_object_name()?;
        let parameters = self.parse_execute_parameters()?;
        Ok(ExecuteStatement {
            return_status_variable,
            procedure_name,
            parameters,
        })
    }

    fn parse_execute_parameters(&mut self) -> Result<Vec<ExecuteParameter>, ParserError> {
        if self.at_batch_boundary() {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(Parser::parse_execute_parameter)
    }

    fn parse_execute_parameter(&mut self) -> Result<ExecuteParameter, ParserError> {
        let variable_name = self.parse_variable_assignment_prefix();
        let value = self.parse_scalar_expression()?;
        let is_output = self.parse_keyword(Keyword::OUTPUT) || self.parse_word_ci("OUT");
        Ok(ExecuteParameter {
            variable_name,
            value,
            is_output,
        })
    }

    /// Consumes a leading `@name =` pair if present, returning the variable
    /// name; used for both the `EXEC`/`EXECUTE` return-status variable and
    /// named parameter passing (spec §4.4).
    fn parse_variable_assignment_prefix(&mut self) -> Option<String> {
        if !self.peek_token().map(|t| t.kind == TokenKind::Variable).unwrap_or(false) {
            return None;
        }
        self.peek_next_token();
        let next_is_equal = self
            .peek_next_token()
            .map(|t| t.kind == TokenKind::Equal)
            .unwrap_or(false);
        self.reset_peek_cursor();
        if !next_is_equal {
            return None;
        }
        let name = self.next_token().unwrap().text;
        self.next_token();
        Some(name)
    }

    pub(crate) fn parse_waitfor_statement(&mut self) -> Result<Statement, ParserError> {
        let option = if self.parse_keyword(Keyword::DELAY) {
            WaitForOption::Delay(self.parse_scalar_expression()?)
        } else {
            self.expect_keyword(Keyword::TIME)?;
            WaitForOption::Time(self.parse_scalar_expression()?)
        };
        Ok(Statement::WaitFor(Box::new(WaitForStatement { option })))
    }

    pub(crate) fn parse_kill_statement(&mut self) -> Result<Statement, ParserError> {
        let session_id = self.parse_scalar_expression()?;
        Ok(Statement::Kill(Box::new(KillStatement { session_id })))
    }

    pub(crate) fn parse_checkpoint_statement(&mut self) -> Result<Statement, ParserError> {
        let duration = if self.at_batch_boundary() {
            None
        } else {
            Some(self.parse_scalar_expression()?)
        };
        Ok(Statement::Checkpoint(Box::new(CheckpointStatement {
            duration,
        })))
    }

    pub(crate) fn parse_reconfigure_statement(&mut self) -> Result<Statement, ParserError> {
        let with_override = if self.parse_keyword(Keyword::WITH) {
            self.expect_word_ci("OVERRIDE")?;
            true
        } else {
            false
        };
        Ok(Statement::Reconfigure(Box::new(ReconfigureStatement {
            with_override,
        })))
    }

    pub(crate) fn parse_shutdown_statement(&mut self) -> Result<Statement, ParserError> {
        let with_no_wait = if self.parse_keyword(Keyword::WITH) {
            self.expect_word_ci("NOWAIT")?;
            true
        } else {
            false
        };
        Ok(Statement::Shutdown(Box::new(ShutdownStatement {
            with_no_wait,
        })))
    }

    pub(crate) fn parse_backup_database_statement(&mut self) -> Result<Statement, ParserError> {
        let database_name = self.parse_identifier()?.value.clone();
        self.expect_keyword(Keyword::TO)?;
        let devices = self.parse_comma_separated(Parser::parse_backup_device)?;
        let options = self.parse_bare_with_options()?;
        Ok(Statement::BackupDatabase(Box::new(BackupDatabaseStatement {
            database_name,
            devices,
            options,
        })))
    }

    pub(crate) fn parse_restore_statement(&mut self) -> Result<Statement, ParserError> {
        let database_name = self.parse_identifier()?.value.clone();
        let devices = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_backup_device)?
        } else {
            Vec::new()
        };
        let options = self.parse_bare_with_options()?;
        Ok(Statement::Restore(Box::new(RestoreStatement {
            database_name,
            devices,
            options,
        })))
    }

    /// `DISK = 'path'` / `TAPE = 'path'` / a bare quoted path (spec §4.4);
    /// the AST does not distinguish device kind, only the path.
    fn parse_backup_device(&mut self) -> Result<String, ParserError> {
        self.parse_word_ci("DISK");
        self.parse_word_ci("TAPE");
        self.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0));
        match self.next_token() {
            Some(t) => Ok(crate::parser::expression::strip_quotes(&t.text)),
            None => self.expected("a backup device path", None::<&str>),
        }
    }

    /// `WITH opt [, opt ...]` where each option is `NAME [= value]`, not
    /// wrapped in parentheses — distinct from
    /// [`Parser::parse_paren_options`], which is used by the DDL statements
    /// that do parenthesize their option lists (spec §4.4).
    fn parse_bare_with_options(&mut self) -> Result<Vec<TableOption>, ParserError> {
        if !self.parse_keyword(Keyword::WITH) {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(|p| {
            let name_token = match p.next_token() {
                Some(t) if !t.is_eof() => t,
                _ => return p.expected("an option name", None::<&str>),
            };
            let value = if p.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0)) {
                match p.next_token() {
                    Some(t) => Some(t.text),
                    None => return p.expected("an option value", None::<&str>),
                }
            } else {
                None
            };
            Ok(TableOption {
                name: name_token.text,
                value,
            })
        })
    }
}
