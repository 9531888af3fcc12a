mod cursor;
mod ddl;
mod dml;
mod misc;
mod procedural;
mod security;
mod transaction;

use tsql_ast::{
    Batch, DataType, ParsedStatement, Script, Statement, UnsupportedStatement,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// Lexes and parses `sql` into a whole script: a sequence of batches
    /// split on `GO` (spec §3, §4.2).
    pub fn parse_script(sql: &str) -> Result<Script, ParserError> {
        let mut parser = Parser::new_with_sql(sql)?;
        parser.parse_script_body()
    }

    fn parse_script_body(&mut self) -> Result<Script, ParserError> {
        let mut batches = Vec::new();
        let mut current = Batch::default();
        loop {
            while self.next_token_if_is(&Token::new(TokenKind::Semicolon, ";", 0, 0)) {}
            if self.is_eof() {
                break;
            }
            if self.parse_word_ci("GO") {
                batches.push(std::mem::take(&mut current));
                continue;
            }
            current.statements.push(self.parse_one_statement());
        }
        if !current.statements.is_empty() {
            batches.push(current);
        }
        Ok(Script { batches })
    }

    /// Parses one statement with lenient recovery: a parse failure is
    /// captured as `ParsedStatement::partial` rather than aborting the
    /// batch, and the token stream is fast-forwarded past the damage (spec
    /// §4.2, §7).
    fn parse_one_statement(&mut self) -> ParsedStatement {
        let start_tokens = self.collect_leading_keywords();
        match self.parse_statement_dispatch() {
            Ok(statement) => ParsedStatement::complete(statement),
            Err(err) => {
                self.skip_to_end_of_statement();
                let statement = Statement::Unsupported(Box::new(UnsupportedStatement {
                    leading_keywords: start_tokens,
                    raw_text: err.to_string(),
                }));
                ParsedStatement::partial(statement, err.to_string())
            }
        }
    }

    fn collect_leading_keywords(&mut self) -> Vec<String> {
        self.peek_token().map(|t| vec![t.text.clone()]).unwrap_or_default()
    }

    fn parse_statement_dispatch(&mut self) -> Result<Statement, ParserError> {
        if self.parse_keyword(Keyword::WITH) {
            let with_ctes = self.parse_comma_separated(Parser::parse_common_table_expression)?;
            self.expect_keyword(Keyword::SELECT)?;
            return self.parse_select_statement_body_with_ctes(with_ctes);
        }
        if self.parse_keyword(Keyword::SELECT) {
            return self.parse_select_statement_body();
        }
        if self.parse_keyword(Keyword::INSERT) {
            return self.parse_insert_statement();
        }
        if self.parse_keyword(Keyword::UPDATE) {
            return self.parse_update_statement();
        }
        if self.parse_keyword(Keyword::DELETE) {
            return self.parse_delete_statement();
        }
        if self.parse_keyword(Keyword::MERGE) {
            return self.parse_merge_statement();
        }
        if self.parse_keyword(Keyword::TRUNCATE) {
            self.expect_keyword(Keyword::TABLE)?;
            return self.parse_truncate_table_statement();
        }
        if self.parse_keyword(Keyword::BULK) {
            self.expect_word_ci("INSERT")?;
            return self.parse_bulk_insert_statement();
        }
        if self.parse_keyword(Keyword::CREATE) {
            return self.parse_create_statement();
        }
        if self.parse_keyword(Keyword::ALTER) {
            return self.parse_alter_statement();
        }
        if self.parse_keyword(Keyword::DROP) {
            return self.parse_drop_statement();
        }
        if self.parse_keyword(Keyword::GRANT) {
            return self.parse_grant_statement();
        }
        if self.parse_keyword(Keyword::REVOKE) {
            return self.parse_revoke_statement();
        }
        if self.parse_keyword(Keyword::DENY) {
            return self.parse_deny_statement();
        }
        if self.parse_keyword(Keyword::DECLARE) {
            return self.parse_declare_statement();
        }
        if self.parse_keyword(Keyword::SET) {
            return self.parse_set_variable_statement();
        }
        if self.parse_keyword(Keyword::IF) {
            return self.parse_if_statement();
        }
        if self.parse_keyword(Keyword::WHILE) {
            return self.parse_while_statement();
        }
        if self.parse_keywords(&[Keyword::BEGIN, Keyword::TRANSACTION])
            || self.parse_keywords(&[Keyword::BEGIN, Keyword::TRAN])
        {
            return self.parse_begin_transaction_statement();
        }
        if self.parse_keywords(&[Keyword::BEGIN, Keyword::TRY]) {
            return self.parse_try_catch_statement();
        }
        if self.parse_keyword(Keyword::BEGIN) {
            return self.parse_begin_statement();
        }
        if self.parse_keyword(Keyword::RETURN) {
            return self.parse_return_statement();
        }
        if self.parse_keyword(Keyword::BREAK) {
            return Ok(Statement::Break(Box::new(tsql_ast::BreakStatement)));
        }
        if self.parse_keyword(Keyword::CONTINUE) {
            return Ok(Statement::Continue(Box::new(tsql_ast::ContinueStatement)));
        }
        if self.parse_keyword(Keyword::PRINT) {
            return self.parse_print_statement();
        }
        if self.parse_keyword(Keyword::THROW) {
            return self.parse_throw_statement();
        }
        if self.parse_keyword(Keyword::TRY) {
            return self.parse_try_catch_statement();
        }
        if self.parse_keyword(Keyword::GOTO) {
            return self.parse_goto_statement();
        }
        if self.parse_keyword(Keyword::OPEN) {
            return self.parse_open_cursor_statement();
        }
        if self.parse_keyword(Keyword::CLOSE) {
            return self.parse_close_cursor_statement();
        }
        if self.parse_keyword(Keyword::DEALLOCATE) {
            return self.parse_deallocate_cursor_statement();
        }
        if self.parse_keyword(Keyword::FETCH) {
            return self.parse_fetch_cursor_statement();
        }
        if self.parse_keywords(&[Keyword::COMMIT, Keyword::TRANSACTION])
            || self.parse_keywords(&[Keyword::COMMIT, Keyword::TRAN])
            || self.parse_keyword(Keyword::COMMIT)
        {
            return self.parse_commit_transaction_statement();
        }
        if self.parse_keywords(&[Keyword::ROLLBACK, Keyword::TRANSACTION])
            || self.parse_keywords(&[Keyword::ROLLBACK, Keyword::TRAN])
            || self.parse_keyword(Keyword::ROLLBACK)
        {
            return self.parse_rollback_transaction_statement();
        }
        if self.parse_keywords(&[Keyword::SAVE, Keyword::TRANSACTION])
            || self.parse_keywords(&[Keyword::SAVE, Keyword::TRAN])
        {
            return self.parse_save_transaction_statement();
        }
        if self.parse_keyword(Keyword::USE) {
            return self.parse_use_statement();
        }
        if self.parse_keyword(Keyword::EXEC) || self.parse_keyword(Keyword::EXECUTE) {
            return self.parse_execute_statement();
        }
        if self.parse_keyword(Keyword::WAITFOR) {
            return self.parse_waitfor_statement();
        }
        if self.parse_keyword(Keyword::KILL) {
            return self.parse_kill_statement();
        }
        if self.parse_keyword(Keyword::CHECKPOINT) {
            return self.parse_checkpoint_statement();
        }
        if self.parse_keyword(Keyword::RECONFIGURE) {
            return self.parse_reconfigure_statement();
        }
        if self.parse_keyword(Keyword::SHUTDOWN) {
            return self.parse_shutdown_statement();
        }
        if self.parse_keyword(Keyword::BACKUP) {
            self.expect_keyword(Keyword::DATABASE)?;
            return self.parse_backup_database_statement();
        }
        if self.parse_keyword(Keyword::RESTORE) {
            self.parse_keyword(Keyword::DATABASE);
            return self.parse_restore_statement();
        }
        if let Some(label) = self.try_parse_label_statement() {
            return Ok(label);
        }

        let found = self.peek_token().cloned();
        self.expected("a statement", found)
    }

    /// Parses a free-standing `SELECT` statement (a query expression whose
    /// leading `WITH`/`SELECT` has already been accounted for by the caller,
    /// or not yet consumed — `SELECT` is consumed here directly since the
    /// dispatcher only peels off the leading keyword for statements that
    /// need to branch on it).
    pub(crate) fn parse_select_statement_body(&mut self) -> Result<Statement, ParserError> {
        self.parse_select_statement_body_with_ctes(Vec::new())
    }

    /// As [`Parser::parse_select_statement_body`], but for the `WITH cte AS
    /// (...) SELECT ...` form where the caller has already parsed the
    /// leading common table expressions and the `SELECT` keyword.
    pub(crate) fn parse_select_statement_body_with_ctes(
        &mut self,
        with_ctes: Vec<tsql_ast::CommonTableExpression>,
    ) -> Result<Statement, ParserError> {
        let query = tsql_ast::QueryExpressionKind::QuerySpecification(Box::new(
            self.parse_query_specification_after_select()?,
        ));
        let order_by = if self.parse_keyword(Keyword::ORDER) {
            self.expect_keyword(Keyword::BY)?;
            self.parse_comma_separated(Parser::parse_expression_with_sort_order)?
        } else {
            Vec::new()
        };
        let offset_fetch = self.parse_trailing_offset_fetch()?;
        Ok(Statement::Select(Box::new(tsql_ast::SelectStatement {
            query_expression: Box::new(tsql_ast::QueryExpression {
                with_ctes,
                query,
                order_by,
                top: None,
                offset_fetch,
            }),
        })))
    }

    pub(crate) fn parse_trailing_offset_fetch(
        &mut self,
    ) -> Result<Option<tsql_ast::OffsetFetchClause>, ParserError> {
        if !self.parse_keyword(Keyword::OFFSET) {
            return Ok(None);
        }
        let offset_expression = self.parse_scalar_expression()?;
        self.parse_one_of_keywords(&[Keyword::ROW, Keyword::ROWS]);
        let fetch_expression = if self.parse_keyword(Keyword::FETCH) {
            self.parse_one_of_keywords(&[Keyword::FIRST, Keyword::NEXT]);
            let expr = self.parse_scalar_expression()?;
            self.parse_one_of_keywords(&[Keyword::ROW, Keyword::ROWS]);
            self.expect_word_ci("ONLY")?;
            Some(expr)
        } else {
            None
        };
        Ok(Some(tsql_ast::OffsetFetchClause {
            offset_expression,
            fetch_expression,
        }))
    }

    /// Parses a structured [`DataType`] (name plus parenthesized
    /// parameters), as used by column and parameter declarations (spec
    /// §4.4), independent of [`Parser::parse_data_type_text`]'s rendered
    /// form used by expression-position casts.
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let name = self.parse_identifier()?.value.clone();
        let mut parameters = Vec::new();
        if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
            self.next_token();
            loop {
                if self.parse_keyword(Keyword::MAX) {
                    parameters.push("MAX".to_string());
                } else {
                    let tok = match self.next_token() {
                        Some(t) => t,
                        None => return self.expected("a data type parameter", None::<&str>),
                    };
                    parameters.push(tok.text);
                }
                if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                    break;
                }
            }
            self.expect_punct(TokenKind::RightParen, ")")?;
        }
        Ok(DataType { name, parameters })
    }
}
