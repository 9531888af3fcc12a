use tsql_ast::{
    BeginEndBlockStatement, DeclareVariableElement, DeclareVariableStatement, GoToStatement,
    IfStatement, LabelStatement, PrintStatement, ReturnStatement, SetVariableStatement, Statement,
    StatementList, ThrowStatement, TryCatchStatement, WhileStatement,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// `DECLARE @v type [= value] [, ...]` vs. `DECLARE cursor_name CURSOR
    /// ...` — disambiguated on whether the name is a `@variable` or a plain
    /// identifier (spec §4.7).
    pub(crate) fn parse_declare_statement(&mut self) -> Result<Statement, ParserError> {
        if self.peek_token().map(|t| t.kind == TokenKind::Variable).unwrap_or(false) {
            let declarations = self.parse_comma_separated(Parser::parse_declare_variable_element)?;
            return Ok(Statement::DeclareVariable(Box::new(
                DeclareVariableStatement { declarations },
            )));
        }
        let cursor_name = self.parse_identifier()?.value.clone();
        self.parse_declare_cursor_statement(cursor_name)
    }

    fn parse_declare_variable_element(&mut self) -> Result<DeclareVariableElement, ParserError> {
        let variable_name = match self.next_token() {
            Some(t) if t.kind == TokenKind::Variable => t.text,
            other => return self.expected("a variable name", other),
        };
        let data_type = self.parse_data_type()?;
        let value = if self.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0)) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        Ok(DeclareVariableElement {
            variable_name,
            data_type,
            value,
        })
    }

    pub(crate) fn parse_set_variable_statement(&mut self) -> Result<Statement, ParserError> {
        let variable_name = match self.next_token() {
            Some(t) if t.kind == TokenKind::Variable => t.text,
            other => return self.expected("a variable name", other),
        };
        let op_token = match self.peek_token().map(|t| t.kind.clone()) {
            Some(kind) => kind,
            None => return self.expected("an assignment operator", None::<&str>),
        };
        let op = match crate::parser::expression::assignment_operator_for(&op_token) {
            Some(op) => op,
            None => {
                let found = self.peek_token().cloned();
                return self.expected("an assignment operator", found);
            }
        };
        self.next_token();
        let expression = self.parse_scalar_expression()?;
        Ok(Statement::SetVariable(Box::new(SetVariableStatement {
            variable_name,
            op,
            expression,
        })))
    }

    pub(crate) fn parse_if_statement(&mut self) -> Result<Statement, ParserError> {
        let predicate = self.parse_boolean_expression()?;
        let then_statement = Box::new(self.parse_statement_dispatch()?);
        let else_statement = if self.parse_keyword(Keyword::ELSE) {
            Some(Box::new(self.parse_statement_dispatch()?))
        } else if self.peek_sequence_is_semicolon_then_else() {
            self.next_token();
            self.expect_keyword(Keyword::ELSE)?;
            Some(Box::new(self.parse_statement_dispatch()?))
        } else {
            None
        };
        Ok(Statement::If(Box::new(IfStatement {
            predicate,
            then_statement,
            else_statement,
        })))
    }

    fn peek_sequence_is_semicolon_then_else(&mut self) -> bool {
        if !self.peek_token().map(|t| t.kind == TokenKind::Semicolon).unwrap_or(false) {
            return false;
        }
        self.peek_next_token();
        let next_is_else = self
            .peek_next_token()
            .map(|t| t.is_keyword(Keyword::ELSE))
            .unwrap_or(false);
        self.reset_peek_cursor();
        next_is_else
    }

    pub(crate) fn parse_while_statement(&mut self) -> Result<Statement, ParserError> {
        let predicate = self.parse_boolean_expression()?;
        let statement = Box::new(self.parse_statement_dispatch()?);
        Ok(Statement::While(Box::new(WhileStatement {
            predicate,
            statement,
        })))
    }

    /// Plain `BEGIN ... END` (distinct from `BEGIN TRANSACTION`/`BEGIN TRY`,
    /// both special-cased ahead of this in the dispatcher).
    pub(crate) fn parse_begin_statement(&mut self) -> Result<Statement, ParserError> {
        let statement_list = self.parse_begin_end_body()?;
        Ok(Statement::BeginEndBlock(Box::new(BeginEndBlockStatement {
            statement_list,
        })))
    }

    /// Parses statements up to and including the closing `END` (spec §4.6,
    /// §4.4 — also used for procedure/function/trigger bodies written as
    /// `BEGIN ... END`).
    pub(crate) fn parse_begin_end_body(&mut self) -> Result<StatementList, ParserError> {
        let mut statements = Vec::new();
        while !self.parse_keyword(Keyword::END) {
            if self.is_eof() {
                return self.expected("END", None::<&str>);
            }
            statements.push(self.parse_statement_dispatch()?);
            self.next_token_if_is(&Token::new(TokenKind::Semicolon, ";", 0, 0));
        }
        Ok(statements)
    }

    pub(crate) fn parse_return_statement(&mut self) -> Result<Statement, ParserError> {
        let expression = if self.at_batch_boundary() {
            None
        } else {
            Some(self.parse_scalar_expression()?)
        };
        Ok(Statement::Return(Box::new(ReturnStatement { expression })))
    }

    pub(crate) fn parse_print_statement(&mut self) -> Result<Statement, ParserError> {
        let expression = self.parse_scalar_expression()?;
        Ok(Statement::Print(Box::new(PrintStatement { expression })))
    }

    pub(crate) fn parse_throw_statement(&mut self) -> Result<Statement, ParserError> {
        if self.at_batch_boundary() {
            return Ok(Statement::Throw(Box::new(ThrowStatement {
                error_number: None,
                message: None,
                state: None,
            })));
        }
        let error_number = Some(self.parse_scalar_expression()?);
        self.expect_punct(TokenKind::Comma, ",")?;
        let message = Some(self.parse_scalar_expression()?);
        self.expect_punct(TokenKind::Comma, ",")?;
        let state = Some(self.parse_scalar_expression()?);
        Ok(Statement::Throw(Box::new(ThrowStatement {
            error_number,
            message,
            state,
        })))
    }

    /// Entered with `BEGIN TRY` already consumed by the dispatcher (spec
    /// §4.6): `TRY_BODY END TRY BEGIN CATCH CATCH_BODY END CATCH`.
    pub(crate) fn parse_try_catch_statement(&mut self) -> Result<Statement, ParserError> {
        let try_statements = self.parse_statements_until_end_of(&Parser::peek_is_end_try)?;
        self.expect_keyword(Keyword::END)?;
        self.expect_keyword(Keyword::TRY)?;
        self.expect_keyword(Keyword::BEGIN)?;
        self.expect_word_ci("CATCH")?;
        let catch_statements = self.parse_statements_until_end_of(&Parser::peek_is_end_catch)?;
        self.expect_keyword(Keyword::END)?;
        self.expect_word_ci("CATCH")?;
        Ok(Statement::TryCatch(Box::new(TryCatchStatement {
            try_statements,
            catch_statements,
        })))
    }

    fn parse_statements_until_end_of(
        &mut self,
        stop: &dyn Fn(&mut Parser) -> bool,
    ) -> Result<StatementList, ParserError> {
        let mut statements = Vec::new();
        while !stop(self) {
            if self.is_eof() {
                return self.expected("END", None::<&str>);
            }
            statements.push(self.parse_statement_dispatch()?);
            self.next_token_if_is(&Token::new(TokenKind::Semicolon, ";", 0, 0));
        }
        Ok(statements)
    }

    fn peek_is_end_try(&mut self) -> bool {
        self.peek_two_word_sequence(Keyword::END, "TRY")
    }

    fn peek_is_end_catch(&mut self) -> bool {
        self.peek_two_word_sequence(Keyword::END, "CATCH")
    }

    fn peek_two_word_sequence(&mut self, first: Keyword, second_word: &str) -> bool {
        if !self.peek_token().map(|t| t.is_keyword(first)).unwrap_or(false) {
            return false;
        }
        self.peek_next_token();
        let matches_second = self
            .peek_next_token()
            .map(|t| t.is_word_ci(second_word))
            .unwrap_or(false);
        self.reset_peek_cursor();
        matches_second
    }

    pub(crate) fn parse_goto_statement(&mut self) -> Result<Statement, ParserError> {
        let label_name = self.parse_identifier()?.value.clone();
        Ok(Statement::GoTo(Box::new(GoToStatement { label_name })))
    }

    /// A bare `label_name:` statement (spec §4.6); only matches when the
    /// current token is an identifier immediately followed by `:`, so it
    /// never shadows a real statement whose leading identifier happens to be
    /// followed by something else.
    pub(crate) fn try_parse_label_statement(&mut self) -> Option<Statement> {
        let is_name = matches!(
            self.peek_token().map(|t| t.kind.clone()),
            Some(TokenKind::Identifier) | Some(TokenKind::QuotedIdentifier(_))
        );
        if !is_name {
            return None;
        }
        self.peek_next_token();
        let next_is_colon = self
            .peek_next_token()
            .map(|t| t.kind == TokenKind::Colon)
            .unwrap_or(false);
        self.reset_peek_cursor();
        if !next_is_colon {
            return None;
        }
        let label_name = self.parse_identifier().ok()?.value.clone();
        self.next_token();
        Some(Statement::Label(Box::new(LabelStatement { label_name })))
    }
}
