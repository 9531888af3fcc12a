use tsql_ast::{
    CloseCursorStatement, CursorOption, DeallocateCursorStatement, DeclareCursorStatement,
    FetchCursorStatement, FetchOrientation, OpenCursorStatement, Statement,
};
use tsql_lexer::Keyword;

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// `DECLARE cursor_name CURSOR [options...] FOR select_statement` (spec
    /// §4.7). Invoked from [`Parser::parse_declare_statement`] once the
    /// leading `DECLARE name` has disambiguated away from variable
    /// declarations.
    pub(crate) fn parse_declare_cursor_statement(
        &mut self,
        cursor_name: String,
    ) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::CURSOR)?;
        let mut options = Vec::new();
        loop {
            if self.parse_keyword(Keyword::LOCAL) {
                options.push(CursorOption::Local);
            } else if self.parse_keyword(Keyword::GLOBAL) {
                options.push(CursorOption::Global);
            } else if self.parse_keyword(Keyword::FORWARD_ONLY) {
                options.push(CursorOption::ForwardOnly);
            } else if self.parse_keyword(Keyword::SCROLL) {
                options.push(CursorOption::Scroll);
            } else if self.parse_keyword(Keyword::STATIC) {
                options.push(CursorOption::Static);
            } else if self.parse_keyword(Keyword::KEYSET) {
                options.push(CursorOption::Keyset);
            } else if self.parse_keyword(Keyword::DYNAMIC) {
                options.push(CursorOption::Dynamic);
            } else if self.parse_word_ci("FAST_FORWARD") {
                options.push(CursorOption::FastForward);
            } else if self.parse_word_ci("READ_ONLY") {
                options.push(CursorOption::ReadOnly);
            } else {
                break;
            }
        }
        self.expect_keyword(Keyword::FOR)?;
        self.parse_keyword(Keyword::SELECT);
        let select = Box::new(self.parse_query_specification_as_query_expression()?);
        // `FOR UPDATE [OF col, ...]` is accepted and discarded: the AST has
        // no updatability-column slot for cursors (spec §12).
        if self.parse_keyword(Keyword::FOR) {
            self.expect_keyword(Keyword::UPDATE)?;
            if self.parse_keyword(Keyword::OF) {
                self.parse_comma_separated(Parser::parse_identifier)?;
            }
        }
        Ok(Statement::DeclareCursor(Box::new(DeclareCursorStatement {
            cursor_name,
            options,
            select,
        })))
    }

    fn parse_query_specification_as_query_expression(
        &mut self,
    ) -> Result<tsql_ast::QueryExpression, ParserError> {
        Ok(tsql_ast::QueryExpression {
            with_ctes: Vec::new(),
            query: tsql_ast::QueryExpressionKind::QuerySpecification(Box::new(
                self.parse_query_specification_after_select()?,
            )),
            order_by: Vec::new(),
            top: None,
            offset_fetch: self.parse_trailing_offset_fetch()?,
        })
    }

    pub(crate) fn parse_open_cursor_statement(&mut self) -> Result<Statement, ParserError> {
        let cursor_name = self.parse_identifier()?.value.clone();
        Ok(Statement::OpenCursor(Box::new(OpenCursorStatement {
            cursor_name,
        })))
    }

    pub(crate) fn parse_close_cursor_statement(&mut self) -> Result<Statement, ParserError> {
        let cursor_name = self.parse_identifier()?.value.clone();
        Ok(Statement::CloseCursor(Box::new(CloseCursorStatement {
            cursor_name,
        })))
    }

    pub(crate) fn parse_deallocate_cursor_statement(&mut self) -> Result<Statement, ParserError> {
        let cursor_name = self.parse_identifier()?.value.clone();
        Ok(Statement::DeallocateCursor(Box::new(
            DeallocateCursorStatement { cursor_name },
        )))
    }

    pub(crate) fn parse_fetch_cursor_statement(&mut self) -> Result<Statement, ParserError> {
        let orientation = if self.parse_keyword(Keyword::NEXT) {
            FetchOrientation::Next
        } else if self.parse_keyword(Keyword::PRIOR) {
            FetchOrientation::Prior
        } else if self.parse_keyword(Keyword::FIRST) {
            FetchOrientation::First
        } else if self.parse_keyword(Keyword::LAST) {
            FetchOrientation::Last
        } else if self.parse_word_ci("ABSOLUTE") {
            FetchOrientation::Absolute
        } else if self.parse_keyword(Keyword::RELATIVE) {
            FetchOrientation::Relative
        } else {
            FetchOrientation::Next
        };
        self.parse_keyword(Keyword::FROM);
        let cursor_name = self.parse_identifier()?.value.clone();
        let into_variables = if self.parse_keyword(Keyword::INTO) {
            self.parse_comma_separated(|p| {
                match p.next_token() {
                    Some(t) if t.kind == tsql_lexer::TokenKind::Variable => Ok(t.text),
                    other => p.expected("a variable name", other),
                }
            })?
        } else {
            Vec::new()
        };
        Ok(Statement::FetchCursor(Box::new(FetchCursorStatement {
            orientation,
            cursor_name,
            into_variables,
        })))
    }
}
