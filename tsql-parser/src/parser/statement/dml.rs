use tsql_ast::{
    AssignmentSetClause, BulkInsertStatement, DeleteStatement, InsertSource, InsertStatement,
    LiteralBulkInsertOption, MergeAction, MergeActionClause, MergeActionCondition, MergeSpecification,
    MergeStatement, OutputClause, Statement, TruncateTableStatement, UpdateStatement,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    pub(crate) fn parse_insert_statement(&mut self) -> Result<Statement, ParserError> {
        self.parse_keyword(Keyword::INTO);
        let top = self.parse_top_if_present()?;
        let target = self.parse_schema_object_name()?;
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        let output_clause = self.parse_output_clause()?;
        let source = self.parse_insert_source()?;
        Ok(Statement::Insert(Box::new(InsertStatement {
            top,
            target,
            columns,
            source,
            output_clause,
        })))
    }

    fn parse_insert_source(&mut self) -> Result<InsertSource, ParserError> {
        if self.parse_keyword(Keyword::VALUES) {
            let rows = self.parse_comma_separated(|p| {
                p.expect_punct(TokenKind::LeftParen, "(")?;
                let row = p.parse_comma_separated(Parser::parse_scalar_expression)?;
                p.expect_punct(TokenKind::RightParen, ")")?;
                Ok(row)
            })?;
            Ok(InsertSource::Values(rows))
        } else if self.parse_keyword(Keyword::DEFAULT) {
            self.expect_keyword(Keyword::VALUES)?;
            Ok(InsertSource::DefaultValues)
        } else if self.parse_keyword(Keyword::EXEC) || self.parse_keyword(Keyword::EXECUTE) {
            let execute = self.parse_execute_statement_body()?;
            Ok(InsertSource::Execute(Box::new(execute)))
        } else {
            self.parse_keyword(Keyword::SELECT);
            Ok(InsertSource::Select(Box::new(
                tsql_ast::QueryExpression {
                    with_ctes: Vec::new(),
                    query: tsql_ast::QueryExpressionKind::QuerySpecification(Box::new(
                        self.parse_query_specification_after_select()?,
                    )),
                    order_by: Vec::new(),
                    top: None,
                    offset_fetch: self.parse_trailing_offset_fetch()?,
                },
            )))
        }
    }

    fn parse_top_if_present(&mut self) -> Result<Option<tsql_ast::TopRowFilter>, ParserError> {
        if !self.parse_keyword(Keyword::TOP) {
            return Ok(None);
        }
        let parenthesized = self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0));
        let expression = self.parse_scalar_expression()?;
        if parenthesized {
            self.expect_punct(TokenKind::RightParen, ")")?;
        }
        let percent = self.parse_word_ci("PERCENT");
        Ok(Some(tsql_ast::TopRowFilter {
            expression,
            percent,
            with_ties: false,
        }))
    }

    pub(crate) fn parse_output_clause(&mut self) -> Result<Option<OutputClause>, ParserError> {
        if !self.parse_keyword(Keyword::OUTPUT) {
            return Ok(None);
        }
        let select_columns = self.parse_comma_separated(Parser::parse_scalar_expression)?;
        let (into_table, into_columns) = if self.parse_keyword(Keyword::INTO) {
            let table = self.parse_schema_object_name()?;
            let cols = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
                let cols = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                cols
            } else {
                Vec::new()
            };
            (Some(table), cols)
        } else {
            (None, Vec::new())
        };
        Ok(Some(OutputClause {
            select_columns,
            into_table,
            into_columns,
        }))
    }

    pub(crate) fn parse_update_statement(&mut self) -> Result<Statement, ParserError> {
        let top = self.parse_top_if_present()?;
        let target = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::SET)?;
        let set_clauses = self.parse_comma_separated(Parser::parse_assignment_set_clause)?;
        let output_clause = self.parse_output_clause()?;
        let from_clause = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_table_reference)?
        } else {
            Vec::new()
        };
        let where_clause = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        Ok(Statement::Update(Box::new(UpdateStatement {
            top,
            target,
            set_clauses,
            from_clause,
            where_clause,
            output_clause,
        })))
    }

    fn parse_assignment_set_clause(&mut self) -> Result<AssignmentSetClause, ParserError> {
        let column = self.parse_scalar_expression()?;
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
        let source = self.parse_scalar_expression()?;
        Ok(AssignmentSetClause { column, op, source })
    }

    pub(crate) fn parse_delete_statement(&mut self) -> Result<Statement, ParserError> {
        self.parse_keyword(Keyword::FROM);
        let top = self.parse_top_if_present()?;
        let target = self.parse_schema_object_name()?;
        let output_clause = self.parse_output_clause()?;
        let from_clause = if self.parse_keyword(Keyword::FROM) {
            self.parse_comma_separated(Parser::parse_table_reference)?
        } else {
            Vec::new()
        };
        let where_clause = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        Ok(Statement::Delete(Box::new(DeleteStatement {
            top,
            target,
            from_clause,
            where_clause,
            output_clause,
        })))
    }

    pub(crate) fn parse_truncate_table_statement(&mut self) -> Result<Statement, ParserError> {
        let target = self.parse_schema_object_name()?;
        Ok(Statement::TruncateTable(Box::new(TruncateTableStatement {
            target,
        })))
    }

    pub(crate) fn parse_merge_statement(&mut self) -> Result<Statement, ParserError> {
        self.parse_keyword(Keyword::INTO);
        let top = self.parse_top_if_present()?;
        let mut target = self.parse_table_reference()?;
        let table_alias = target.take_alias();
        self.expect_keyword(Keyword::USING)?;
        let table_source = self.parse_table_reference()?;
        self.expect_keyword(Keyword::ON)?;
        let search_condition = self.parse_boolean_expression()?;
        let mut action_clauses = Vec::new();
        while self.parse_keyword(Keyword::WHEN) {
            action_clauses.push(self.parse_merge_action_clause()?);
        }
        let output_clause = self.parse_output_clause()?;
        Ok(Statement::Merge(Box::new(MergeStatement {
            merge_specification: MergeSpecification {
                top,
                target,
                table_alias,
                table_source,
                search_condition,
                action_clauses,
                output_clause,
            },
        })))
    }

    fn parse_merge_action_clause(&mut self) -> Result<MergeActionClause, ParserError> {
        let condition = if self.parse_keyword(Keyword::MATCHED) {
            if self.parse_word_ci("BY") {
                if self.parse_word_ci("TARGET") {
                    MergeActionCondition::NotMatchedByTarget
                } else {
                    self.expect_word_ci("SOURCE")?;
                    MergeActionCondition::NotMatchedBySource
                }
            } else {
                MergeActionCondition::Matched
            }
        } else {
            self.expect_keyword(Keyword::NOT)?;
            self.expect_keyword(Keyword::MATCHED)?;
            if self.parse_word_ci("BY") {
                if self.parse_word_ci("SOURCE") {
                    MergeActionCondition::NotMatchedBySource
                } else {
                    self.expect_word_ci("TARGET")?;
                    MergeActionCondition::NotMatchedByTarget
                }
            } else {
                MergeActionCondition::NotMatchedByTarget
            }
        };
        let search_condition = if self.parse_keyword(Keyword::AND) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::THEN)?;
        let action = self.parse_merge_action()?;
        Ok(MergeActionClause {
            condition,
            search_condition,
            action,
        })
    }

    fn parse_merge_action(&mut self) -> Result<MergeAction, ParserError> {
        if self.parse_keyword(Keyword::DELETE) {
            return Ok(MergeAction::Delete);
        }
        if self.parse_keyword(Keyword::UPDATE) {
            self.expect_keyword(Keyword::SET)?;
            let set_clauses = self.parse_comma_separated(Parser::parse_assignment_set_clause)?;
            return Ok(MergeAction::Update { set_clauses });
        }
        self.expect_keyword(Keyword::INSERT)?;
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        let source = self.parse_insert_source()?;
        Ok(MergeAction::Insert { columns, source })
    }

    pub(crate) fn parse_bulk_insert_statement(&mut self) -> Result<Statement, ParserError> {
        let target = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::FROM)?;
        let data_file_token = match self.next_token() {
            Some(t) => t,
            None => return self.expected("a data file path", None::<&str>),
        };
        let data_file = crate::parser::expression::strip_quotes(&data_file_token.text);
        let options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, value)| LiteralBulkInsertOption {
                    option_kind: bulk_insert_option_kind(&name),
                    value: value.unwrap_or_default(),
                })
                .collect()
        } else {
            Vec::new()
        };
        Ok(Statement::BulkInsert(Box::new(BulkInsertStatement {
            target,
            data_file,
            options,
        })))
    }
}

/// Maps a `BULK INSERT ... WITH (...)` option keyword to its ScriptDOM
/// `OptionKind` enum spelling (spec §4.5; `tsql_ast::LiteralBulkInsertOption`'s
/// own doc). The known options aren't a mechanical underscore-to-PascalCase
/// split (`TABLOCK` -> `TabLock`, `KEEPNULLS` -> `KeepNulls`), so they're
/// listed explicitly; anything else falls back to splitting on `_` and
/// capitalizing each segment, which does cover the underscore-separated
/// majority (`CHECK_CONSTRAINTS` -> `CheckConstraints`).
fn bulk_insert_option_kind(name: &str) -> String {
    const KNOWN: &[(&str, &str)] = &[
        ("BATCHSIZE", "BatchSize"),
        ("CHECK_CONSTRAINTS", "CheckConstraints"),
        ("CODEPAGE", "CodePage"),
        ("DATAFILETYPE", "DataFileType"),
        ("DATA_SOURCE", "DataSource"),
        ("ERRORFILE", "ErrorFile"),
        ("ERRORFILE_DATA_SOURCE", "ErrorFileDataSource"),
        ("FIELDTERMINATOR", "FieldTerminator"),
        ("FIRE_TRIGGERS", "FireTriggers"),
        ("FIRSTROW", "FirstRow"),
        ("FORMAT", "Format"),
        ("FORMATFILE", "FormatFile"),
        ("FORMATFILE_DATA_SOURCE", "FormatFileDataSource"),
        ("KEEPIDENTITY", "KeepIdentity"),
        ("KEEPNULLS", "KeepNulls"),
        ("KILOBYTES_PER_BATCH", "KilobytesPerBatch"),
        ("LASTROW", "LastRow"),
        ("MAXERRORS", "MaxErrors"),
        ("ORDER", "Order"),
        ("ROWS_PER_BATCH", "RowsPerBatch"),
        ("ROWTERMINATOR", "RowTerminator"),
        ("ROWSET_OPTIONS", "RowsetOptions"),
        ("TABLOCK", "TabLock"),
    ];
    let upper = name.to_ascii_uppercase();
    if let Some((_, kind)) = KNOWN.iter().find(|(key, _)| *key == upper) {
        return (*kind).to_string();
    }
    upper
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<String>()
}
