use std::rc::Rc;

use tsql_ast::{
    AlterIndexStatement, AlterIndexType, AlterTableAction, AlterTableStatement, AttachMode,
    ColumnDefinition, ConstraintDefinition, ConstraintKind, CreateDatabaseStatement,
    CreateFunctionStatement, CreateIndexStatement, CreateProcedureStatement, CreateSchemaStatement,
    CreateTableStatement, CreateTriggerStatement, CreateViewStatement, DeleteUpdateAction,
    DropBehavior, DropObjectKind, DropObjectsStatement, FunctionReturnType, HashDistributionPolicy,
    Identifier, IdentityOptions, ProcedureParameter, SortOrder, Statement, TableDefinitionBody,
    TableObjectKind, TableOption, TriggerScope, TriggerType,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// Second-level dispatch for `CREATE` by object-class keyword (spec §4.4).
    pub(crate) fn parse_create_statement(&mut self) -> Result<Statement, ParserError> {
        let unique = self.parse_keyword(Keyword::UNIQUE);
        let clustered = if self.parse_keyword(Keyword::CLUSTERED) {
            Some(true)
        } else if self.parse_keyword(Keyword::NONCLUSTERED) {
            Some(false)
        } else {
            None
        };
        if unique || clustered.is_some() || self.peek_token().map(|t| t.is_keyword(Keyword::INDEX)).unwrap_or(false) {
            self.expect_keyword(Keyword::INDEX)?;
            return self.parse_create_index_statement(unique, clustered);
        }
        if self.parse_keyword(Keyword::TABLE) {
            return self.parse_create_table_statement();
        }
        if self.parse_keyword(Keyword::VIEW) {
            return self.parse_create_view_statement();
        }
        if self.parse_keyword(Keyword::PROC) || self.parse_keyword(Keyword::PROCEDURE) {
            return self.parse_create_procedure_statement();
        }
        if self.parse_keyword(Keyword::FUNCTION) {
            return self.parse_create_function_statement();
        }
        if self.parse_keyword(Keyword::TRIGGER) {
            return self.parse_create_trigger_statement();
        }
        if self.parse_keyword(Keyword::SCHEMA) {
            return self.parse_create_schema_statement();
        }
        if self.parse_keyword(Keyword::DATABASE) {
            return self.parse_create_database_statement();
        }
        let found = self.peek_token().cloned();
        self.expected("a CREATE-able object class", found)
    }

    /// Second-level dispatch for `ALTER`.
    pub(crate) fn parse_alter_statement(&mut self) -> Result<Statement, ParserError> {
        if self.parse_keyword(Keyword::TABLE) {
            return self.parse_alter_table_statement();
        }
        if self.parse_keyword(Keyword::INDEX) {
            return self.parse_alter_index_statement();
        }
        let found = self.peek_token().cloned();
        self.expected("an ALTER-able object class", found)
    }

    /// Second-level dispatch for `DROP`.
    pub(crate) fn parse_drop_statement(&mut self) -> Result<Statement, ParserError> {
        let object_kind = if self.parse_keyword(Keyword::TABLE) {
            DropObjectKind::Table
        } else if self.parse_keyword(Keyword::VIEW) {
            DropObjectKind::View
        } else if self.parse_keyword(Keyword::PROC) || self.parse_keyword(Keyword::PROCEDURE) {
            DropObjectKind::Procedure
        } else if self.parse_keyword(Keyword::FUNCTION) {
            DropObjectKind::Function
        } else if self.parse_keyword(Keyword::INDEX) {
            DropObjectKind::Index
        } else if self.parse_keyword(Keyword::SCHEMA) {
            DropObjectKind::Schema
        } else if self.parse_keyword(Keyword::TRIGGER) {
            DropObjectKind::Trigger
        } else {
            let found = self.peek_token().cloned();
            return self.expected("a DROP-able object class", found);
        };
        let if_exists = self.parse_keyword(Keyword::IF) && {
            self.expect_keyword(Keyword::EXISTS)?;
            true
        };
        let objects = if object_kind == DropObjectKind::Index {
            // DROP INDEX name ON table [, name ON table ...]
            self.parse_comma_separated(|p| {
                let index_name = p.parse_identifier()?;
                p.expect_keyword(Keyword::ON)?;
                let mut on_table = p.parse_schema_object_name()?;
                on_table.identifiers.push(index_name);
                Ok(on_table)
            })?
        } else {
            self.parse_comma_separated(Parser::parse_schema_object_name)?
        };
        let drop_behavior = if self.parse_keyword(Keyword::CASCADE) {
            DropBehavior::Cascade
        } else if self.parse_word_ci("RESTRICT") {
            DropBehavior::Restrict
        } else {
            DropBehavior::None
        };
        Ok(Statement::DropObjects(Box::new(DropObjectsStatement {
            object_kind,
            if_exists,
            objects,
            drop_behavior,
        })))
    }

    fn parse_create_table_statement(&mut self) -> Result<Statement, ParserError> {
        let schema_object_name = self.parse_schema_object_name()?;
        let as_kind = if self.parse_keyword(Keyword::AS) {
            if self.parse_keyword(Keyword::FILETABLE) {
                TableObjectKind::FileTable
            } else if self.parse_keyword(Keyword::NODE) {
                TableObjectKind::Node
            } else if self.parse_keyword(Keyword::EDGE) {
                TableObjectKind::Edge
            } else {
                let found = self.peek_token().cloned();
                return self.expected("FILETABLE, NODE, or EDGE", found);
            }
        } else {
            TableObjectKind::Table
        };
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let definition = self.parse_table_definition_body()?;
        self.expect_punct(TokenKind::RightParen, ")")?;

        let mut on_filegroup = None;
        let mut textimage_on = None;
        let mut filestream_on = None;
        let mut options = Vec::new();
        let mut distribution_policy = None;
        let mut as_select = None;
        let federated_on = Vec::new();
        loop {
            if self.parse_keyword(Keyword::ON) {
                on_filegroup = Some(self.parse_raw_word("a filegroup name")?);
            } else if self.parse_word_ci("TEXTIMAGE_ON") {
                textimage_on = Some(self.parse_raw_word("a filegroup name")?);
            } else if self.parse_word_ci("FILESTREAM_ON") {
                filestream_on = Some(self.parse_raw_word("a filegroup name")?);
            } else if self.parse_keyword(Keyword::WITH) {
                let (parsed_options, parsed_distribution) =
                    self.parse_with_options_with_distribution()?;
                options = parsed_options
                    .into_iter()
                    .map(|(name, value)| TableOption { name, value })
                    .collect();
                distribution_policy = parsed_distribution;
            } else if self.parse_keyword(Keyword::AS) {
                self.expect_keyword(Keyword::SELECT)?;
                as_select = Some(Box::new(tsql_ast::QueryExpression {
                    with_ctes: Vec::new(),
                    query: tsql_ast::QueryExpressionKind::QuerySpecification(Box::new(
                        self.parse_query_specification_after_select()?,
                    )),
                    order_by: Vec::new(),
                    top: None,
                    offset_fetch: self.parse_trailing_offset_fetch()?,
                }));
            } else {
                break;
            }
        }

        Ok(Statement::CreateTable(Box::new(CreateTableStatement {
            schema_object_name,
            as_kind,
            definition,
            on_filegroup,
            textimage_on,
            filestream_on,
            options,
            distribution_policy,
            as_select,
            federated_on,
        })))
    }

    /// Parses a `WITH (...)` option list, special-casing `DISTRIBUTION =
    /// HASH(col1, col2, ...)` (spec §4.4, §4.5, §9) into a
    /// [`HashDistributionPolicy`] whose first column shares `Rc` identity
    /// with the policy's standalone `distribution_column` slot, rather than
    /// flattening it into a generic [`TableOption`] string value the way
    /// every other option is kept. Every other `IDENT [= value]` pair is
    /// returned unchanged so callers can still build their own `TableOption`/
    /// name-only list.
    fn parse_with_options_with_distribution(
        &mut self,
    ) -> Result<(Vec<(String, Option<String>)>, Option<HashDistributionPolicy>), ParserError> {
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let mut options = Vec::new();
        let mut distribution_policy = None;
        loop {
            let name_token = match self.next_token() {
                Some(t) if !t.is_eof() => t,
                _ => return self.expected("option name", None::<&str>),
            };
            let name = name_token.text.clone();
            let has_eq = self.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0));
            if has_eq && name.eq_ignore_ascii_case("DISTRIBUTION") && self.parse_word_ci("HASH") {
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let columns = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                let mut iter = columns.into_iter();
                if let Some(first) = iter.next() {
                    let mut distribution_columns = vec![Rc::clone(&first)];
                    distribution_columns.extend(iter);
                    distribution_policy = Some(HashDistributionPolicy {
                        distribution_column: first,
                        distribution_columns,
                    });
                }
            } else if has_eq {
                options.push((name, Some(self.parse_option_value_text()?)));
            } else {
                options.push((name, None));
            }
            if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                break;
            }
        }
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok((options, distribution_policy))
    }

    fn parse_raw_word(&mut self, what: &str) -> Result<String, ParserError> {
        match self.next_token() {
            Some(t) => Ok(t.text),
            None => self.expected(what, None::<&str>),
        }
    }

    fn parse_table_definition_body(&mut self) -> Result<TableDefinitionBody, ParserError> {
        if self.peek_is_bare_identifier_list() {
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            return Ok(TableDefinitionBody::CtasColumnList { columns });
        }
        let mut columns = Vec::new();
        let mut constraints = Vec::new();
        loop {
            if self.looks_like_table_constraint_start() {
                constraints.push(self.parse_table_constraint()?);
            } else {
                columns.push(self.parse_column_definition()?);
            }
            if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                break;
            }
        }
        Ok(TableDefinitionBody::Columns { columns, constraints })
    }

    fn peek_is_bare_identifier_list(&mut self) -> bool {
        let first_is_name = matches!(
            self.peek_token().map(|t| t.kind.clone()),
            Some(TokenKind::Identifier) | Some(TokenKind::QuotedIdentifier(_))
        );
        if !first_is_name {
            return false;
        }
        self.peek_next_token();
        let second = self.peek_next_token().map(|t| t.kind.clone());
        self.reset_peek_cursor();
        matches!(second, Some(TokenKind::Comma) | Some(TokenKind::RightParen))
    }

    fn looks_like_table_constraint_start(&mut self) -> bool {
        self.peek_token()
            .map(|t| {
                t.is_keyword(Keyword::CONSTRAINT)
                    || t.is_keyword(Keyword::PRIMARY)
                    || t.is_keyword(Keyword::UNIQUE)
                    || t.is_keyword(Keyword::FOREIGN)
                    || t.is_keyword(Keyword::CHECK)
            })
            .unwrap_or(false)
    }

    fn parse_table_constraint(&mut self) -> Result<ConstraintDefinition, ParserError> {
        let constraint_identifier = if self.parse_keyword(Keyword::CONSTRAINT) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let kind = if self.parse_keyword(Keyword::PRIMARY) || self.peek_was_unique() {
            self.parse_unique_constraint_kind(true)?
        } else if self.parse_keyword(Keyword::FOREIGN) {
            self.expect_keyword(Keyword::KEY)?;
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let columns = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            self.parse_foreign_key_tail(columns)?
        } else if self.parse_keyword(Keyword::CHECK) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let expression = self.parse_boolean_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            ConstraintKind::Check { expression }
        } else {
            let found = self.peek_token().cloned();
            return self.expected("PRIMARY KEY, UNIQUE, FOREIGN KEY, or CHECK", found);
        };
        Ok(ConstraintDefinition {
            constraint_identifier,
            kind,
        })
    }

    /// `PRIMARY` has already been consumed when `primary_consumed` drives the
    /// `IsPrimaryKey` flag; otherwise this is entered having consumed `UNIQUE`
    /// directly (see [`Parser::peek_was_unique`]).
    fn parse_unique_constraint_kind(
        &mut self,
        came_from_primary: bool,
    ) -> Result<ConstraintKind, ParserError> {
        let is_primary_key = if came_from_primary {
            self.expect_keyword(Keyword::KEY)?;
            true
        } else {
            false
        };
        let clustered = if self.parse_keyword(Keyword::CLUSTERED) {
            Some(true)
        } else if self.parse_keyword(Keyword::NONCLUSTERED) {
            Some(false)
        } else {
            None
        };
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_column_with_sort_order)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        Ok(ConstraintKind::Unique {
            is_primary_key,
            clustered,
            columns,
        })
    }

    /// True and consumes `UNIQUE` if the next token is that keyword (used so
    /// table- and column-level constraint parsing can share
    /// [`Parser::parse_unique_constraint_kind`]).
    fn peek_was_unique(&mut self) -> bool {
        self.parse_keyword(Keyword::UNIQUE)
    }

    fn parse_column_with_sort_order(
        &mut self,
    ) -> Result<(Rc<Identifier>, SortOrder), ParserError> {
        let identifier = self.parse_identifier()?;
        let sort_order = if self.parse_keyword(Keyword::ASC) {
            SortOrder::Ascending
        } else if self.parse_keyword(Keyword::DESC) {
            SortOrder::Descending
        } else {
            SortOrder::NotSpecified
        };
        Ok((identifier, sort_order))
    }

    fn parse_foreign_key_tail(
        &mut self,
        columns: Vec<Rc<Identifier>>,
    ) -> Result<ConstraintKind, ParserError> {
        self.expect_keyword(Keyword::REFERENCES)?;
        let referenced_table = self.parse_schema_object_name()?;
        let referenced_columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        let mut delete_action = DeleteUpdateAction::NotSpecified;
        let mut update_action = DeleteUpdateAction::NotSpecified;
        loop {
            if self.parse_keyword(Keyword::ON) {
                let is_delete = if self.parse_keyword(Keyword::DELETE) {
                    true
                } else {
                    self.expect_keyword(Keyword::UPDATE)?;
                    false
                };
                let action = self.parse_delete_update_action()?;
                if is_delete {
                    delete_action = action;
                } else {
                    update_action = action;
                }
            } else {
                break;
            }
        }
        Ok(ConstraintKind::ForeignKey {
            columns,
            referenced_table,
            referenced_columns,
            delete_action,
            update_action,
        })
    }

    fn parse_delete_update_action(&mut self) -> Result<DeleteUpdateAction, ParserError> {
        if self.parse_keyword(Keyword::CASCADE) {
            return Ok(DeleteUpdateAction::Cascade);
        }
        if self.parse_keyword(Keyword::NO) {
            self.expect_keyword(Keyword::ACTION)?;
            return Ok(DeleteUpdateAction::NoAction);
        }
        self.expect_keyword(Keyword::SET)?;
        if self.parse_keyword(Keyword::NULL) {
            return Ok(DeleteUpdateAction::SetNull);
        }
        self.expect_keyword(Keyword::DEFAULT)?;
        Ok(DeleteUpdateAction::SetDefault)
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParserError> {
        let column_identifier = self.parse_identifier()?;
        let data_type = self.parse_data_type()?;
        let identity = if self.parse_keyword(Keyword::IDENTITY) {
            let (seed, increment) =
                if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
                    let seed = self.parse_scalar_expression()?;
                    self.expect_punct(TokenKind::Comma, ",")?;
                    let increment = self.parse_scalar_expression()?;
                    self.expect_punct(TokenKind::RightParen, ")")?;
                    (Some(seed), Some(increment))
                } else {
                    (None, None)
                };
            let not_for_replication = if self.parse_keyword(Keyword::NOT) {
                self.expect_word_ci("FOR")?;
                self.expect_keyword(Keyword::REPLICATION)?;
                true
            } else {
                false
            };
            Some(IdentityOptions {
                seed,
                increment,
                not_for_replication,
            })
        } else {
            None
        };

        let mut constraints = Vec::new();
        loop {
            if self.parse_keyword(Keyword::NOT) {
                self.expect_keyword(Keyword::NULL)?;
                constraints.push(ConstraintDefinition {
                    constraint_identifier: None,
                    kind: ConstraintKind::Nullable { nullable: false },
                });
                continue;
            }
            if self.parse_keyword(Keyword::NULL) {
                constraints.push(ConstraintDefinition {
                    constraint_identifier: None,
                    kind: ConstraintKind::Nullable { nullable: true },
                });
                continue;
            }
            let constraint_identifier = if self.parse_keyword(Keyword::CONSTRAINT) {
                Some(self.parse_identifier()?)
            } else {
                None
            };
            if self.parse_keyword(Keyword::PRIMARY) {
                let kind = self.parse_unique_constraint_kind(true)?;
                constraints.push(ConstraintDefinition {
                    constraint_identifier,
                    kind,
                });
                continue;
            }
            if self.parse_keyword(Keyword::UNIQUE) {
                let kind = self.parse_unique_constraint_kind(false)?;
                constraints.push(ConstraintDefinition {
                    constraint_identifier,
                    kind,
                });
                continue;
            }
            if self.parse_keyword(Keyword::DEFAULT) {
                let expression = self.parse_scalar_expression()?;
                constraints.push(ConstraintDefinition {
                    constraint_identifier,
                    kind: ConstraintKind::Default {
                        expression,
                        for_column: Some(column_identifier.clone()),
                    },
                });
                continue;
            }
            if self.parse_keyword(Keyword::CHECK) {
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let expression = self.parse_boolean_expression()?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                constraints.push(ConstraintDefinition {
                    constraint_identifier,
                    kind: ConstraintKind::Check { expression },
                });
                continue;
            }
            if self.parse_keyword(Keyword::REFERENCES) {
                let referenced_table = self.parse_schema_object_name()?;
                let referenced_columns =
                    if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
                        let cols = self.parse_comma_separated(Parser::parse_identifier)?;
                        self.expect_punct(TokenKind::RightParen, ")")?;
                        cols
                    } else {
                        Vec::new()
                    };
                constraints.push(ConstraintDefinition {
                    constraint_identifier,
                    kind: ConstraintKind::ForeignKey {
                        columns: vec![column_identifier.clone()],
                        referenced_table,
                        referenced_columns,
                        delete_action: DeleteUpdateAction::NotSpecified,
                        update_action: DeleteUpdateAction::NotSpecified,
                    },
                });
                continue;
            }
            if constraint_identifier.is_some() {
                let found = self.peek_token().cloned();
                return self.expected("a constraint kind", found);
            }
            break;
        }

        Ok(ColumnDefinition {
            column_identifier,
            data_type,
            identity,
            constraints,
        })
    }

    fn parse_create_view_statement(&mut self) -> Result<Statement, ParserError> {
        let schema_object_name = self.parse_schema_object_name()?;
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        let (with_options, distribution_policy) = if self.parse_keyword(Keyword::WITH) {
            let (options, distribution_policy) = self.parse_with_options_with_distribution()?;
            (
                options.into_iter().map(|(name, _)| name).collect(),
                distribution_policy,
            )
        } else {
            (Vec::new(), None)
        };
        self.expect_keyword(Keyword::AS)?;
        let select_statement = Box::new(self.parse_query_expression()?);
        let with_check_option = if self.parse_keyword(Keyword::WITH) {
            self.expect_word_ci("CHECK")?;
            self.expect_keyword(Keyword::OPTION)?;
            true
        } else {
            false
        };
        Ok(Statement::CreateView(Box::new(CreateViewStatement {
            schema_object_name,
            columns,
            with_options,
            distribution_policy,
            select_statement,
            with_check_option,
        })))
    }

    fn parse_procedure_parameters(&mut self) -> Result<Vec<ProcedureParameter>, ParserError> {
        if !self.peek_token().map(|t| t.kind == TokenKind::Variable).unwrap_or(false) {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(|p| {
            let variable_token = match p.next_token() {
                Some(t) if t.kind == TokenKind::Variable => t,
                other => return p.expected("a parameter name", other),
            };
            let data_type = p.parse_data_type()?;
            let default_value = if p.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0)) {
                Some(p.parse_scalar_expression()?)
            } else {
                None
            };
            let is_output = p.parse_keyword(Keyword::OUTPUT) || p.parse_word_ci("OUT");
            let is_readonly = p.parse_word_ci("READONLY");
            Ok(ProcedureParameter {
                variable_name: variable_token.text,
                data_type,
                default_value,
                is_output,
                is_readonly,
            })
        })
    }

    fn parse_create_procedure_statement(&mut self) -> Result<Statement, ParserError> {
        let schema_object_name = self.parse_schema_object_name()?;
        let parameters = self.parse_procedure_parameters()?;
        let with_options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, _)| name)
                .collect()
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::AS)?;
        let is_external = self.parse_word_ci("EXTERNAL");
        let statement_list = if is_external {
            self.expect_word_ci("NAME")?;
            self.parse_identifier()?;
            Vec::new()
        } else {
            self.parse_statement_list_until_batch_end()?
        };
        Ok(Statement::CreateProcedure(Box::new(CreateProcedureStatement {
            schema_object_name,
            parameters,
            with_options,
            statement_list,
            is_external,
        })))
    }

    fn parse_create_function_statement(&mut self) -> Result<Statement, ParserError> {
        let schema_object_name = self.parse_schema_object_name()?;
        let parameters = self.parse_procedure_parameters()?;
        self.expect_keyword(Keyword::RETURNS)?;
        let returns = if self.parse_word_ci("TABLE") {
            if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
                self.next_token();
                let columns = self.parse_comma_separated(Parser::parse_column_definition)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                FunctionReturnType::TableWithColumns(columns)
            } else {
                FunctionReturnType::Table
            }
        } else {
            FunctionReturnType::Scalar(self.parse_data_type()?)
        };
        let with_options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, _)| name)
                .collect()
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::AS)?;
        if matches!(returns, FunctionReturnType::Scalar(_))
            && self.peek_token().map(|t| t.is_keyword(Keyword::RETURN)).unwrap_or(false)
            && !self.peek_is_begin_block()
        {
            self.expect_keyword(Keyword::RETURN)?;
            let return_expression = Some(self.parse_scalar_expression()?);
            return Ok(Statement::CreateFunction(Box::new(CreateFunctionStatement {
                schema_object_name,
                parameters,
                returns,
                with_options,
                statement_list: None,
                return_expression,
            })));
        }
        let statement_list = Some(self.parse_statement_list_until_batch_end()?);
        Ok(Statement::CreateFunction(Box::new(CreateFunctionStatement {
            schema_object_name,
            parameters,
            returns,
            with_options,
            statement_list,
            return_expression: None,
        })))
    }

    fn peek_is_begin_block(&mut self) -> bool {
        self.peek_token().map(|t| t.is_keyword(Keyword::BEGIN)).unwrap_or(false)
    }

    /// Parses a plain statement list up to `GO`/end-of-input (used by
    /// function/procedure/trigger bodies that are not wrapped in their own
    /// `BEGIN...END`, spec §4.4).
    pub(crate) fn parse_statement_list_until_batch_end(
        &mut self,
    ) -> Result<Vec<Statement>, ParserError> {
        if self.parse_keyword(Keyword::BEGIN) {
            return self.parse_begin_end_body();
        }
        let mut statements = Vec::new();
        while !self.at_batch_boundary() {
            statements.push(self.parse_statement_dispatch()?);
            self.next_token_if_is(&Token::new(TokenKind::Semicolon, ";", 0, 0));
        }
        Ok(statements)
    }

    fn parse_create_trigger_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::ON)?;
        let (trigger_scope, trigger_object) = if self.parse_word_ci("ALL") {
            self.expect_word_ci("SERVER")?;
            (TriggerScope::AllServer, None)
        } else if self.parse_keyword(Keyword::DATABASE) {
            (TriggerScope::Database, None)
        } else {
            (TriggerScope::Object, Some(self.parse_schema_object_name()?))
        };
        let with_options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, _)| name)
                .collect()
        } else {
            Vec::new()
        };
        let trigger_type = if self.parse_keyword(Keyword::FOR) {
            TriggerType::For
        } else if self.parse_word_ci("AFTER") {
            TriggerType::After
        } else {
            self.expect_keyword(Keyword::INSTEAD)?;
            self.expect_keyword(Keyword::OF)?;
            TriggerType::InsteadOf
        };
        let event_types = self.parse_comma_separated(Parser::parse_trigger_event_type)?;
        let not_for_replication = if self.parse_keyword(Keyword::NOT) {
            self.expect_word_ci("FOR")?;
            self.expect_keyword(Keyword::REPLICATION)?;
            true
        } else {
            false
        };
        self.expect_keyword(Keyword::AS)?;
        let external_name = if self.parse_word_ci("EXTERNAL") {
            self.expect_word_ci("NAME")?;
            Some(self.parse_identifier()?.value.clone())
        } else {
            None
        };
        let statement_list = if external_name.is_some() {
            None
        } else {
            Some(self.parse_statement_list_until_batch_end()?)
        };
        Ok(Statement::CreateTrigger(Box::new(CreateTriggerStatement {
            name,
            trigger_scope,
            trigger_object,
            with_options,
            trigger_type,
            event_types,
            not_for_replication,
            statement_list,
            external_name,
        })))
    }

    /// A trigger event word (`INSERT`, `UPDATE`, `DELETE`, or for
    /// database/server-scoped triggers a generic DDL event like
    /// `CREATE_TABLE`) converted from underscore-separated to PascalCase
    /// (spec §4.4).
    fn parse_trigger_event_type(&mut self) -> Result<String, ParserError> {
        let raw = self.parse_raw_word("a trigger event")?;
        Ok(pascal_case_underscored(&raw))
    }

    fn parse_create_schema_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_identifier()?;
        let authorization = if self.parse_keyword(Keyword::AUTHORIZATION) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(Statement::CreateSchema(Box::new(CreateSchemaStatement {
            name,
            authorization,
        })))
    }

    fn parse_create_database_statement(&mut self) -> Result<Statement, ParserError> {
        let name = self.parse_identifier()?;
        let attach_mode = if self.parse_keyword(Keyword::ON) {
            AttachMode::None
        } else {
            AttachMode::None
        };
        let attach_mode = if self.parse_word_ci("FOR") {
            if self.parse_word_ci("ATTACH_REBUILD_LOG") {
                AttachMode::AttachRebuildLog
            } else {
                self.expect_word_ci("ATTACH")?;
                AttachMode::Attach
            }
        } else {
            attach_mode
        };
        let containment = if self.parse_word_ci("CONTAINMENT") {
            self.expect_punct(TokenKind::Equal, "=")?;
            Some(self.parse_raw_word("a containment value")?)
        } else {
            None
        };
        Ok(Statement::CreateDatabase(Box::new(CreateDatabaseStatement {
            name,
            attach_mode,
            containment,
        })))
    }

    fn parse_create_index_statement(
        &mut self,
        unique: bool,
        clustered: Option<bool>,
    ) -> Result<Statement, ParserError> {
        let name = self.parse_identifier()?;
        self.expect_keyword(Keyword::ON)?;
        let on_table = self.parse_schema_object_name()?;
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let columns = self.parse_comma_separated(Parser::parse_column_with_sort_order)?;
        self.expect_punct(TokenKind::RightParen, ")")?;
        let included_columns = if self.parse_word_ci("INCLUDE") {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        let where_clause = if self.parse_keyword(Keyword::WHERE) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        let options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, value)| TableOption { name, value })
                .collect()
        } else {
            Vec::new()
        };
        Ok(Statement::CreateIndex(Box::new(CreateIndexStatement {
            name,
            unique,
            clustered,
            on_table,
            columns,
            included_columns,
            where_clause,
            options,
        })))
    }

    fn parse_alter_table_statement(&mut self) -> Result<Statement, ParserError> {
        let schema_object_name = self.parse_schema_object_name()?;
        let action = if self.parse_keyword(Keyword::ADD) {
            let mut columns = Vec::new();
            let mut constraints = Vec::new();
            self.parse_comma_separated(|p| {
                if p.looks_like_table_constraint_start() {
                    constraints.push(p.parse_table_constraint()?);
                } else {
                    columns.push(p.parse_column_definition()?);
                }
                Ok(())
            })?;
            AlterTableAction::AddTableElements { columns, constraints }
        } else if self.parse_keyword(Keyword::DROP) {
            let mut constraint_names = Vec::new();
            let mut column_names = Vec::new();
            if self.parse_keyword(Keyword::CONSTRAINT) {
                constraint_names = self.parse_comma_separated(Parser::parse_identifier)?;
            } else {
                self.parse_keyword(Keyword::COLUMN);
                column_names = self.parse_comma_separated(Parser::parse_identifier)?;
            }
            AlterTableAction::DropTableElements {
                constraint_names,
                column_names,
            }
        } else {
            self.expect_keyword(Keyword::ALTER)?;
            self.expect_keyword(Keyword::COLUMN)?;
            let column = self.parse_column_definition()?;
            AlterTableAction::AlterColumn { column }
        };
        Ok(Statement::AlterTable(Box::new(AlterTableStatement {
            schema_object_name,
            action,
        })))
    }

    fn parse_alter_index_statement(&mut self) -> Result<Statement, ParserError> {
        let all = self.parse_keyword(Keyword::ALL);
        let name = if all { None } else { Some(self.parse_identifier()?) };
        self.expect_keyword(Keyword::ON)?;
        let on_table = self.parse_schema_object_name()?;
        let alter_index_type = if self.parse_keyword(Keyword::REBUILD) {
            AlterIndexType::Rebuild
        } else if self.parse_word_ci("REORGANIZE") {
            AlterIndexType::Reorganize
        } else if self.parse_keyword(Keyword::DISABLE) {
            AlterIndexType::Disable
        } else if self.parse_keyword(Keyword::SET) {
            AlterIndexType::Set
        } else if self.parse_keyword(Keyword::RESUME) {
            AlterIndexType::Resume
        } else if self.parse_keyword(Keyword::PAUSE) {
            AlterIndexType::Pause
        } else if self.parse_keyword(Keyword::ABORT) {
            AlterIndexType::Abort
        } else {
            let found = self.peek_token().cloned();
            return self.expected("REBUILD, REORGANIZE, DISABLE, SET, RESUME, PAUSE, or ABORT", found);
        };
        let partition_number = if self.parse_word_ci("PARTITION") {
            self.expect_punct(TokenKind::Equal, "=")?;
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        let options = if self.parse_keyword(Keyword::WITH) {
            self.parse_paren_options()?
                .into_iter()
                .map(|(name, value)| TableOption { name, value })
                .collect()
        } else {
            Vec::new()
        };
        Ok(Statement::AlterIndex(Box::new(AlterIndexStatement {
            name,
            all,
            on_table,
            alter_index_type,
            partition_number,
            options,
        })))
    }
}

fn pascal_case_underscored(raw: &str) -> String {
    raw.split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("")
}
