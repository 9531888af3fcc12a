use std::rc::Rc;

use tsql_ast::{
    BinaryQueryExpressionType, CommonTableExpression, ForClause, FunctionCallForPivot,
    GroupByClause, Identifier, JoinHint, JoinType, OffsetFetchClause, OpenJsonColumnDefinition,
    QueryExpression, QueryExpressionKind, QuerySpecification, SelectElement, TableReference,
    TopRowFilter, UnqualifiedJoinType, UniqueRowFilter,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// Parses a full query expression: an optional `WITH` clause, a query
    /// body (possibly a `UNION`/`INTERSECT`/`EXCEPT` chain), and the
    /// outermost `ORDER BY`/`OFFSET ... FETCH` clauses (spec §3, §4.4).
    pub fn parse_query_expression(&mut self) -> Result<QueryExpression, ParserError> {
        let with_ctes = if self.parse_keyword(Keyword::WITH) {
            self.parse_comma_separated(Parser::parse_common_table_expression)?
        } else {
            Vec::new()
        };
        let query = self.parse_query_expression_body(0)?;

        let order_by = if self.parse_keyword(Keyword::ORDER) {
            self.expect_keyword(Keyword::BY)?;
            self.parse_comma_separated(Parser::parse_expression_with_sort_order)?
        } else {
            Vec::new()
        };

        let offset_fetch = if self.parse_keyword(Keyword::OFFSET) {
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
            Some(OffsetFetchClause {
                offset_expression,
                fetch_expression,
            })
        } else {
            None
        };

        Ok(QueryExpression {
            with_ctes,
            query,
            order_by,
            top: None,
            offset_fetch,
        })
    }

    pub(crate) fn parse_common_table_expression(
        &mut self,
    ) -> Result<CommonTableExpression, ParserError> {
        let expression_name = self.parse_identifier()?;
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::AS)?;
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let query_expression = Box::new(self.parse_query_expression()?);
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(CommonTableExpression {
            expression_name,
            columns,
            query_expression,
        })
    }

    fn parse_query_expression_body(&mut self, precedence: u8) -> Result<QueryExpressionKind, ParserError> {
        let mut body = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let inner = self.parse_query_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            inner.query
        } else {
            let spec = self.parse_query_specification()?;
            QueryExpressionKind::QuerySpecification(Box::new(spec))
        };

        loop {
            let (op, op_precedence) = match self.peek_binary_query_op() {
                Some((op, prec)) => (op, prec),
                None => break,
            };
            if precedence >= op_precedence {
                break;
            }
            self.next_token();
            let all = self.parse_keyword(Keyword::ALL);
            let _ = self.parse_keyword(Keyword::DISTINCT);
            let first = QueryExpression {
                with_ctes: Vec::new(),
                query: body,
                order_by: Vec::new(),
                top: None,
                offset_fetch: None,
            };
            let second_kind = self.parse_query_expression_body(op_precedence)?;
            let second = QueryExpression {
                with_ctes: Vec::new(),
                query: second_kind,
                order_by: Vec::new(),
                top: None,
                offset_fetch: None,
            };
            body = QueryExpressionKind::BinaryQueryExpression {
                op,
                all,
                first: Box::new(first),
                second: Box::new(second),
            };
        }

        Ok(body)
    }

    fn peek_binary_query_op(&mut self) -> Option<(BinaryQueryExpressionType, u8)> {
        let token = self.peek_token()?;
        if token.is_keyword(Keyword::UNION) {
            Some((BinaryQueryExpressionType::Union, 10))
        } else if token.is_keyword(Keyword::EXCEPT) {
            Some((BinaryQueryExpressionType::Except, 10))
        } else if token.is_keyword(Keyword::INTERSECT) {
            Some((BinaryQueryExpressionType::Intersect, 20))
        } else {
            None
        }
    }

    /// Parses a single `SELECT ... FROM ... WHERE ...` block.
    pub fn parse_query_specification(&mut self) -> Result<QuerySpecification, ParserError> {
        self.expect_keyword(Keyword::SELECT)?;
        self.parse_query_specification_after_select()
    }

    /// Parses the remainder of a query specification assuming the leading
    /// `SELECT` keyword has already been consumed by the caller (the
    /// top-level statement dispatcher peels it off to decide how to route,
    /// spec §4.2).
    pub(crate) fn parse_query_specification_after_select(
        &mut self,
    ) -> Result<QuerySpecification, ParserError> {
        let unique_row_filter = if self.parse_keyword(Keyword::DISTINCT) {
            UniqueRowFilter::Distinct
        } else {
            self.parse_keyword(Keyword::ALL);
            UniqueRowFilter::NotSpecified
        };

        let top = if self.parse_keyword(Keyword::TOP) {
            Some(self.parse_top_row_filter()?)
        } else {
            None
        };

        let select_elements = self.parse_comma_separated(Parser::parse_select_element)?;

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

        let group_by_clause = if self.parse_keyword(Keyword::GROUP) {
            self.expect_keyword(Keyword::BY)?;
            let all = self.parse_keyword(Keyword::ALL);
            let grouping_specifications =
                self.parse_comma_separated(Parser::parse_scalar_expression)?;
            Some(GroupByClause {
                grouping_specifications,
                all,
            })
        } else {
            None
        };

        let having_clause = if self.parse_keyword(Keyword::HAVING) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };

        let for_clause = if self.parse_keyword(Keyword::FOR) {
            if self.parse_keyword(Keyword::XML) {
                Some(ForClause::Xml)
            } else if self.parse_word_ci("JSON") {
                Some(ForClause::Json)
            } else {
                self.expect_word_ci("BROWSE")?;
                Some(ForClause::Browse)
            }
        } else {
            None
        };

        Ok(QuerySpecification {
            unique_row_filter,
            top,
            select_elements,
            from_clause,
            where_clause,
            group_by_clause,
            having_clause,
            for_clause,
        })
    }

    fn parse_top_row_filter(&mut self) -> Result<TopRowFilter, ParserError> {
        let parenthesized = self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0));
        let expression = self.parse_scalar_expression()?;
        if parenthesized {
            self.expect_punct(TokenKind::RightParen, ")")?;
        }
        let percent = self.parse_word_ci("PERCENT");
        let with_ties = if self.parse_keyword(Keyword::WITH) {
            self.expect_word_ci("TIES")?;
            true
        } else {
            false
        };
        Ok(TopRowFilter {
            expression,
            percent,
            with_ties,
        })
    }

    fn parse_select_element(&mut self) -> Result<SelectElement, ParserError> {
        if self.peek_token().map(|t| t.kind == TokenKind::Asterisk).unwrap_or(false) {
            self.next_token();
            return Ok(SelectElement::SelectStarExpression { qualifier: None });
        }
        if let Some(TokenKind::Variable) = self.peek_token().map(|t| t.kind.clone()) {
            if self
                .peek_next_token()
                .map(|t| t.kind == TokenKind::Equal)
                .unwrap_or(false)
            {
                let variable_name = self.next_token().unwrap().text;
                self.next_token();
                let expression = self.parse_scalar_expression()?;
                return Ok(SelectElement::SelectSetVariable {
                    variable_name,
                    expression,
                });
            }
        }

        let expression = self.parse_scalar_expression()?;
        let column_name = if self.parse_keyword(Keyword::AS) {
            Some(self.parse_identifier()?)
        } else if matches!(
            self.peek_token().map(|t| t.kind.clone()),
            Some(TokenKind::Identifier) | Some(TokenKind::QuotedIdentifier(_))
        ) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(SelectElement::SelectScalarExpression {
            expression,
            column_name,
        })
    }

    /// Parses a single FROM-clause table source, including any joins chained
    /// onto it (spec §3, §4.4).
    pub fn parse_table_reference(&mut self) -> Result<TableReference, ParserError> {
        let mut reference = self.parse_table_primary()?;
        loop {
            reference = if self.parse_keyword(Keyword::CROSS) {
                if self.parse_keyword(Keyword::APPLY) {
                    let second = self.parse_table_primary()?;
                    TableReference::UnqualifiedJoin {
                        first_table_reference: Box::new(reference),
                        second_table_reference: Box::new(second),
                        unqualified_join_type: UnqualifiedJoinType::CrossApply,
                    }
                } else {
                    self.expect_keyword(Keyword::JOIN)?;
                    let second = self.parse_table_primary()?;
                    TableReference::UnqualifiedJoin {
                        first_table_reference: Box::new(reference),
                        second_table_reference: Box::new(second),
                        unqualified_join_type: UnqualifiedJoinType::CrossJoin,
                    }
                }
            } else if self.parse_keyword(Keyword::OUTER) {
                self.expect_keyword(Keyword::APPLY)?;
                let second = self.parse_table_primary()?;
                TableReference::UnqualifiedJoin {
                    first_table_reference: Box::new(reference),
                    second_table_reference: Box::new(second),
                    unqualified_join_type: UnqualifiedJoinType::OuterApply,
                }
            } else if let Some(join_type) = self.parse_qualified_join_type() {
                self.expect_keyword(Keyword::JOIN)?;
                let second = self.parse_table_primary()?;
                let join_hint = self.parse_join_hint();
                self.expect_keyword(Keyword::ON)?;
                let search_condition = Some(self.parse_boolean_expression()?);
                TableReference::QualifiedJoin {
                    first_table_reference: Box::new(reference),
                    second_table_reference: Box::new(second),
                    join_type,
                    join_hint,
                    search_condition,
                }
            } else {
                break;
            };
        }
        Ok(reference)
    }

    fn parse_qualified_join_type(&mut self) -> Option<JoinType> {
        if self.parse_keyword(Keyword::INNER) {
            return Some(JoinType::Inner);
        }
        if self.parse_keyword(Keyword::LEFT) {
            self.parse_keyword(Keyword::OUTER);
            return Some(JoinType::LeftOuter);
        }
        if self.parse_keyword(Keyword::RIGHT) {
            self.parse_keyword(Keyword::OUTER);
            return Some(JoinType::RightOuter);
        }
        if self.parse_keyword(Keyword::FULL) {
            self.parse_keyword(Keyword::OUTER);
            return Some(JoinType::FullOuter);
        }
        if self.peek_token().map(|t| t.is_keyword(Keyword::JOIN)).unwrap_or(false) {
            return Some(JoinType::Inner);
        }
        None
    }

    fn parse_join_hint(&mut self) -> JoinHint {
        if self.parse_word_ci("LOOP") {
            JoinHint::Loop
        } else if self.parse_keyword(Keyword::HASH) {
            JoinHint::Hash
        } else if self.parse_keyword(Keyword::MERGE) {
            JoinHint::Merge
        } else if self.parse_keyword(Keyword::REMOTE) {
            JoinHint::Remote
        } else {
            JoinHint::None
        }
    }

    fn parse_table_primary(&mut self) -> Result<TableReference, ParserError> {
        let mut reference = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            if self.peek_token().map(|t| t.is_keyword(Keyword::SELECT) || t.is_keyword(Keyword::WITH)).unwrap_or(false) {
                let query_expression = Box::new(self.parse_query_expression()?);
                self.expect_punct(TokenKind::RightParen, ")")?;
                let alias = self.parse_table_alias();
                TableReference::QueryDerivedTable {
                    query_expression,
                    alias,
                    columns: Vec::new(),
                }
            } else if self.peek_token().map(|t| t.is_keyword(Keyword::VALUES)).unwrap_or(false) {
                self.next_token();
                let row_values = self.parse_comma_separated(|p| {
                    p.expect_punct(TokenKind::LeftParen, "(")?;
                    let row = p.parse_comma_separated(Parser::parse_scalar_expression)?;
                    p.expect_punct(TokenKind::RightParen, ")")?;
                    Ok(row)
                })?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                let alias = self.parse_table_alias();
                TableReference::InlineDerivedTable {
                    row_values,
                    alias,
                    columns: Vec::new(),
                }
            } else {
                let inner = self.parse_table_reference()?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                inner
            }
        } else if self.parse_keyword(Keyword::OPENJSON) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let variable = self.parse_scalar_expression()?;
            let path = if self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            self.expect_punct(TokenKind::RightParen, ")")?;
            let schema_declaration = if self.parse_keyword(Keyword::WITH) {
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let cols = self.parse_comma_separated(Parser::parse_openjson_column)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                cols
            } else {
                Vec::new()
            };
            let alias = self.parse_table_alias();
            TableReference::OpenJsonTableReference {
                variable,
                path,
                schema_declaration,
                alias,
            }
        } else {
            let schema_object = self.parse_schema_object_name()?;
            if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
                self.next_token();
                let parameters = if !self.peek_token().map(|t| t.kind == TokenKind::RightParen).unwrap_or(true) {
                    self.parse_comma_separated(Parser::parse_scalar_expression)?
                } else {
                    Vec::new()
                };
                self.expect_punct(TokenKind::RightParen, ")")?;
                let alias = self.parse_table_alias();
                TableReference::SchemaObjectFunctionTableReference {
                    schema_object,
                    parameters,
                    alias,
                }
            } else {
                let alias = self.parse_table_alias();
                let table_hints = if self.parse_keyword(Keyword::WITH) {
                    let opts = self.parse_paren_options()?;
                    opts.into_iter().map(|(name, _)| name).collect()
                } else {
                    Vec::new()
                };
                TableReference::NamedTableReference {
                    schema_object,
                    alias,
                    table_hints,
                }
            }
        };

        loop {
            reference = if self.parse_keyword(Keyword::PIVOT) {
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let pivot_function = self.parse_pivot_function()?;
                self.expect_keyword(Keyword::FOR)?;
                let for_column = self.parse_identifier()?;
                self.expect_keyword(Keyword::IN)?;
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let in_columns = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                let alias = self.parse_table_alias();
                TableReference::PivotedTableReference {
                    table_reference: Box::new(reference),
                    pivot_function,
                    for_column,
                    in_columns,
                    alias,
                }
            } else if self.parse_keyword(Keyword::UNPIVOT) {
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let value_column = self.parse_identifier()?;
                self.expect_keyword(Keyword::FOR)?;
                let for_column = self.parse_identifier()?;
                self.expect_keyword(Keyword::IN)?;
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let in_columns = self.parse_comma_separated(Parser::parse_identifier)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                let alias = self.parse_table_alias();
                TableReference::UnpivotedTableReference {
                    table_reference: Box::new(reference),
                    value_column,
                    for_column,
                    in_columns,
                    alias,
                }
            } else {
                break;
            };
        }

        Ok(reference)
    }

    fn parse_pivot_function(&mut self) -> Result<FunctionCallForPivot, ParserError> {
        let function_name = self.parse_identifier()?;
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let parameters = if !self.peek_token().map(|t| t.kind == TokenKind::RightParen).unwrap_or(true) {
            self.parse_comma_separated(Parser::parse_scalar_expression)?
        } else {
            Vec::new()
        };
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(FunctionCallForPivot {
            function_name,
            parameters,
        })
    }

    fn parse_openjson_column(&mut self) -> Result<OpenJsonColumnDefinition, ParserError> {
        let column_name = self.parse_identifier()?;
        let data_type = self.parse_data_type_text()?;
        let path = if matches!(self.peek_token().map(|t| t.kind.clone()), Some(TokenKind::StringLiteral { .. })) {
            let token = self.next_token().unwrap();
            Some(token.text)
        } else {
            None
        };
        Ok(OpenJsonColumnDefinition {
            column_name,
            data_type,
            path,
        })
    }

    fn parse_table_alias(&mut self) -> Option<Rc<Identifier>> {
        if self.parse_keyword(Keyword::AS) {
            return self.parse_identifier().ok();
        }
        match self.peek_token().map(|t| t.kind.clone()) {
            Some(TokenKind::Identifier) | Some(TokenKind::QuotedIdentifier(_)) => {
                self.parse_identifier().ok()
            }
            _ => None,
        }
    }
}
