use std::rc::Rc;

use tsql_ast::{
    AssignmentOperator, BinaryOperator, BooleanBinaryOperator, BooleanComparisonType,
    BooleanExpression, BooleanTernaryOperator, ColumnType, ExpressionWithSortOrder, FunctionCall,
    GraphMatchCompositeExpression, GraphMatchEdgeExpression, GraphMatchExpression,
    GraphMatchNodeExpression, Identifier, JsonKeyValue, NullsHandling, OnNullMode, OverClause,
    ScalarExpression, SearchedCaseWhen, SimpleCaseWhen, SortOrder, SubqueryComparisonPredicateType,
    UnaryOperator, UniqueRowFilter, WindowDelimiter, WindowFrame, WindowFrameType,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// Parses a scalar expression (spec §4.3's scalar precedence ladder).
    pub fn parse_scalar_expression(&mut self) -> Result<ScalarExpression, ParserError> {
        self.parse_scalar_subexpr(0)
    }

    fn scalar_infix_precedence(&mut self) -> u8 {
        let precedence = match self.peek_token().map(|t| &t.kind) {
            Some(TokenKind::Plus) | Some(TokenKind::Minus) => 10,
            Some(TokenKind::Asterisk) | Some(TokenKind::Slash) | Some(TokenKind::Percent) => 20,
            Some(TokenKind::Ampersand) | Some(TokenKind::Pipe) | Some(TokenKind::Caret) => 5,
            _ => 0,
        };
        precedence
    }

    fn parse_scalar_subexpr(&mut self, precedence: u8) -> Result<ScalarExpression, ParserError> {
        let mut expr = self.parse_scalar_prefix()?;
        if self.parse_keyword(Keyword::AT) {
            self.expect_keyword(Keyword::ZONE)?;
            let time_zone = self.parse_scalar_subexpr(30)?;
            expr = ScalarExpression::AtTimeZoneCall {
                date_value: Box::new(expr),
                time_zone: Box::new(time_zone),
            };
        }
        loop {
            let next_precedence = self.scalar_infix_precedence();
            if precedence >= next_precedence || next_precedence == 0 {
                break;
            }
            let op_token = self.next_token().expect("precedence check guarantees a token");
            let op = binary_operator_for(&op_token.kind)
                .ok_or_else(|| ParserError::from(format!("unexpected operator {}", op_token)))?;
            let right = self.parse_scalar_subexpr(next_precedence)?;
            expr = ScalarExpression::BinaryExpression {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_scalar_prefix(&mut self) -> Result<ScalarExpression, ParserError> {
        let token = match self.peek_token().cloned() {
            Some(t) => t,
            None => return self.expected("an expression", None::<&str>),
        };
        match &token.kind {
            TokenKind::IntegerLiteral => {
                self.next_token();
                Ok(ScalarExpression::IntegerLiteral { value: token.text })
            }
            TokenKind::RealLiteral => {
                self.next_token();
                Ok(ScalarExpression::RealLiteral { value: token.text })
            }
            TokenKind::MoneyLiteral => {
                self.next_token();
                Ok(ScalarExpression::MoneyLiteral { value: token.text })
            }
            TokenKind::StringLiteral { national } => {
                self.next_token();
                Ok(ScalarExpression::StringLiteral {
                    value: strip_quotes(&token.text),
                    is_national: *national,
                })
            }
            TokenKind::BinaryLiteral => {
                self.next_token();
                Ok(ScalarExpression::BinaryLiteral { value: token.text })
            }
            TokenKind::Variable => {
                self.next_token();
                Ok(ScalarExpression::VariableReference { name: token.text })
            }
            TokenKind::GlobalVariable => {
                self.next_token();
                Ok(ScalarExpression::GlobalVariableExpression { name: token.text })
            }
            TokenKind::PseudoColumn => {
                self.next_token();
                Ok(ScalarExpression::ColumnReferenceExpression {
                    column_type: pseudo_column_type(&token.text),
                    multi_part_identifier: tsql_ast::MultiPartIdentifier::new(vec![
                        Identifier::plain(token.text),
                    ]),
                })
            }
            TokenKind::Minus => {
                self.next_token();
                Ok(ScalarExpression::UnaryExpression {
                    op: UnaryOperator::Negative,
                    expression: Box::new(self.parse_scalar_subexpr(25)?),
                })
            }
            TokenKind::Plus => {
                self.next_token();
                Ok(ScalarExpression::UnaryExpression {
                    op: UnaryOperator::Positive,
                    expression: Box::new(self.parse_scalar_subexpr(25)?),
                })
            }
            TokenKind::Tilde => {
                self.next_token();
                Ok(ScalarExpression::UnaryExpression {
                    op: UnaryOperator::BitwiseNot,
                    expression: Box::new(self.parse_scalar_subexpr(25)?),
                })
            }
            TokenKind::LeftParen => {
                self.next_token();
                if self.peek_token().map(|t| t.is_keyword(Keyword::SELECT)).unwrap_or(false) {
                    let query = self.parse_query_expression()?;
                    self.expect_punct(TokenKind::RightParen, ")")?;
                    Ok(ScalarExpression::ScalarSubquery {
                        query_expression: Box::new(query),
                    })
                } else {
                    let inner = self.parse_scalar_expression()?;
                    self.expect_punct(TokenKind::RightParen, ")")?;
                    Ok(ScalarExpression::ParenthesisExpression {
                        expression: Box::new(inner),
                    })
                }
            }
            TokenKind::Keyword(Keyword::NULL) => {
                self.next_token();
                Ok(ScalarExpression::NullLiteral)
            }
            TokenKind::Keyword(Keyword::DEFAULT) => {
                self.next_token();
                Ok(ScalarExpression::DefaultLiteral)
            }
            TokenKind::Keyword(Keyword::MAX) => {
                self.next_token();
                Ok(ScalarExpression::MaxLiteral)
            }
            TokenKind::Keyword(Keyword::CASE) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::CAST) | TokenKind::Keyword(Keyword::TRY_CAST) => {
                self.parse_cast_call()
            }
            TokenKind::Keyword(Keyword::CONVERT) | TokenKind::Keyword(Keyword::TRY_CONVERT) => {
                self.parse_convert_call()
            }
            TokenKind::Keyword(Keyword::PARSE) | TokenKind::Keyword(Keyword::TRY_PARSE) => {
                self.parse_parse_call()
            }
            TokenKind::Keyword(Keyword::IIF) => self.parse_iif_call(),
            TokenKind::Keyword(Keyword::LEFT) => {
                self.next_token();
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let parameters = self.parse_comma_separated(Parser::parse_scalar_expression)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                Ok(ScalarExpression::LeftFunctionCall { parameters })
            }
            TokenKind::Keyword(Keyword::RIGHT) => {
                self.next_token();
                self.expect_punct(TokenKind::LeftParen, "(")?;
                let parameters = self.parse_comma_separated(Parser::parse_scalar_expression)?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                Ok(ScalarExpression::RightFunctionCall { parameters })
            }
            TokenKind::Keyword(Keyword::NEXT) => {
                self.next_token();
                self.expect_keywords(&[Keyword::VALUE, Keyword::FOR])?;
                let sequence_name = self.parse_multi_part_identifier()?;
                let over_clause = if self.parse_keyword(Keyword::OVER) {
                    Some(Box::new(self.parse_over_clause()?))
                } else {
                    None
                };
                Ok(ScalarExpression::NextValueForExpression {
                    sequence_name,
                    over_clause,
                })
            }
            TokenKind::Identifier
            | TokenKind::QuotedIdentifier(_)
            | TokenKind::Keyword(_) => self.parse_identifier_led_expression(),
            _ => self.expected("an expression", Some(token)),
        }
    }

    fn parse_identifier_led_expression(&mut self) -> Result<ScalarExpression, ParserError> {
        if self.peek_token().map(|t| t.is_word_ci("$PARTITION")).unwrap_or(false) {
            self.next_token();
            self.expect_punct(TokenKind::Dot, ".")?;
            let function_name = self.parse_identifier()?;
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let parameters = self.parse_comma_separated(Parser::parse_scalar_expression)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(ScalarExpression::PartitionFunctionCall {
                function_name,
                parameters,
            });
        }

        let first = self.parse_identifier()?;
        let mut parts = vec![first.clone()];
        let mut call_target: Option<tsql_ast::MultiPartIdentifier> = None;
        while self.peek_token().map(|t| t.kind == TokenKind::Dot).unwrap_or(false) {
            self.next_token();
            parts.push(self.parse_identifier()?);
        }

        if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
            let function_name = parts.pop().unwrap();
            if !parts.is_empty() {
                call_target = Some(tsql_ast::MultiPartIdentifier::new(parts));
            }
            return self.parse_function_call_tail(call_target, function_name);
        }

        Ok(ScalarExpression::ColumnReferenceExpression {
            column_type: ColumnType::Regular,
            multi_part_identifier: tsql_ast::MultiPartIdentifier::new(parts),
        })
    }

    fn parse_function_call_tail(
        &mut self,
        call_target: Option<tsql_ast::MultiPartIdentifier>,
        function_name: Rc<Identifier>,
    ) -> Result<ScalarExpression, ParserError> {
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let unique_row_filter = if self.parse_keyword(Keyword::DISTINCT) {
            UniqueRowFilter::Distinct
        } else if self.parse_keyword(Keyword::ALL) {
            UniqueRowFilter::All
        } else {
            UniqueRowFilter::NotSpecified
        };

        let mut parameters = Vec::new();
        let mut json_pairs = Vec::new();
        if !self.peek_token().map(|t| t.kind == TokenKind::RightParen).unwrap_or(true) {
            if self.looks_like_json_object_args() {
                json_pairs = self.parse_comma_separated(Parser::parse_json_key_value)?;
            } else if function_name.value.eq_ignore_ascii_case("count")
                && self.peek_token().map(|t| t.kind == TokenKind::Asterisk).unwrap_or(false)
            {
                self.next_token();
                parameters.push(ScalarExpression::IdentifierLiteral {
                    value: "*".to_string(),
                });
            } else {
                parameters = self.parse_comma_separated(Parser::parse_scalar_expression)?;
            }
        }
        self.expect_punct(TokenKind::RightParen, ")")?;

        let absent_or_null_on_null = if self.parse_keyword(Keyword::ABSENT) {
            self.expect_keywords(&[Keyword::ON, Keyword::NULL])?;
            Some(OnNullMode::AbsentOnNull)
        } else if self.peek_is_word_ci("NULL") && self.parse_word_ci("NULL") {
            self.expect_keywords(&[Keyword::ON, Keyword::NULL])?;
            Some(OnNullMode::NullOnNull)
        } else {
            None
        };

        let with_array_wrapper = if self.parse_keyword(Keyword::WITH) {
            self.expect_keywords(&[Keyword::ARRAY, Keyword::WRAPPER])?;
            true
        } else {
            false
        };

        let within_group_clause = if self.parse_keyword(Keyword::WITHIN) {
            self.expect_keyword(Keyword::GROUP)?;
            self.expect_punct(TokenKind::LeftParen, "(")?;
            self.expect_keyword(Keyword::ORDER)?;
            self.expect_keyword(Keyword::BY)?;
            let order_by = self.parse_comma_separated(Parser::parse_expression_with_sort_order)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            Some(order_by)
        } else {
            None
        };

        let filter_clause = if self.parse_keyword(Keyword::FILTER) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            self.expect_keyword(Keyword::WHERE)?;
            let cond = self.parse_boolean_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            Some(Box::new(cond))
        } else {
            None
        };

        let nulls_handling = if self.parse_keyword(Keyword::IGNORE) {
            self.expect_keyword(Keyword::NULLS)?;
            Some(NullsHandling::IgnoreNulls)
        } else if self.parse_keyword(Keyword::RESPECT) {
            self.expect_keyword(Keyword::NULLS)?;
            Some(NullsHandling::RespectNulls)
        } else {
            None
        };

        let over_clause = if self.parse_keyword(Keyword::OVER) {
            Some(self.parse_over_clause()?)
        } else {
            None
        };

        Ok(ScalarExpression::FunctionCall(Box::new(FunctionCall {
            call_target,
            function_name,
            parameters,
            unique_row_filter,
            collation: None,
            over_clause,
            within_group_clause,
            filter_clause,
            nulls_handling,
            json_pairs,
            absent_or_null_on_null,
            with_array_wrapper,
        })))
    }

    fn looks_like_json_object_args(&mut self) -> bool {
        // `key: value` is distinguishable from a plain expression by a bare
        // `:` (`TokenKind::Colon`) following the first token; conservative
        // otherwise.
        self.peek_next_token();
        let second = self.peek_next_token().map(|t| t.kind.clone());
        self.reset_peek_cursor();
        matches!(second, Some(TokenKind::Colon))
    }

    fn parse_json_key_value(&mut self) -> Result<JsonKeyValue, ParserError> {
        let key = self.parse_scalar_expression()?;
        self.expect_punct(TokenKind::Colon, ":")?;
        let value = self.parse_scalar_expression()?;
        Ok(JsonKeyValue { key, value })
    }

    fn parse_over_clause(&mut self) -> Result<OverClause, ParserError> {
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let partition_by = if self.parse_keyword(Keyword::PARTITION) {
            self.expect_keyword(Keyword::BY)?;
            self.parse_comma_separated(Parser::parse_scalar_expression)?
        } else {
            Vec::new()
        };
        let order_by = if self.parse_keyword(Keyword::ORDER) {
            self.expect_keyword(Keyword::BY)?;
            self.parse_comma_separated(Parser::parse_expression_with_sort_order)?
        } else {
            Vec::new()
        };
        let window_frame = if self.peek_token().map(|t| t.is_keyword(Keyword::ROWS) || t.is_keyword(Keyword::RANGE)).unwrap_or(false) {
            Some(self.parse_window_frame()?)
        } else {
            None
        };
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(OverClause {
            partition_by,
            order_by,
            window_frame,
        })
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, ParserError> {
        let frame_type = if self.parse_keyword(Keyword::ROWS) {
            WindowFrameType::Rows
        } else {
            self.expect_keyword(Keyword::RANGE)?;
            WindowFrameType::Range
        };
        if self.parse_keyword(Keyword::BETWEEN) {
            let top = self.parse_window_delimiter()?;
            self.expect_keyword(Keyword::AND)?;
            let bottom = self.parse_window_delimiter()?;
            Ok(WindowFrame {
                frame_type,
                top,
                bottom: Some(bottom),
            })
        } else {
            let top = self.parse_window_delimiter()?;
            Ok(WindowFrame {
                frame_type,
                top,
                bottom: None,
            })
        }
    }

    fn parse_window_delimiter(&mut self) -> Result<WindowDelimiter, ParserError> {
        if self.parse_keyword(Keyword::UNBOUNDED) {
            if self.parse_keyword(Keyword::PRECEDING) {
                return Ok(WindowDelimiter::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::FOLLOWING)?;
            return Ok(WindowDelimiter::UnboundedFollowing);
        }
        if self.parse_keyword(Keyword::CURRENT) {
            self.expect_keyword(Keyword::ROW)?;
            return Ok(WindowDelimiter::CurrentRow);
        }
        let value = self.parse_scalar_expression()?;
        if self.parse_keyword(Keyword::PRECEDING) {
            Ok(WindowDelimiter::ValuePreceding(value))
        } else {
            self.expect_keyword(Keyword::FOLLOWING)?;
            Ok(WindowDelimiter::ValueFollowing(value))
        }
    }

    pub(crate) fn parse_expression_with_sort_order(
        &mut self,
    ) -> Result<ExpressionWithSortOrder, ParserError> {
        let expression = self.parse_scalar_expression()?;
        let sort_order = if self.parse_keyword(Keyword::ASC) {
            SortOrder::Ascending
        } else if self.parse_keyword(Keyword::DESC) {
            SortOrder::Descending
        } else {
            SortOrder::NotSpecified
        };
        Ok(ExpressionWithSortOrder {
            expression,
            sort_order,
        })
    }

    fn parse_case_expression(&mut self) -> Result<ScalarExpression, ParserError> {
        self.expect_keyword(Keyword::CASE)?;
        let input_expression = if !self.peek_token().map(|t| t.is_keyword(Keyword::WHEN)).unwrap_or(false) {
            Some(Box::new(self.parse_scalar_expression()?))
        } else {
            None
        };

        if let Some(input_expression) = input_expression {
            let mut when_clauses = Vec::new();
            while self.parse_keyword(Keyword::WHEN) {
                let when_expression = self.parse_scalar_expression()?;
                self.expect_keyword(Keyword::THEN)?;
                let then_expression = self.parse_scalar_expression()?;
                when_clauses.push(SimpleCaseWhen {
                    when_expression,
                    then_expression,
                });
            }
            let else_expression = if self.parse_keyword(Keyword::ELSE) {
                Some(Box::new(self.parse_scalar_expression()?))
            } else {
                None
            };
            self.expect_keyword(Keyword::END)?;
            Ok(ScalarExpression::SimpleCaseExpression {
                input_expression,
                when_clauses,
                else_expression,
            })
        } else {
            let mut when_clauses = Vec::new();
            while self.parse_keyword(Keyword::WHEN) {
                let when_expression = self.parse_boolean_expression()?;
                self.expect_keyword(Keyword::THEN)?;
                let then_expression = self.parse_scalar_expression()?;
                when_clauses.push(SearchedCaseWhen {
                    when_expression,
                    then_expression,
                });
            }
            let else_expression = if self.parse_keyword(Keyword::ELSE) {
                Some(Box::new(self.parse_scalar_expression()?))
            } else {
                None
            };
            self.expect_keyword(Keyword::END)?;
            Ok(ScalarExpression::SearchedCaseExpression {
                when_clauses,
                else_expression,
            })
        }
    }

    fn parse_cast_call(&mut self) -> Result<ScalarExpression, ParserError> {
        let try_cast = self.parse_keyword(Keyword::TRY_CAST);
        if !try_cast {
            self.expect_keyword(Keyword::CAST)?;
        }
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let parameter = self.parse_scalar_expression()?;
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_data_type_text()?;
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(ScalarExpression::CastCall {
            try_cast,
            parameter: Box::new(parameter),
            data_type,
        })
    }

    fn parse_convert_call(&mut self) -> Result<ScalarExpression, ParserError> {
        let try_convert = self.parse_keyword(Keyword::TRY_CONVERT);
        if !try_convert {
            self.expect_keyword(Keyword::CONVERT)?;
        }
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let data_type = self.parse_data_type_text()?;
        self.expect_punct(TokenKind::Comma, ",")?;
        let parameter = self.parse_scalar_expression()?;
        let style = if self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
            Some(Box::new(self.parse_scalar_expression()?))
        } else {
            None
        };
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(ScalarExpression::ConvertCall {
            try_convert,
            data_type,
            parameter: Box::new(parameter),
            style,
        })
    }

    fn parse_parse_call(&mut self) -> Result<ScalarExpression, ParserError> {
        let try_parse = self.parse_keyword(Keyword::TRY_PARSE);
        if !try_parse {
            self.expect_keyword(Keyword::PARSE)?;
        }
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let parameter = self.parse_scalar_expression()?;
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_data_type_text()?;
        let culture = if self.parse_keyword(Keyword::USING) {
            Some(Box::new(self.parse_scalar_expression()?))
        } else {
            None
        };
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(ScalarExpression::ParseCall {
            try_parse,
            parameter: Box::new(parameter),
            data_type,
            culture,
        })
    }

    fn parse_iif_call(&mut self) -> Result<ScalarExpression, ParserError> {
        self.expect_keyword(Keyword::IIF)?;
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let search_condition = self.parse_boolean_expression()?;
        self.expect_punct(TokenKind::Comma, ",")?;
        let then_expression = self.parse_scalar_expression()?;
        self.expect_punct(TokenKind::Comma, ",")?;
        let else_expression = self.parse_scalar_expression()?;
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(ScalarExpression::IifCall {
            search_condition: Box::new(search_condition),
            then_expression: Box::new(then_expression),
            else_expression: Box::new(else_expression),
        })
    }

    /// Parses a data type reference, rendering it back to its source text
    /// (spec §12: `DataType` is modeled as a thin string, not a full catalog).
    pub fn parse_data_type_text(&mut self) -> Result<String, ParserError> {
        let name_ident = self.parse_identifier()?;
        let mut text = name_ident.value.clone();
        if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
            self.next_token();
            let mut params = Vec::new();
            loop {
                if self.parse_keyword(Keyword::MAX) {
                    params.push("MAX".to_string());
                } else {
                    let tok = match self.next_token() {
                        Some(t) => t,
                        None => return self.expected("a data type parameter", None::<&str>),
                    };
                    params.push(tok.text);
                }
                if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                    break;
                }
            }
            self.expect_punct(TokenKind::RightParen, ")")?;
            text.push('(');
            text.push_str(&params.join(", "));
            text.push(')');
        }
        Ok(text)
    }

    /// Parses a boolean (predicate) expression (spec §4.3's boolean ladder).
    pub fn parse_boolean_expression(&mut self) -> Result<BooleanExpression, ParserError> {
        self.parse_boolean_subexpr(0)
    }

    fn boolean_infix_precedence(&mut self) -> u8 {
        match self.peek_token() {
            Some(t) if t.is_keyword(Keyword::OR) => 5,
            Some(t) if t.is_keyword(Keyword::AND) => 10,
            _ => 0,
        }
    }

    fn parse_boolean_subexpr(&mut self, precedence: u8) -> Result<BooleanExpression, ParserError> {
        let mut expr = self.parse_boolean_prefix()?;
        loop {
            let next_precedence = self.boolean_infix_precedence();
            if precedence >= next_precedence || next_precedence == 0 {
                break;
            }
            let op = if self.parse_keyword(Keyword::AND) {
                BooleanBinaryOperator::And
            } else {
                self.expect_keyword(Keyword::OR)?;
                BooleanBinaryOperator::Or
            };
            let second = self.parse_boolean_subexpr(next_precedence)?;
            expr = BooleanExpression::BooleanBinaryExpression {
                op,
                first: Box::new(expr),
                second: Box::new(second),
            };
        }
        Ok(expr)
    }

    fn parse_boolean_prefix(&mut self) -> Result<BooleanExpression, ParserError> {
        if self.parse_keyword(Keyword::NOT) {
            let inner = self.parse_boolean_subexpr(15)?;
            return Ok(BooleanExpression::BooleanNotExpression {
                expression: Box::new(inner),
            });
        }
        if self.parse_keyword(Keyword::EXISTS) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let subquery = self.parse_query_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(BooleanExpression::ExistsPredicate {
                subquery: Box::new(subquery),
            });
        }
        if self.parse_keyword(Keyword::MATCH) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let expression = self.parse_graph_match_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(BooleanExpression::GraphMatchPredicate {
                expression: Box::new(expression),
            });
        }
        if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false)
            && self.looks_like_parenthesized_boolean()
        {
            self.next_token();
            let inner = self.parse_boolean_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(BooleanExpression::BooleanParenthesisExpression {
                expression: Box::new(inner),
            });
        }

        let first = self.parse_scalar_expression()?;
        self.parse_boolean_predicate_tail(first)
    }

    fn looks_like_parenthesized_boolean(&mut self) -> bool {
        self.peek_next_token().map(|t| {
            t.is_keyword(Keyword::NOT)
                || t.is_keyword(Keyword::EXISTS)
                || t.kind == TokenKind::LeftParen
        }).unwrap_or(false)
    }

    fn parse_boolean_predicate_tail(
        &mut self,
        first: ScalarExpression,
    ) -> Result<BooleanExpression, ParserError> {
        if self.parse_keyword(Keyword::IS) {
            let is_not = self.parse_keyword(Keyword::NOT);
            if self.peek_is_word_ci("DISTINCT") && self.parse_word_ci("DISTINCT") {
                self.expect_keyword(Keyword::FROM)?;
                let second = self.parse_scalar_expression()?;
                return Ok(BooleanExpression::BooleanDistinctFromExpression {
                    first_expression: Box::new(first),
                    second_expression: Box::new(second),
                    not_distinct: is_not,
                });
            }
            self.expect_keyword(Keyword::NULL)?;
            return Ok(BooleanExpression::BooleanIsNullExpression {
                expression: Box::new(first),
                is_not,
            });
        }

        let not_defined = self.parse_keyword(Keyword::NOT);

        if self.parse_keyword(Keyword::LIKE) {
            let second = self.parse_scalar_expression()?;
            let escape_expression = if self.parse_keyword(Keyword::ESCAPE) {
                Some(Box::new(self.parse_scalar_expression()?))
            } else {
                None
            };
            return Ok(BooleanExpression::LikePredicate {
                first_expression: Box::new(first),
                second_expression: Box::new(second),
                not_defined,
                escape_expression,
            });
        }

        if self.parse_keyword(Keyword::IN) {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            if self.peek_token().map(|t| t.is_keyword(Keyword::SELECT)).unwrap_or(false) {
                let subquery = self.parse_query_expression()?;
                self.expect_punct(TokenKind::RightParen, ")")?;
                return Ok(BooleanExpression::InPredicate {
                    expression: Box::new(first),
                    not_defined,
                    subquery: Some(Box::new(subquery)),
                    values: Vec::new(),
                });
            }
            let values = self.parse_comma_separated(Parser::parse_scalar_expression)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(BooleanExpression::InPredicate {
                expression: Box::new(first),
                not_defined,
                subquery: None,
                values,
            });
        }

        if self.parse_keyword(Keyword::BETWEEN) {
            let second = self.parse_scalar_expression()?;
            self.expect_keyword(Keyword::AND)?;
            let third = self.parse_scalar_expression()?;
            let op = if not_defined {
                BooleanTernaryOperator::NotBetween
            } else {
                BooleanTernaryOperator::Between
            };
            return Ok(BooleanExpression::BooleanTernaryExpression {
                op,
                first_expression: Box::new(first),
                second_expression: Box::new(second),
                third_expression: Box::new(third),
            });
        }

        if not_defined {
            return self.expected("LIKE, IN, or BETWEEN after NOT", self.peek_token_display());
        }

        let op = self.parse_boolean_comparison_type()?;
        let comparison_type = if self.parse_keyword(Keyword::ALL) {
            Some(SubqueryComparisonPredicateType::All)
        } else if self.parse_keyword(Keyword::ANY) {
            Some(SubqueryComparisonPredicateType::Any)
        } else if self.parse_keyword(Keyword::SOME) {
            Some(SubqueryComparisonPredicateType::Some)
        } else {
            None
        };
        if let Some(comparison_type) = comparison_type {
            self.expect_punct(TokenKind::LeftParen, "(")?;
            let subquery = self.parse_query_expression()?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            return Ok(BooleanExpression::SubqueryComparisonPredicate {
                op,
                comparison_type,
                expression: Box::new(first),
                subquery: Box::new(subquery),
            });
        }
        let second = self.parse_scalar_expression()?;
        Ok(BooleanExpression::BooleanComparisonExpression {
            op,
            first_expression: Box::new(first),
            second_expression: Box::new(second),
        })
    }

    fn peek_token_display(&mut self) -> Option<Token> {
        self.peek_token().cloned()
    }

    fn parse_boolean_comparison_type(&mut self) -> Result<BooleanComparisonType, ParserError> {
        let token = match self.next_token() {
            Some(t) => t,
            None => return self.expected("a comparison operator", None::<&str>),
        };
        match token.kind {
            TokenKind::Equal => Ok(BooleanComparisonType::Equals),
            TokenKind::NotEqualBrackets => Ok(BooleanComparisonType::NotEqualToBrackets),
            TokenKind::NotEqualExclaim => Ok(BooleanComparisonType::NotEqualToExclamation),
            TokenKind::LessThan => Ok(BooleanComparisonType::LessThan),
            TokenKind::GreaterThan => Ok(BooleanComparisonType::GreaterThan),
            TokenKind::LessThanOrEqual => Ok(BooleanComparisonType::LessThanOrEqualTo),
            TokenKind::GreaterThanOrEqual => Ok(BooleanComparisonType::GreaterThanOrEqualTo),
            _ => self.expected("a comparison operator", Some(token)),
        }
    }

    fn parse_graph_match_expression(&mut self) -> Result<GraphMatchExpression, ParserError> {
        self.parse_graph_match_expression_with_shared_left(None)
    }

    /// `shared_left`, when given, is reused as this composite's `left_node`
    /// instead of allocating a fresh one, so a node named identically to the
    /// previous composite's `right_node` shares its `Rc` identity (spec §9):
    /// `A-(e1)->B AND B-(e2)->C` parses `B` once as text but once as a node.
    fn parse_graph_match_expression_with_shared_left(
        &mut self,
        shared_left: Option<Rc<GraphMatchNodeExpression>>,
    ) -> Result<GraphMatchExpression, ParserError> {
        let first = self.parse_graph_match_composite(shared_left)?;
        if self.parse_keyword(Keyword::AND) {
            let shared = Rc::clone(&first.right_node);
            let second = self.parse_graph_match_expression_with_shared_left(Some(shared))?;
            Ok(GraphMatchExpression::Chain {
                first: Box::new(GraphMatchExpression::Composite(first)),
                second: Box::new(second),
            })
        } else {
            Ok(GraphMatchExpression::Composite(first))
        }
    }

    fn parse_graph_match_composite(
        &mut self,
        shared_left: Option<Rc<GraphMatchNodeExpression>>,
    ) -> Result<GraphMatchCompositeExpression, ParserError> {
        let multi_part_identifier = self.parse_multi_part_identifier()?;
        let left_node = match shared_left {
            Some(shared) => shared,
            None => Rc::new(GraphMatchNodeExpression {
                multi_part_identifier,
            }),
        };
        let arrow_on_right = if self.next_token_if_is(&Token::new(TokenKind::Minus, "-", 0, 0)) {
            true
        } else {
            self.expect_punct(TokenKind::LessThan, "<")?;
            self.expect_punct(TokenKind::Minus, "-")?;
            false
        };
        let is_parenthesized = self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0));
        let edge = GraphMatchEdgeExpression {
            multi_part_identifier: self.parse_multi_part_identifier()?,
            is_parenthesized,
        };
        if is_parenthesized {
            self.expect_punct(TokenKind::RightParen, ")")?;
        }
        if arrow_on_right {
            self.expect_punct(TokenKind::Minus, "-")?;
            self.expect_punct(TokenKind::GreaterThan, ">")?;
        } else {
            self.expect_punct(TokenKind::Minus, "-")?;
        }
        let right_node = Rc::new(GraphMatchNodeExpression {
            multi_part_identifier: self.parse_multi_part_identifier()?,
        });
        Ok(GraphMatchCompositeExpression {
            left_node,
            edge,
            right_node,
            arrow_on_right,
        })
    }
}

fn binary_operator_for(kind: &TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Subtract,
        TokenKind::Asterisk => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
        TokenKind::Pipe => BinaryOperator::BitwiseOr,
        TokenKind::Caret => BinaryOperator::BitwiseXor,
        _ => return None,
    })
}

pub(crate) fn assignment_operator_for(kind: &TokenKind) -> Option<AssignmentOperator> {
    Some(match kind {
        TokenKind::Equal => AssignmentOperator::Assign,
        TokenKind::PlusEqual => AssignmentOperator::AddAssign,
        TokenKind::MinusEqual => AssignmentOperator::SubtractAssign,
        TokenKind::AsteriskEqual => AssignmentOperator::MultiplyAssign,
        TokenKind::SlashEqual => AssignmentOperator::DivideAssign,
        TokenKind::PercentEqual => AssignmentOperator::ModuloAssign,
        TokenKind::AmpersandEqual => AssignmentOperator::BitwiseAndAssign,
        TokenKind::PipeEqual => AssignmentOperator::BitwiseOrAssign,
        TokenKind::CaretEqual => AssignmentOperator::BitwiseXorAssign,
        _ => return None,
    })
}

fn pseudo_column_type(text: &str) -> ColumnType {
    if text.eq_ignore_ascii_case("$ACTION") {
        ColumnType::PseudoColumnAction
    } else if text.eq_ignore_ascii_case("$CUID") {
        ColumnType::PseudoColumnCuid
    } else if text.eq_ignore_ascii_case("$node_id") {
        ColumnType::PseudoColumnGraphNodeId
    } else if text.eq_ignore_ascii_case("$edge_id") {
        ColumnType::PseudoColumnGraphEdgeId
    } else if text.eq_ignore_ascii_case("$from_id") {
        ColumnType::PseudoColumnGraphFromId
    } else if text.eq_ignore_ascii_case("$to_id") {
        ColumnType::PseudoColumnGraphToId
    } else {
        ColumnType::Regular
    }
}

pub(crate) fn strip_quotes(text: &str) -> String {
    let without_prefix = if text.starts_with('N') || text.starts_with('n') {
        &text[1..]
    } else {
        text
    };
    let inner = without_prefix
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(without_prefix);
    inner.replace("''", "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn scalar(sql: &str) -> ScalarExpression {
        let mut parser = Parser::new_with_sql(sql).expect("lex should succeed");
        parser
            .parse_scalar_expression()
            .expect("scalar expression should parse")
    }

    fn boolean(sql: &str) -> BooleanExpression {
        let mut parser = Parser::new_with_sql(sql).expect("lex should succeed");
        parser
            .parse_boolean_expression()
            .expect("boolean expression should parse")
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        match scalar("1 + 2 * 3") {
            ScalarExpression::BinaryExpression { op, left, right } => {
                assert_eq!(op, BinaryOperator::Add);
                assert_eq!(*left, ScalarExpression::IntegerLiteral { value: "1".into() });
                match *right {
                    ScalarExpression::BinaryExpression { op, .. } => {
                        assert_eq!(op, BinaryOperator::Multiply)
                    }
                    other => panic!("expected nested multiply, got {other:?}"),
                }
            }
            other => panic!("expected a binary expression, got {other:?}"),
        }
    }

    #[test]
    fn parentheses_override_precedence() {
        match scalar("(1 + 2) * 3") {
            ScalarExpression::BinaryExpression { op, left, .. } => {
                assert_eq!(op, BinaryOperator::Multiply);
                assert!(matches!(*left, ScalarExpression::ParenthesisExpression { .. }));
            }
            other => panic!("expected a binary expression, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_parses_as_unary_expression() {
        match scalar("-x") {
            ScalarExpression::UnaryExpression { op, .. } => assert_eq!(op, UnaryOperator::Negative),
            other => panic!("expected a unary expression, got {other:?}"),
        }
    }

    #[test]
    fn function_call_parses_parameters_in_order() {
        match scalar("ROUND(total, 2)") {
            ScalarExpression::FunctionCall(call) => {
                assert_eq!(call.function_name.value, "ROUND");
                assert_eq!(call.parameters.len(), 2);
            }
            other => panic!("expected a function call, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        match boolean("a = 1 OR b = 2 AND c = 3") {
            BooleanExpression::BooleanBinaryExpression { op, second, .. } => {
                assert_eq!(op, BooleanBinaryOperator::Or);
                assert!(matches!(
                    *second,
                    BooleanExpression::BooleanBinaryExpression {
                        op: BooleanBinaryOperator::And,
                        ..
                    }
                ));
            }
            other => panic!("expected a boolean binary expression, got {other:?}"),
        }
    }

    #[test]
    fn not_wraps_the_following_predicate() {
        assert!(matches!(
            boolean("NOT a = 1"),
            BooleanExpression::BooleanNotExpression { .. }
        ));
    }

    #[test]
    fn graph_match_chain_shares_the_middle_node() {
        let mut parser =
            Parser::new_with_sql("a-(e1)->b AND b-(e2)->c").expect("lex should succeed");
        let expr = parser
            .parse_graph_match_expression()
            .expect("graph match expression should parse");
        match expr {
            GraphMatchExpression::Chain { first, second } => {
                let first = match *first {
                    GraphMatchExpression::Composite(c) => c,
                    other => panic!("expected composite, got {other:?}"),
                };
                let second = match *second {
                    GraphMatchExpression::Composite(c) => c,
                    other => panic!("expected composite, got {other:?}"),
                };
                assert!(Rc::ptr_eq(&first.right_node, &second.left_node));
            }
            other => panic!("expected a chain, got {other:?}"),
        }
    }
}
