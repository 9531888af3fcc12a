mod expression;
mod query;
mod statement;

use std::fmt::Display;
use std::rc::Rc;

use tsql_ast::{Identifier, MultiPartIdentifier, QuoteType, SchemaObjectName};
use tsql_lexer::{Keyword, Lexer, QuoteKind, Token, TokenKind};

use crate::error::{parse_error, ParserError};
use crate::peek::{MultiPeek, PeekIteratorExt};

/// T-SQL parser: converts a token stream into the [`tsql_ast`] tree.
pub struct Parser {
    iter: MultiPeek<std::vec::IntoIter<Token>>,
}

impl Parser {
    /// Creates a new parser from an already-tokenized stream.
    pub fn new_with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            iter: tokens.into_iter().multipeek(),
        }
    }

    /// Lexes `sql` and creates a parser over the resulting tokens.
    pub fn new_with_sql(sql: &str) -> Result<Self, ParserError> {
        let tokens = Lexer::new(sql).tokenize()?;
        Ok(Self::new_with_tokens(tokens))
    }

    /// Parse a comma-separated list of 1+ items accepted by `f`.
    pub fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                break;
            }
        }
        Ok(values)
    }

    /// Report an unexpected token.
    pub fn expected<R>(
        &self,
        expected: impl Display,
        found: Option<impl Display>,
    ) -> Result<R, ParserError> {
        if let Some(found) = found {
            parse_error(format!("Expected: {}, found: {}", expected, found))
        } else {
            parse_error(format!("Expected: {}, but not found", expected))
        }
    }

    /// Consumes the next token if it is the given keyword, returning ok on
    /// success or a `ParserError` describing what was actually found.
    pub fn expect_keyword(&mut self, expected: Keyword) -> Result<(), ParserError> {
        if self.parse_keyword(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected.as_str(), found)
        }
    }

    /// Consumes a run of keyword tokens, failing on the first mismatch.
    pub fn expect_keywords(&mut self, expected: &[Keyword]) -> Result<(), ParserError> {
        for &kw in expected {
            self.expect_keyword(kw)?;
        }
        Ok(())
    }

    /// Consumes the next token if it is one of the given keywords.
    pub fn expect_one_of_keywords(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParserError> {
        if let Some(keyword) = self.parse_one_of_keywords(keywords) {
            Ok(keyword)
        } else {
            let found = self.peek_token().cloned();
            self.expected(format!("one of {:?}", keywords), found)
        }
    }

    /// Consumes the next token and returns true if it matches `keyword`.
    pub fn parse_keyword(&mut self, keyword: Keyword) -> bool {
        self.next_token_if(|token| token.is_keyword(keyword)).is_some()
    }

    /// Consumes a run of keyword tokens if every one of them matches; leaves
    /// the stream untouched otherwise.
    pub fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        for &keyword in keywords {
            match self.peek_next_token() {
                Some(token) if token.is_keyword(keyword) => {}
                _ => {
                    self.reset_peek_cursor();
                    return false;
                }
            }
        }
        for _ in 0..keywords.len() {
            self.next_token();
        }
        true
    }

    /// Consumes the next token if it is one of the given keywords.
    pub fn parse_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        let matched = match self.peek_token() {
            Some(token) => keywords.iter().copied().find(|kw| token.is_keyword(*kw)),
            None => None,
        };
        if matched.is_some() {
            self.next_token();
        }
        matched
    }

    /// Checks whether the current token's text equals `word`, case-insensitively,
    /// without requiring `word` to be in the keyword table (spec §9).
    pub fn peek_is_word_ci(&mut self, word: &str) -> bool {
        self.peek_token().map(|t| t.is_word_ci(word)).unwrap_or(false)
    }

    /// Consumes the current token if its text equals `word` case-insensitively.
    pub fn parse_word_ci(&mut self, word: &str) -> bool {
        self.next_token_if(|t| t.is_word_ci(word)).is_some()
    }

    /// Consumes the current token if its text equals `word` case-insensitively,
    /// otherwise returns a `ParserError`.
    pub fn expect_word_ci(&mut self, word: &str) -> Result<(), ParserError> {
        if self.parse_word_ci(word) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(word, found)
        }
    }

    /// Consumes the next token and returns ok if it matches `expected`.
    pub fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        if self.next_token_if_is(expected) {
            Ok(())
        } else {
            let found = self.peek_token().cloned();
            self.expected(expected, found)
        }
    }

    /// Convenience wrapper over [`expect_token`](Self::expect_token) for the
    /// punctuation-only `TokenKind` variants.
    pub fn expect_punct(&mut self, kind: TokenKind, text: &str) -> Result<(), ParserError> {
        self.expect_token(&Token::new(kind, text, 0, 0))
    }

    /// Returns a reference to the `next_token()` value without advancing.
    pub fn peek_token(&mut self) -> Option<&Token> {
        self.iter.peek()
    }

    /// Peeks further ahead than [`peek_token`](Self::peek_token); the peeking
    /// cursor resets whenever [`next_token`](Self::next_token) is called.
    pub fn peek_next_token(&mut self) -> Option<&Token> {
        self.iter.peek_next()
    }

    /// Resets the peeking cursor.
    pub fn reset_peek_cursor(&mut self) {
        self.iter.reset_cursor();
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<Token> {
        self.iter.next()
    }

    /// Consumes and returns the next token if `func` returns true for it.
    pub fn next_token_if(&mut self, func: impl FnOnce(&Token) -> bool) -> Option<Token> {
        self.iter.next_if(func)
    }

    /// Consumes and returns the next token if it equals `expected`.
    pub fn next_token_if_eq(&mut self, expected: &Token) -> Option<Token> {
        self.iter.next_if(|t| t.kind == expected.kind)
    }

    /// Consumes the next token and returns true if it equals `expected`.
    pub fn next_token_if_is(&mut self, expected: &Token) -> bool {
        self.next_token_if_eq(expected).is_some()
    }

    /// True if the next token is end-of-input.
    pub fn is_eof(&mut self) -> bool {
        self.peek_token().map(|t| t.is_eof()).unwrap_or(true)
    }

    /// True if the next token is `;` or the pseudo-statement separator `GO`.
    pub fn at_batch_boundary(&mut self) -> bool {
        match self.peek_token() {
            None => true,
            Some(t) => t.is_eof() || t.kind == TokenKind::Semicolon || t.is_word_ci("GO"),
        }
    }

    /// Lenient-recovery helper (spec §4.2, §7): discards tokens up to but not
    /// including the next `;`, `GO`, or end-of-input, so a single malformed
    /// statement does not abort the whole batch.
    pub fn skip_to_end_of_statement(&mut self) {
        while !self.at_batch_boundary() {
            self.next_token();
        }
        self.next_token_if_is(&Token::new(TokenKind::Semicolon, ";", 0, 0));
    }

    /// Parses a single identifier, quoted or not (spec §3, §6).
    pub fn parse_identifier(&mut self) -> Result<Rc<Identifier>, ParserError> {
        match self.peek_token().map(|t| t.kind.clone()) {
            Some(TokenKind::Identifier) => {
                let token = self.next_token().unwrap();
                Ok(Identifier::new(token.text, QuoteType::NotQuoted))
            }
            Some(TokenKind::QuotedIdentifier(QuoteKind::SquareBracket)) => {
                let token = self.next_token().unwrap();
                Ok(Identifier::new(unbracket(&token.text), QuoteType::SquareBracket))
            }
            Some(TokenKind::QuotedIdentifier(QuoteKind::DoubleQuote)) => {
                let token = self.next_token().unwrap();
                Ok(Identifier::new(unquote(&token.text), QuoteType::DoubleQuote))
            }
            Some(TokenKind::Keyword(_)) => {
                // A reserved word used in a position where only an identifier is
                // grammatically possible is still a legal identifier in T-SQL.
                let token = self.next_token().unwrap();
                Ok(Identifier::new(token.text, QuoteType::NotQuoted))
            }
            _ => {
                let found = self.peek_token().cloned();
                self.expected("identifier", found)
            }
        }
    }

    /// Parses a `.`-separated identifier chain of 1 to 4 parts into a
    /// [`SchemaObjectName`] (spec §3, §8).
    pub fn parse_schema_object_name(&mut self) -> Result<SchemaObjectName, ParserError> {
        let parts = self.parse_dotted_identifiers()?;
        Ok(SchemaObjectName::new(parts))
    }

    /// Parses a `.`-separated identifier chain into a [`MultiPartIdentifier`].
    pub fn parse_multi_part_identifier(&mut self) -> Result<MultiPartIdentifier, ParserError> {
        let parts = self.parse_dotted_identifiers()?;
        Ok(MultiPartIdentifier::new(parts))
    }

    fn parse_dotted_identifiers(&mut self) -> Result<Vec<Rc<Identifier>>, ParserError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.next_token_if_is(&Token::new(TokenKind::Dot, ".", 0, 0)) {
            parts.push(self.parse_identifier()?);
        }
        Ok(parts)
    }

    /// Parses the generic `WITH (IDENT [= value] (, IDENT [= value])*)`
    /// option mini-grammar used by `CREATE TABLE`, `CREATE INDEX`, `ALTER
    /// INDEX`, and `BULK INSERT` (spec §9). Each option's raw value text is
    /// preserved verbatim; parenthesized list values keep their parens.
    pub fn parse_paren_options(&mut self) -> Result<Vec<(String, Option<String>)>, ParserError> {
        self.expect_punct(TokenKind::LeftParen, "(")?;
        let mut options = vec![];
        loop {
            let name_token = match self.next_token() {
                Some(t) if !t.is_eof() => t,
                _ => return self.expected("option name", None::<&str>),
            };
            let name = name_token.text.clone();
            let value = if self.next_token_if_is(&Token::new(TokenKind::Equal, "=", 0, 0)) {
                Some(self.parse_option_value_text()?)
            } else {
                None
            };
            options.push((name, value));
            if !self.next_token_if_is(&Token::new(TokenKind::Comma, ",", 0, 0)) {
                break;
            }
        }
        self.expect_punct(TokenKind::RightParen, ")")?;
        Ok(options)
    }

    /// Parses the value half of an `IDENT = value` option pair: either a
    /// single token's text, or a parenthesized comma-separated list kept
    /// verbatim as `(a, b, c)` text (spec §9; used for e.g.
    /// `ROWSET_OPTIONS = N'...'` and `DATA_COMPRESSION = (PAGE)`).
    fn parse_option_value_text(&mut self) -> Result<String, ParserError> {
        if self.peek_token().map(|t| t.kind == TokenKind::LeftParen).unwrap_or(false) {
            let inner = self.parse_paren_options()?;
            let rendered: Vec<String> = inner
                .into_iter()
                .map(|(name, value)| match value {
                    Some(v) => format!("{} = {}", name, v),
                    None => name,
                })
                .collect();
            return Ok(format!("({})", rendered.join(", ")));
        }
        let token = match self.next_token() {
            Some(t) => t,
            None => return self.expected("option value", None::<&str>),
        };
        Ok(token.text)
    }
}

fn unbracket(text: &str) -> String {
    let inner = text.strip_prefix('[').and_then(|s| s.strip_suffix(']')).unwrap_or(text);
    inner.replace("]]", "]")
}

fn unquote(text: &str) -> String {
    let inner = text.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(text);
    inner.replace("\"\"", "\"")
}
