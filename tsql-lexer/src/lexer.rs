use std::iter::Peekable;
use std::str::Chars;

use crate::error::{LexerError, Location};
use crate::keyword::Keyword;
use crate::token::{QuoteKind, Token, TokenKind};

/// Tokenizes T-SQL source text (spec §4.1).
///
/// The parser only ever needs one token of lookahead plus the current token,
/// but callers of the lexer itself may want the whole stream at once; both
/// are supported: [`Lexer::next_token`] pulls one at a time, [`Lexer::tokenize`]
/// drains the rest.
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    location: Location,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            iter: input.chars().peekable(),
            location: Location::start(),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Tokenizes the whole input, skipping whitespace and comments (spec §4.1)
    /// and terminating with a single trailing [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }
        Ok(tokens)
    }

    /// Scans and returns the next token, skipping whitespace and comments.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_trivia()?;
        let start = self.location;
        let Some(&ch) = self.iter.peek() else {
            return Ok(Token::new(TokenKind::Eof, "", start.line, start.column));
        };

        match ch {
            '@' => self.scan_variable(start),
            '$' => self.scan_dollar(start),
            '\'' => self.scan_string(start, false),
            '[' => self.scan_bracketed_ident(start),
            '"' => self.scan_double_quoted_ident(start),
            '0'..='9' => self.scan_number(start),
            '.' if self.peek_nth_is_digit(1) => self.scan_number(start),
            c if is_ident_start(c) => self.scan_ident_or_keyword(start),
            _ => self.scan_symbol(start),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LexerError> {
        loop {
            match self.iter.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('-') => {
                    let mut la = self.iter.clone();
                    la.next();
                    if la.peek() == Some(&'-') {
                        self.advance();
                        self.advance();
                        while let Some(&c) = self.iter.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    } else {
                        break;
                    }
                }
                Some('/') => {
                    let mut la = self.iter.clone();
                    la.next();
                    if la.peek() == Some(&'*') {
                        let start = self.location;
                        self.advance();
                        self.advance();
                        self.skip_block_comment(start)?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Block comments nest (spec §4.1).
    fn skip_block_comment(&mut self, start: Location) -> Result<(), LexerError> {
        let mut depth = 1usize;
        loop {
            match self.iter.peek() {
                None => {
                    return Err(start.into_error("Unterminated block comment"));
                }
                Some('*') => {
                    self.advance();
                    if self.next_if_is('/') {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(());
                        }
                    }
                }
                Some('/') => {
                    self.advance();
                    if self.next_if_is('*') {
                        depth += 1;
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_variable(&mut self, start: Location) -> Result<Token, LexerError> {
        self.advance(); // '@'
        let global = self.next_if_is('@');
        let mut text = String::from(if global { "@@" } else { "@" });
        text.push_str(&self.take_while(is_ident_part));
        let kind = if global {
            TokenKind::GlobalVariable
        } else {
            TokenKind::Variable
        };
        Ok(Token::new(kind, text, start.line, start.column))
    }

    /// `$ACTION`/`$node_id` pseudo-columns vs. `$123.45` monetary literals.
    fn scan_dollar(&mut self, start: Location) -> Result<Token, LexerError> {
        self.advance(); // '$'
        match self.iter.peek() {
            Some(&c) if c.is_ascii_digit() || c == '.' => {
                let mut text = String::from("$");
                text.push_str(&self.take_while(|c| c.is_ascii_digit()));
                if self.next_if_is('.') {
                    text.push('.');
                    text.push_str(&self.take_while(|c| c.is_ascii_digit()));
                }
                Ok(Token::new(
                    TokenKind::MoneyLiteral,
                    text,
                    start.line,
                    start.column,
                ))
            }
            Some(&c) if is_ident_start(c) => {
                let mut text = String::from("$");
                text.push_str(&self.take_while(is_ident_part));
                Ok(Token::new(
                    TokenKind::PseudoColumn,
                    text,
                    start.line,
                    start.column,
                ))
            }
            _ => Err(start.into_error("Unexpected '$'")),
        }
    }

    fn scan_string(&mut self, start: Location, national: bool) -> Result<Token, LexerError> {
        self.advance(); // opening quote
        let mut text = String::new();
        text.push('\'');
        loop {
            match self.iter.peek() {
                None => return Err(start.into_error("Unterminated string literal")),
                Some('\'') => {
                    self.advance();
                    if self.next_if_is('\'') {
                        text.push_str("''");
                    } else {
                        text.push('\'');
                        break;
                    }
                }
                Some(&c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        let prefix = if national { "N" } else { "" };
        Ok(Token::new(
            TokenKind::StringLiteral { national },
            format!("{}{}", prefix, text),
            start.line,
            start.column,
        ))
    }

    fn scan_bracketed_ident(&mut self, start: Location) -> Result<Token, LexerError> {
        self.advance(); // '['
        let mut text = String::new();
        loop {
            match self.iter.peek() {
                None => return Err(start.into_error("Unterminated bracketed identifier")),
                Some(']') => {
                    self.advance();
                    if self.next_if_is(']') {
                        text.push(']');
                    } else {
                        break;
                    }
                }
                Some(&c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token::new(
            TokenKind::QuotedIdentifier(QuoteKind::SquareBracket),
            text,
            start.line,
            start.column,
        ))
    }

    fn scan_double_quoted_ident(&mut self, start: Location) -> Result<Token, LexerError> {
        self.advance(); // '"'
        let mut text = String::new();
        loop {
            match self.iter.peek() {
                None => return Err(start.into_error("Unterminated quoted identifier")),
                Some('"') => {
                    self.advance();
                    if self.next_if_is('"') {
                        text.push('"');
                    } else {
                        break;
                    }
                }
                Some(&c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        Ok(Token::new(
            TokenKind::QuotedIdentifier(QuoteKind::DoubleQuote),
            text,
            start.line,
            start.column,
        ))
    }

    fn scan_number(&mut self, start: Location) -> Result<Token, LexerError> {
        // 0x... binary literal.
        if self.iter.peek() == Some(&'0') {
            let mut la = self.iter.clone();
            la.next();
            if matches!(la.peek(), Some('x') | Some('X')) {
                self.advance();
                self.advance();
                let digits = self.take_while(|c| c.is_ascii_hexdigit());
                if digits.is_empty() {
                    return Err(start.into_error("Invalid binary literal"));
                }
                return Ok(Token::new(
                    TokenKind::BinaryLiteral,
                    format!("0x{}", digits),
                    start.line,
                    start.column,
                ));
            }
        }

        let mut text = self.take_while(|c| c.is_ascii_digit());
        let mut is_real = false;
        if self.iter.peek() == Some(&'.') {
            is_real = true;
            text.push('.');
            self.advance();
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }
        if matches!(self.iter.peek(), Some('e') | Some('E')) {
            let mut la = self.iter.clone();
            let e = la.next().unwrap();
            let sign = la.peek().copied();
            let (has_sign, digits_start) = match sign {
                Some('+') | Some('-') => (true, true),
                Some(c) if c.is_ascii_digit() => (false, true),
                _ => (false, false),
            };
            if digits_start {
                is_real = true;
                text.push(e);
                self.advance();
                if has_sign {
                    let s = self.iter.next().unwrap();
                    self.location.advance(s);
                    text.push(s);
                }
                let exp_digits = self.take_while(|c| c.is_ascii_digit());
                if exp_digits.is_empty() {
                    return Err(start.into_error("Invalid numeric literal"));
                }
                text.push_str(&exp_digits);
            }
        }
        let kind = if is_real {
            TokenKind::RealLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        Ok(Token::new(kind, text, start.line, start.column))
    }

    fn scan_ident_or_keyword(&mut self, start: Location) -> Result<Token, LexerError> {
        let text = self.take_while(is_ident_part);
        let kind = match Keyword::from_str(&text) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        };
        // National string prefix: a bare `N`/`n` identifier immediately
        // followed by `'` is actually a national string literal, not an
        // identifier (spec §4.1).
        if text.len() == 1 && text.eq_ignore_ascii_case("n") && matches!(self.iter.peek(), Some('\'')) {
            return self.scan_string(start, true);
        }
        Ok(Token::new(kind, text, start.line, start.column))
    }

    fn scan_symbol(&mut self, start: Location) -> Result<Token, LexerError> {
        let ch = self.iter.next().ok_or_else(|| {
            start.into_error("Unexpected end of input while scanning a symbol")
        })?;
        self.location.advance(ch);
        let kind = match ch {
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            '~' => TokenKind::Tilde,
            ':' => {
                if self.next_if_is(':') {
                    TokenKind::DoubleColon
                } else {
                    TokenKind::Colon
                }
            }
            '=' => TokenKind::Equal,
            '<' => {
                if self.next_if_is('>') {
                    TokenKind::NotEqualBrackets
                } else if self.next_if_is('=') {
                    TokenKind::LessThanOrEqual
                } else {
                    TokenKind::LessThan
                }
            }
            '>' => {
                if self.next_if_is('=') {
                    TokenKind::GreaterThanOrEqual
                } else {
                    TokenKind::GreaterThan
                }
            }
            '!' => {
                if self.next_if_is('=') {
                    TokenKind::NotEqualExclaim
                } else {
                    return Err(start.into_error("Unexpected character '!'"));
                }
            }
            '+' => {
                if self.next_if_is('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.next_if_is('=') {
                    TokenKind::MinusEqual
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.next_if_is('=') {
                    TokenKind::AsteriskEqual
                } else {
                    TokenKind::Asterisk
                }
            }
            '/' => {
                if self.next_if_is('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.next_if_is('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                if self.next_if_is('=') {
                    TokenKind::AmpersandEqual
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.next_if_is('=') {
                    TokenKind::PipeEqual
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.next_if_is('=') {
                    TokenKind::CaretEqual
                } else {
                    TokenKind::Caret
                }
            }
            c => {
                return Err(start.into_error(format!("Unexpected character '{}'", c)));
            }
        };
        Ok(Token::new(kind, ch.to_string(), start.line, start.column))
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        self.location.advance(ch);
        Some(ch)
    }

    fn next_if_is(&mut self, ch: char) -> bool {
        if self.iter.next_if_eq(&ch).is_some() {
            self.location.advance(ch);
            true
        } else {
            false
        }
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> String {
        let mut s = String::new();
        while let Some(&c) = self.iter.peek() {
            if !predicate(c) {
                break;
            }
            s.push(c);
            self.advance();
        }
        s
    }

    fn peek_nth_is_digit(&self, n: usize) -> bool {
        let mut it = self.iter.clone();
        for _ in 0..n {
            it.next();
        }
        matches!(it.next(), Some(c) if c.is_ascii_digit())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '#'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '#' || c == '@' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_simple_select() {
        let kinds = lex("SELECT 1");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::SELECT),
                TokenKind::IntegerLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_national_string() {
        let tokens = Lexer::new("N'hello'").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral { national: true });
        assert_eq!(tokens[0].text, "N'hello'");
    }

    #[test]
    fn tokenizes_bracketed_identifier_with_escape() {
        let tokens = Lexer::new("[foo]]bar]").tokenize().unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::QuotedIdentifier(QuoteKind::SquareBracket)
        );
        assert_eq!(tokens[0].text, "foo]bar");
    }

    #[test]
    fn tokenizes_double_quoted_identifier_with_escape() {
        let tokens = Lexer::new("\"foo\"\"bar\"").tokenize().unwrap();
        assert_eq!(tokens[0].text, "foo\"bar");
    }

    #[test]
    fn tokenizes_variables() {
        let kinds = lex("@x @@ROWCOUNT");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Variable,
                TokenKind::GlobalVariable,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn tokenizes_pseudo_column() {
        let tokens = Lexer::new("$ACTION").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::PseudoColumn);
        assert_eq!(tokens[0].text, "$ACTION");
    }

    #[test]
    fn tokenizes_hex_binary_literal() {
        let tokens = Lexer::new("0xFF01").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::BinaryLiteral);
        assert_eq!(tokens[0].text, "0xFF01");
    }

    #[test]
    fn tokenizes_real_literal_with_exponent() {
        let tokens = Lexer::new("1.5e-10").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::RealLiteral);
        assert_eq!(tokens[0].text, "1.5e-10");
    }

    #[test]
    fn tokenizes_multi_char_operators() {
        let kinds = lex("<= >= <> != += -= ::");
        assert_eq!(
            kinds,
            vec![
                TokenKind::LessThanOrEqual,
                TokenKind::GreaterThanOrEqual,
                TokenKind::NotEqualBrackets,
                TokenKind::NotEqualExclaim,
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn nests_block_comments() {
        let kinds = lex("/* outer /* inner */ still outer */ SELECT");
        assert_eq!(kinds, vec![TokenKind::Keyword(Keyword::SELECT), TokenKind::Eof]);
    }

    #[test]
    fn unterminated_string_is_lexer_error() {
        let err = Lexer::new("'abc").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn unterminated_block_comment_is_lexer_error() {
        let err = Lexer::new("/* abc").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let kinds = lex("select From");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::SELECT),
                TokenKind::Keyword(Keyword::FROM),
                TokenKind::Eof,
            ]
        );
    }
}
