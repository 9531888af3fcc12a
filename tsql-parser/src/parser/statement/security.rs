use std::rc::Rc;

use tsql_ast::{
    DenyStatement, GrantStatement, Identifier, Permission, PrincipalName, PrincipalType,
    QuoteType, RevokeStatement, SchemaObjectName, SecurityObjectKind, SecurityTargetObject,
    Statement,
};
use tsql_lexer::{Keyword, Token, TokenKind};

use crate::error::ParserError;
use crate::parser::Parser;

impl Parser {
    /// `GRANT perm [,...] [ON target] TO principal [,...] [WITH GRANT OPTION]
    /// [AS principal]` (spec §4.4).
    pub(crate) fn parse_grant_statement(&mut self) -> Result<Statement, ParserError> {
        let permissions = self.parse_comma_separated(Parser::parse_permission)?;
        let security_target_object = self.parse_security_target_object()?;
        let principals = self.parse_principal_list()?;
        let with_grant_option = if self.parse_keyword(Keyword::WITH) {
            self.expect_keyword(Keyword::GRANT)?;
            self.expect_keyword(Keyword::OPTION)?;
            true
        } else {
            false
        };
        let as_principal = self.parse_as_principal()?;
        Ok(Statement::Grant(Box::new(GrantStatement {
            permissions,
            security_target_object,
            principals,
            with_grant_option,
            as_principal,
        })))
    }

    /// `REVOKE perm [,...] [ON target] FROM principal [,...] [CASCADE] [AS
    /// principal]` (spec §4.4).
    pub(crate) fn parse_revoke_statement(&mut self) -> Result<Statement, ParserError> {
        let permissions = self.parse_comma_separated(Parser::parse_permission)?;
        let security_target_object = self.parse_security_target_object()?;
        let principals = self.parse_principal_list()?;
        let cascade = self.parse_keyword(Keyword::CASCADE);
        let as_principal = self.parse_as_principal()?;
        Ok(Statement::Revoke(Box::new(RevokeStatement {
            permissions,
            security_target_object,
            principals,
            cascade,
            as_principal,
        })))
    }

    /// `DENY perm [,...] [ON target] TO principal [,...] [CASCADE] [AS
    /// principal]` (spec §4.4).
    pub(crate) fn parse_deny_statement(&mut self) -> Result<Statement, ParserError> {
        let permissions = self.parse_comma_separated(Parser::parse_permission)?;
        let security_target_object = self.parse_security_target_object()?;
        let principals = self.parse_principal_list()?;
        let cascade = self.parse_keyword(Keyword::CASCADE);
        let as_principal = self.parse_as_principal()?;
        Ok(Statement::Deny(Box::new(DenyStatement {
            permissions,
            security_target_object,
            principals,
            cascade,
            as_principal,
        })))
    }

    /// A permission name is one or more bare words (often several keywords in
    /// a row, e.g. `ALTER ANY SCHEMA`), optionally followed by a column list.
    fn parse_permission(&mut self) -> Result<Permission, ParserError> {
        let mut words = Vec::new();
        loop {
            let stop = self
                .peek_token()
                .map(|t| {
                    t.is_keyword(Keyword::ON)
                        || t.is_keyword(Keyword::TO)
                        || t.is_keyword(Keyword::FROM)
                        || t.is_keyword(Keyword::CASCADE)
                        || t.is_keyword(Keyword::AS)
                        || t.is_keyword(Keyword::WITH)
                        || t.kind == TokenKind::Comma
                        || t.kind == TokenKind::Semicolon
                        || t.is_eof()
                })
                .unwrap_or(true);
            if stop {
                break;
            }
            match self.next_token() {
                Some(t) => words.push(t.text),
                None => break,
            }
        }
        if words.is_empty() {
            let found = self.peek_token().cloned();
            return self.expected("a permission name", found);
        }
        let permission_name = words.join(" ");
        let columns = if self.next_token_if_is(&Token::new(TokenKind::LeftParen, "(", 0, 0)) {
            let cols = self.parse_comma_separated(Parser::parse_identifier)?;
            self.expect_punct(TokenKind::RightParen, ")")?;
            cols
        } else {
            Vec::new()
        };
        Ok(Permission {
            permission_name,
            columns,
        })
    }

    fn parse_security_target_object(&mut self) -> Result<Option<SecurityTargetObject>, ParserError> {
        if !self.parse_keyword(Keyword::ON) {
            return Ok(None);
        }
        let object_kind = self.parse_security_object_kind();
        self.next_token_if_is(&Token::new(TokenKind::DoubleColon, "::", 0, 0));
        let object_name = self.parse_security_object_name()?;
        Ok(Some(SecurityTargetObject {
            object_kind,
            object_name,
        }))
    }

    /// Recognizes the fixed set of multi-word (and two single-word) object
    /// classes spec §4.4 names; anything else defaults to `NotSpecified`
    /// without consuming a token (spec §9 default-value rules).
    fn parse_security_object_kind(&mut self) -> SecurityObjectKind {
        if self.parse_keyword(Keyword::OBJECT) {
            SecurityObjectKind::Object
        } else if self.parse_keyword(Keyword::SERVER) {
            self.parse_keyword(Keyword::ROLE);
            SecurityObjectKind::ServerRole
        } else if self.parse_word_ci("APPLICATION") {
            self.parse_keyword(Keyword::ROLE);
            SecurityObjectKind::ApplicationRole
        } else if self.parse_word_ci("ASYMMETRIC") {
            self.parse_keyword(Keyword::KEY);
            SecurityObjectKind::AsymmetricKey
        } else if self.parse_keyword(Keyword::SYMMETRIC) {
            self.parse_keyword(Keyword::KEY);
            SecurityObjectKind::SymmetricKey
        } else if self.parse_keyword(Keyword::REMOTE) {
            self.parse_keyword(Keyword::SERVICE);
            self.parse_word_ci("BINDING");
            SecurityObjectKind::RemoteServiceBinding
        } else if self.parse_keyword(Keyword::FULLTEXT) {
            if self.parse_keyword(Keyword::CATALOG) {
                SecurityObjectKind::FullTextCatalog
            } else {
                self.parse_word_ci("STOPLIST");
                SecurityObjectKind::FullTextStoplist
            }
        } else if self.parse_keyword(Keyword::MESSAGE) {
            self.parse_keyword(Keyword::TYPE);
            SecurityObjectKind::MessageType
        } else if self.parse_keyword(Keyword::XML) {
            self.parse_keyword(Keyword::SCHEMA);
            self.parse_word_ci("COLLECTION");
            SecurityObjectKind::XmlSchemaCollection
        } else if self.parse_keyword(Keyword::SCHEMA) {
            SecurityObjectKind::Schema
        } else if self.parse_word_ci("SEARCH") {
            self.parse_word_ci("PROPERTY");
            self.parse_word_ci("LIST");
            SecurityObjectKind::SearchPropertyList
        } else if self.parse_keyword(Keyword::AVAILABILITY) {
            self.parse_keyword(Keyword::GROUP);
            SecurityObjectKind::AvailabilityGroup
        } else {
            SecurityObjectKind::NotSpecified
        }
    }

    /// A dotted object name where a leading or doubled dot yields an empty
    /// identifier component (spec §4.4: `..t1` yields three identifiers, the
    /// first two empty) — distinct from [`Parser::parse_schema_object_name`],
    /// which requires every part to be a real identifier.
    fn parse_security_object_name(&mut self) -> Result<SchemaObjectName, ParserError> {
        let mut parts = Vec::new();
        if self.peek_token().map(|t| t.kind == TokenKind::Dot).unwrap_or(false) {
            parts.push(Identifier::new(String::new(), QuoteType::NotQuoted));
        } else {
            parts.push(self.parse_identifier()?);
        }
        while self.next_token_if_is(&Token::new(TokenKind::Dot, ".", 0, 0)) {
            if self.peek_token().map(|t| t.kind == TokenKind::Dot).unwrap_or(false) {
                parts.push(Identifier::new(String::new(), QuoteType::NotQuoted));
            } else {
                parts.push(self.parse_identifier()?);
            }
        }
        Ok(SchemaObjectName::new(parts))
    }

    fn parse_principal_list(&mut self) -> Result<Vec<PrincipalName>, ParserError> {
        if !(self.parse_keyword(Keyword::TO) || self.parse_keyword(Keyword::FROM)) {
            return Ok(Vec::new());
        }
        self.parse_comma_separated(Parser::parse_principal_name)
    }

    fn parse_principal_name(&mut self) -> Result<PrincipalName, ParserError> {
        if self.parse_keyword(Keyword::PUBLIC) {
            return Ok(PrincipalName {
                principal_type: PrincipalType::Public,
                identifier: None,
            });
        }
        if self.parse_keyword(Keyword::NULL) {
            return Ok(PrincipalName {
                principal_type: PrincipalType::Null,
                identifier: None,
            });
        }
        let identifier: Rc<Identifier> = self.parse_identifier()?;
        Ok(PrincipalName {
            principal_type: PrincipalType::Regular,
            identifier: Some(identifier),
        })
    }

    fn parse_as_principal(&mut self) -> Result<Option<PrincipalName>, ParserError> {
        if !self.parse_keyword(Keyword::AS) {
            return Ok(None);
        }
        Ok(Some(self.parse_principal_name()?))
    }
}
