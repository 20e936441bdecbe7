//! Parser error types for search table files

use thiserror::Error;

use crate::lexer::{Location, Span, TokenKind};
use crate::search::TableError;

/// A parser error with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte range of the offending input
    pub span: Span,
    /// Line and column of `span.start`
    pub location: Location,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span, location: Location) -> Self {
        Self {
            kind,
            span,
            location,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.location)
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected token: found {found}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        expected: ExpectedToken,
    },

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("{0}")]
    Lex(String),

    #[error("table variable is named '{0}', expected 'searchData'")]
    WrongVariable(String),

    #[error("invalid link flag '{0}', expected 0 or 1")]
    InvalidFlag(String),

    #[error("entry has an empty key")]
    EmptyKey,

    #[error("entry '{0}' has no targets")]
    NoTargets(String),

    #[error("duplicate key '{0}'")]
    DuplicateKey(String),

    #[error("unexpected input after the table")]
    TrailingInput,
}

impl From<TableError> for ParseErrorKind {
    fn from(error: TableError) -> Self {
        match error {
            TableError::EmptyKey => ParseErrorKind::EmptyKey,
            TableError::NoTargets(key) => ParseErrorKind::NoTargets(key),
            TableError::DuplicateKey(key) => ParseErrorKind::DuplicateKey(key),
        }
    }
}

/// What token was expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedToken {
    Token(TokenKind),
    OneOf(Vec<TokenKind>),
    Description(&'static str),
}

impl std::fmt::Display for ExpectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedToken::Token(kind) => write!(f, "{kind}"),
            ExpectedToken::OneOf(kinds) => {
                let names: Vec<String> = kinds.iter().map(ToString::to_string).collect();
                write!(f, "one of: {}", names.join(", "))
            }
            ExpectedToken::Description(desc) => f.write_str(desc),
        }
    }
}
