//! Lexer for Doxygen search table files
//!
//! A table file is a tiny subset of JavaScript: one variable declaration whose
//! value is a nested array of string and integer literals. The lexer handles:
//! - Declaration keywords and identifiers
//! - Brackets, commas, `=` and `;`
//! - Single- and double-quoted strings, with escapes decoded into the token text
//! - Line and block comments
//! - Source location tracking

#![allow(clippy::cast_possible_truncation)] // Spans are u32; files > 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span and text
///
/// For string tokens `lexeme` holds the decoded contents without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub lexeme: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    #[error("invalid escape sequence: \\{0}")]
    InvalidEscape(char),
}

/// A lexer error with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// Tokenizer over a table file
pub struct Lexer<'source> {
    source: &'source str,
    /// Current byte offset
    position: usize,
    errors: Vec<SpannedError>,
    finished: bool,
}

impl<'source> Lexer<'source> {
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    ///
    /// The token list always ends with a single `Eof` token.
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    /// Errors collected so far
    #[must_use]
    pub fn errors(&self) -> &[SpannedError] {
        &self.errors
    }

    fn next_token(&mut self) -> Token {
        let source = self.source;
        let remaining = &source[self.position..];
        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                // The range is relative to `remaining` and already excludes skipped whitespace
                let range = logos_lexer.span();
                let start = self.position + range.start;
                let end = self.position + range.end;
                self.position = end;

                let slice = logos_lexer.slice();
                let lexeme = if kind.is_string() {
                    self.unescape(&slice[1..slice.len() - 1], start + 1)
                } else {
                    slice.to_string()
                };
                Token::new(kind, Span::from(start..end), lexeme)
            }
            Some(Err(())) => {
                let start = self.position + logos_lexer.span().start;
                self.recover(start)
            }
            None => {
                self.position = self.source.len();
                self.finished = true;
                let end = self.source.len() as u32;
                Token::new(TokenKind::Eof, Span::new(end, end), "")
            }
        }
    }

    /// Skip past invalid input and report it
    fn recover(&mut self, start: usize) -> Token {
        let source = self.source;
        let rest = &source[start..];
        let (error, end) = if rest.starts_with('\'') || rest.starts_with('"') {
            // An unterminated string swallows the rest of its line
            let line_end = rest.find('\n').map_or(self.source.len(), |i| start + i);
            (LexError::UnterminatedString, line_end)
        } else if rest.starts_with("/*") {
            (LexError::UnterminatedBlockComment, self.source.len())
        } else {
            let c = rest.chars().next().unwrap_or('\0');
            (LexError::UnexpectedChar(c), start + c.len_utf8().max(1))
        };

        let span = Span::from(start..end);
        self.errors.push(SpannedError::new(error, span));
        self.position = end;
        Token::new(TokenKind::Error, span, &source[start..end])
    }

    /// Decode backslash escapes in a string body starting at byte `offset`
    fn unescape(&mut self, body: &str, offset: usize) -> String {
        let mut out = String::with_capacity(body.len());
        let mut chars = body.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some((_, escaped)) = chars.next() else {
                break;
            };
            let decoded = match escaped {
                'n' => Some('\n'),
                't' => Some('\t'),
                'r' => Some('\r'),
                'b' => Some('\u{8}'),
                'f' => Some('\u{c}'),
                'v' => Some('\u{b}'),
                '0' => Some('\0'),
                '\\' | '\'' | '"' | '/' => Some(escaped),
                'x' => read_hex(&mut chars, 2),
                'u' => read_hex(&mut chars, 4),
                _ => None,
            };
            match decoded {
                Some(ch) => out.push(ch),
                None => {
                    let at = offset + i;
                    self.errors.push(SpannedError::new(
                        LexError::InvalidEscape(escaped),
                        Span::from(at..at + 1 + escaped.len_utf8()),
                    ));
                    out.push(escaped);
                }
            }
        }
        out
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

fn read_hex(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        let (_, c) = chars.next_if(|(_, c)| c.is_ascii_hexdigit())?;
        value = value * 16 + c.to_digit(16)?;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        let (tokens, errors) = Lexer::tokenize(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens
    }

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_declaration() {
        assert_eq!(
            lex_kinds("var searchData=\n[\n];"),
            vec![
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lex_anchor_tuple() {
        let tokens = lex("['../structctest.html#a5d76',1,'ctest']");
        assert_eq!(tokens[1].kind, TokenKind::SingleQuoted);
        assert_eq!(tokens[1].lexeme, "../structctest.html#a5d76");
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[3].lexeme, "1");
        assert_eq!(tokens[5].lexeme, "ctest");
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        let tokens = lex("variable");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lexeme, "variable");
    }

    #[test]
    fn lex_escapes() {
        let tokens = lex(r#"'it\'s' "a\\b" 'tab\there' 'é\x41'"#);
        assert_eq!(tokens[0].lexeme, "it's");
        assert_eq!(tokens[1].kind, TokenKind::DoubleQuoted);
        assert_eq!(tokens[1].lexeme, "a\\b");
        assert_eq!(tokens[2].lexeme, "tab\there");
        assert_eq!(tokens[3].lexeme, "éA");
    }

    #[test]
    fn lex_comments() {
        let tokens = lex("// header\n[ /* block */ ]");
        assert_eq!(tokens[0].kind, TokenKind::LineComment);
        assert_eq!(tokens[1].kind, TokenKind::LBracket);
        assert_eq!(tokens[2].kind, TokenKind::BlockComment);
        assert_eq!(tokens[3].kind, TokenKind::RBracket);
    }

    #[test]
    fn spans_are_absolute() {
        let tokens = lex("  [ 'ab' ]");
        assert_eq!(tokens[0].span, Span::new(2, 3));
        assert_eq!(tokens[1].span, Span::new(4, 8));
        assert_eq!(tokens[2].span, Span::new(9, 10));
        assert_eq!(tokens[3].span, Span::new(10, 10));
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (tokens, errors) = Lexer::tokenize("['abc\n]");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error, LexError::UnterminatedString);
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[2].kind, TokenKind::RBracket);
    }

    #[test]
    fn unexpected_char_is_skipped() {
        let (tokens, errors) = Lexer::tokenize("[ @ ]");
        assert_eq!(errors[0].error, LexError::UnexpectedChar('@'));
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LBracket,
                TokenKind::Error,
                TokenKind::RBracket,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn invalid_escape_is_reported() {
        let (tokens, errors) = Lexer::tokenize(r"'a\qb'");
        assert_eq!(errors[0].error, LexError::InvalidEscape('q'));
        assert_eq!(tokens[0].lexeme, "aqb");
    }
}
