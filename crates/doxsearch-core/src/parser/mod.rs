//! Parser for Doxygen search table files
//!
//! Recursive descent over the lexer's tokens. The accepted grammar is:
//!
//! ```text
//! file   = [ "var" | "let" | "const" ] "searchData" "=" table [ ";" ]
//! table  = "[" [ entry { "," entry } [ "," ] ] "]"
//! entry  = "[" string "," "[" string { "," anchor } "]" "]"
//! anchor = "[" string "," int "," string "]"
//! ```
//!
//! # Example
//!
//! ```
//! use doxsearch_core::parser::Parser;
//!
//! let source = "var searchData=\n[\n  ['splpar',['SplPar',['../struct_spl_par.html',1,'']]]\n];\n";
//! let table = Parser::parse_table(source).unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.lookup("spl")[0].label, "SplPar");
//! ```

mod error;

pub use error::{ExpectedToken, ParseError, ParseErrorKind};

use crate::lexer::{Lexer, LineIndex, Span, Token, TokenKind};
use crate::search::{AnchorRef, SearchEntry, SearchTable, SEARCH_DATA_VAR};

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// The search table parser
pub struct Parser<'source> {
    /// Tokens with comments removed; always ends with `Eof`
    tokens: Vec<Token>,
    position: usize,
    lines: LineIndex<'source>,
}

impl<'source> Parser<'source> {
    /// Parse a complete table file
    ///
    /// Lexical errors are reported before any syntax error, since a broken
    /// string usually causes a cascade of confusing follow-up errors.
    pub fn parse_table(source: &'source str) -> ParseResult<SearchTable> {
        let (tokens, lex_errors) = Lexer::tokenize(source);
        let mut parser = Parser {
            tokens: tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect(),
            position: 0,
            lines: LineIndex::new(source),
        };

        if let Some(first) = lex_errors.first() {
            return Err(parser.error_at(ParseErrorKind::Lex(first.error.to_string()), first.span));
        }

        parser.file()
    }

    // ==================== Token Management ====================

    fn current(&self) -> &Token {
        // The lexer always emits Eof, and `advance` never moves past it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(ExpectedToken::Token(kind)))
        }
    }

    fn expect_string(&mut self) -> ParseResult<Token> {
        if self.current_kind().is_string() {
            Ok(self.advance())
        } else {
            Err(self.unexpected(ExpectedToken::Description("string")))
        }
    }

    fn unexpected(&self, expected: ExpectedToken) -> ParseError {
        let token = self.current();
        let kind = if token.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::UnexpectedToken {
                found: token.kind,
                expected,
            }
        };
        self.error_at(kind, token.span)
    }

    fn error_at(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span, self.lines.location(span.start))
    }

    // ==================== Grammar ====================

    fn file(&mut self) -> ParseResult<SearchTable> {
        if self.current_kind().is_declaration() {
            self.advance();
        }

        let name = self.expect(TokenKind::Ident)?;
        if name.lexeme != SEARCH_DATA_VAR {
            return Err(self.error_at(ParseErrorKind::WrongVariable(name.lexeme), name.span));
        }
        self.expect(TokenKind::Eq)?;

        let table = self.table()?;

        self.eat(TokenKind::Semicolon);
        if !self.check(TokenKind::Eof) {
            let span = self.current().span;
            return Err(self.error_at(ParseErrorKind::TrailingInput, span));
        }
        Ok(table)
    }

    fn table(&mut self) -> ParseResult<SearchTable> {
        self.expect(TokenKind::LBracket)?;
        let mut table = SearchTable::new();

        while !self.check(TokenKind::RBracket) {
            let (entry, key_span) = self.entry()?;
            table
                .insert(entry)
                .map_err(|e| self.error_at(e.into(), key_span))?;

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        if !self.check(TokenKind::RBracket) {
            return Err(self.unexpected(ExpectedToken::OneOf(vec![
                TokenKind::Comma,
                TokenKind::RBracket,
            ])));
        }
        self.advance();
        Ok(table)
    }

    /// Parse one entry, returning it with the span of its key
    fn entry(&mut self) -> ParseResult<(SearchEntry, Span)> {
        self.expect(TokenKind::LBracket)?;
        let key = self.expect_string()?;
        self.expect(TokenKind::Comma)?;

        self.expect(TokenKind::LBracket)?;
        let label = self.expect_string()?;
        let mut targets = Vec::new();
        while self.eat(TokenKind::Comma).is_some() {
            targets.push(self.anchor()?);
        }
        self.expect(TokenKind::RBracket)?;
        self.expect(TokenKind::RBracket)?;

        Ok((SearchEntry::new(key.lexeme, label.lexeme, targets), key.span))
    }

    fn anchor(&mut self) -> ParseResult<AnchorRef> {
        self.expect(TokenKind::LBracket)?;
        let url = self.expect_string()?;
        self.expect(TokenKind::Comma)?;

        let flag = self.expect(TokenKind::Int)?;
        let external = match flag.lexeme.as_str() {
            "1" => false,
            "0" => true,
            _ => return Err(self.error_at(ParseErrorKind::InvalidFlag(flag.lexeme), flag.span)),
        };
        self.expect(TokenKind::Comma)?;

        let qualifier = self.expect_string()?;
        self.expect(TokenKind::RBracket)?;

        Ok(AnchorRef::from_url(&url.lexeme, external, qualifier.lexeme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Location;

    fn parse_err(source: &str) -> ParseError {
        Parser::parse_table(source).unwrap_err()
    }

    #[test]
    fn parse_multi_target_entry() {
        let source = "var searchData=\n[\n  ['spl_5fpz',['spl_pz',\
            ['../struct_int_lens_par.html#af03',1,'IntLensPar::spl_pz()'],\
            ['../struct_int_mag_par.html#a97',1,'IntMagPar::spl_pz()']]]\n];";
        let table = Parser::parse_table(source).unwrap();
        let entry = table.get("spl_5fpz").unwrap();
        assert_eq!(entry.label, "spl_pz");
        assert_eq!(entry.targets.len(), 2);
        assert_eq!(entry.targets[0].path, "../struct_int_lens_par.html");
        assert_eq!(entry.targets[0].fragment.as_deref(), Some("af03"));
        assert_eq!(entry.targets[1].qualifier, "IntMagPar::spl_pz()");
        assert!(!entry.targets[1].external);
    }

    #[test]
    fn parse_page_level_anchor() {
        let table =
            Parser::parse_table("var searchData=[['splpar',['SplPar',['../struct_spl_par.html',1,'']]]];")
                .unwrap();
        let anchor = &table.entries()[0].targets[0];
        assert_eq!(anchor.fragment, None);
        assert_eq!(anchor.qualifier, "");
    }

    #[test]
    fn external_flag() {
        let table = Parser::parse_table("var searchData=[['x',['x',['http://e/x.html#a',0,'ext']]]]").unwrap();
        assert!(table.entries()[0].targets[0].external);

        let err = parse_err("var searchData=[['x',['x',['x.html',2,'']]]]");
        assert_eq!(err.kind, ParseErrorKind::InvalidFlag("2".into()));
    }

    #[test]
    fn optional_semicolon_keyword_and_trailing_comma() {
        let source = "// generated\nsearchData = [\n  ['a',['a',['a.html#x',1,'']]],\n]";
        let table = Parser::parse_table(source).unwrap();
        assert_eq!(table.len(), 1);

        let table = Parser::parse_table("const searchData=[];").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn double_quoted_strings() {
        let table = Parser::parse_table(r#"var searchData=[["a",["A",["a.html#x",1,"it's"]]]];"#).unwrap();
        assert_eq!(table.entries()[0].targets[0].qualifier, "it's");
    }

    #[test]
    fn wrong_variable_name() {
        let err = parse_err("var indexSectionNames=[];");
        assert_eq!(err.kind, ParseErrorKind::WrongVariable("indexSectionNames".into()));
        assert_eq!(err.location, Location::new(1, 5));
    }

    #[test]
    fn duplicate_key_points_at_second_key() {
        let source = "var searchData=[\n['a',['a',['a.html',1,'']]],\n['a',['A',['b.html',1,'']]]\n];";
        let err = parse_err(source);
        assert_eq!(err.kind, ParseErrorKind::DuplicateKey("a".into()));
        assert_eq!(err.location, Location::new(3, 2));
    }

    #[test]
    fn entry_without_targets() {
        let err = parse_err("var searchData=[['a',['a']]];");
        assert_eq!(err.kind, ParseErrorKind::NoTargets("a".into()));
    }

    #[test]
    fn empty_key() {
        let err = parse_err("var searchData=[['',['a',['a.html',1,'']]]];");
        assert_eq!(err.kind, ParseErrorKind::EmptyKey);
    }

    #[test]
    fn missing_comma_between_entries() {
        let err = parse_err("var searchData=[['a',['a',['a.html',1,'']]] ['b',['b',['b.html',1,'']]]];");
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                found: TokenKind::LBracket,
                expected: ExpectedToken::OneOf(vec![TokenKind::Comma, TokenKind::RBracket]),
            }
        );
    }

    #[test]
    fn truncated_file() {
        let err = parse_err("var searchData=[['a',['a',['a.html',1,");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn trailing_input() {
        let err = parse_err("var searchData=[]; var other=[];");
        assert_eq!(err.kind, ParseErrorKind::TrailingInput);
    }

    #[test]
    fn lex_errors_take_precedence() {
        let err = parse_err("var searchData=[['a',['a',['a.html',1,'unterminated]]]];\n");
        assert_eq!(err.kind, ParseErrorKind::Lex("unterminated string literal".into()));
        assert_eq!(err.location, Location::new(1, 39));
    }

    #[test]
    fn error_display_has_location() {
        let err = parse_err("var searchData=\n[ 'a' ];");
        assert_eq!(
            err.to_string(),
            "unexpected token: found string, expected '[' at 2:3"
        );
    }
}
