//! Token types for search table files

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // ========== Declarations ==========
    #[token("var")]
    Var,
    #[token("let")]
    Let,
    #[token("const")]
    Const,

    // ========== Literals ==========
    /// Unsigned integer, used for the anchor's link flag
    #[regex(r"[0-9]+")]
    Int,

    /// Single-quoted string, the form Doxygen writes
    #[regex(r"'([^'\\\n]|\\[^\n])*'")]
    SingleQuoted,

    /// Double-quoted string
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    DoubleQuoted,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // ========== Punctuation ==========
    #[token("=")]
    Eq,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // ========== Comments ==========
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // ========== Special ==========
    /// End of input (added by the lexer, not matched by logos)
    Eof,

    /// Invalid input
    Error,
}

impl TokenKind {
    /// Comments are dropped before parsing
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::SingleQuoted | Self::DoubleQuoted)
    }

    #[must_use]
    pub const fn is_declaration(&self) -> bool {
        matches!(self, Self::Var | Self::Let | Self::Const)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Var => "'var'",
            Self::Let => "'let'",
            Self::Const => "'const'",
            Self::Int => "integer",
            Self::SingleQuoted | Self::DoubleQuoted => "string",
            Self::Ident => "identifier",
            Self::Eq => "'='",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::LineComment => "// comment",
            Self::BlockComment => "/* comment */",
            Self::Eof => "end of file",
            Self::Error => "invalid input",
        };
        f.write_str(text)
    }
}
