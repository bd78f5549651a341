//! Token types for the GenPairs spec language.

use genpairs_core::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `name:` — opens a category. The colon has already been stripped.
    CategoryHeader(String),
    /// A bare name: a category, choice, or property reference.
    Ident(String),
    Prop,
    If,
    Except,
    Single,
    Error,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::CategoryHeader(s) => write!(f, "{}:", s),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Prop => write!(f, "prop"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Except => write!(f, "except"),
            TokenKind::Single => write!(f, "single"),
            TokenKind::Error => write!(f, "error"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

pub fn reserved_word(word: &str) -> Option<TokenKind> {
    match word {
        "prop" => Some(TokenKind::Prop),
        "if" => Some(TokenKind::If),
        "except" => Some(TokenKind::Except),
        "single" => Some(TokenKind::Single),
        "error" => Some(TokenKind::Error),
        _ => None,
    }
}
