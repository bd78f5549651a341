//! Lexer for the GenPairs spec language.
//!
//! Whitespace, including line breaks, is insignificant except as a token
//! separator; `//` begins a line comment. `;` is likewise insignificant —
//! it's a readability separator between choices, not a grammar token — so it
//! is treated the same as whitespace rather than glued onto the word before
//! it. A word ending in `:` is a category header; the colon is stripped.

use crate::compiler::tokens::{reserved_word, Token, TokenKind};
use genpairs_core::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("empty category header at {span}")]
    EmptyCategoryHeader { span: Span },
}

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    byte_offset: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            byte_offset: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        self.byte_offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn skip_insignificant(&mut self) {
        loop {
            match self.current() {
                Some(c) if c.is_whitespace() || c == ';' => {
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => {
                    while let Some(c) = self.current() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_insignificant();
            let start_byte = self.byte_offset;
            let start_line = self.line;
            let start_col = self.col;
            let Some(first) = self.current() else {
                break;
            };
            let _ = first;
            let mut word = String::new();
            while let Some(c) = self.current() {
                if c.is_whitespace() || c == ';' {
                    break;
                }
                word.push(c);
                self.advance();
            }
            let span = Span::new(start_byte, self.byte_offset, start_line, start_col);
            if word.is_empty() {
                continue;
            }
            let kind = if let Some(name) = word.strip_suffix(':') {
                if name.is_empty() {
                    return Err(LexError::EmptyCategoryHeader { span });
                }
                TokenKind::CategoryHeader(name.to_string())
            } else if let Some(kw) = reserved_word(&word) {
                kw
            } else {
                TokenKind::Ident(word)
            };
            tokens.push(Token::new(kind, span));
        }
        let eof_span = Span::new(self.byte_offset, self.byte_offset, self.line, self.col);
        tokens.push(Token::new(TokenKind::Eof, eof_span));
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn splits_category_header() {
        let k = kinds("col0: e0 error");
        assert_eq!(
            k,
            vec![
                TokenKind::CategoryHeader("col0".into()),
                TokenKind::Ident("e0".into()),
                TokenKind::Error,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn semicolons_are_insignificant() {
        let k = kinds("col0: e0 error; e1 error; v0.0 prop v0");
        assert_eq!(
            k,
            vec![
                TokenKind::CategoryHeader("col0".into()),
                TokenKind::Ident("e0".into()),
                TokenKind::Error,
                TokenKind::Ident("e1".into()),
                TokenKind::Error,
                TokenKind::Ident("v0.0".into()),
                TokenKind::Prop,
                TokenKind::Ident("v0".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dotted_idents_survive_intact() {
        let k = kinds("A: v1.0 if v0");
        assert!(matches!(&k[1], TokenKind::Ident(s) if s == "v1.0"));
    }

    #[test]
    fn line_comments_are_stripped() {
        let k = kinds("A: // a category\n  a1\n  a2");
        assert_eq!(
            k,
            vec![
                TokenKind::CategoryHeader("A".into()),
                TokenKind::Ident("a1".into()),
                TokenKind::Ident("a2".into()),
                TokenKind::Eof,
            ]
        );
    }
}
