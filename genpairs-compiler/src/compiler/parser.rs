//! Recursive-descent parser for the GenPairs spec language.
//!
//! ```text
//! spec      := category+
//! category  := IDENT ':' choice+
//! choice    := IDENT qualifier*
//! qualifier := 'prop' IDENT | 'if' IDENT | 'except' IDENT | 'single' | 'error'
//! ```

use crate::compiler::ast::{CategoryAst, ChoiceAst, SpecAst};
use crate::compiler::tokens::{Token, TokenKind};
use genpairs_core::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{found}' at {span}; expected {expected}")]
    Unexpected {
        found: String,
        expected: String,
        span: Span,
    },
    #[error("unexpected end of input; expected {expected}")]
    UnexpectedEof { expected: String },
    #[error("category '{name}' has no choices (at {span})")]
    UnterminatedCategory { name: String, span: Span },
    #[error("qualifier '{qualifier}' at {span} requires a property name")]
    MissingQualifierArgument { qualifier: String, span: Span },
    #[error("choice '{name}' at {span} is tagged both 'single' and 'error'")]
    ContradictoryQualifiers { name: String, span: Span },
    #[error("duplicate category '{name}' at {span} (first defined at {first_span})")]
    DuplicateCategory {
        name: String,
        span: Span,
        first_span: Span,
    },
    #[error("duplicate choice '{name}' in category '{category}' at {span} (first defined at {first_span})")]
    DuplicateChoice {
        category: String,
        name: String,
        span: Span,
        first_span: Span,
    },
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub fn parse(mut self) -> Result<SpecAst, ParseError> {
        let mut categories: Vec<CategoryAst> = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::CategoryHeader(_) => {
                    let category = self.parse_category()?;
                    if let Some(prior) = categories.iter().find(|c| c.name == category.name) {
                        return Err(ParseError::DuplicateCategory {
                            name: category.name,
                            span: category.span,
                            first_span: prior.span,
                        });
                    }
                    categories.push(category);
                }
                other => {
                    return Err(ParseError::Unexpected {
                        found: other.to_string(),
                        expected: "a category header ('name:')".to_string(),
                        span: self.peek().span,
                    });
                }
            }
        }
        Ok(SpecAst { categories })
    }

    fn parse_category(&mut self) -> Result<CategoryAst, ParseError> {
        let header = self.advance();
        let (name, header_span) = match header.kind {
            TokenKind::CategoryHeader(name) => (name, header.span),
            _ => unreachable!("caller only invokes this on a CategoryHeader token"),
        };

        let mut choices: Vec<ChoiceAst> = Vec::new();
        loop {
            match &self.peek().kind {
                TokenKind::Ident(_) => {
                    let choice = self.parse_choice()?;
                    if let Some(prior) = choices.iter().find(|c| c.name == choice.name) {
                        return Err(ParseError::DuplicateChoice {
                            category: name,
                            name: choice.name,
                            span: choice.span,
                            first_span: prior.span,
                        });
                    }
                    choices.push(choice);
                }
                TokenKind::CategoryHeader(_) | TokenKind::Eof => break,
                other => {
                    return Err(ParseError::Unexpected {
                        found: other.to_string(),
                        expected: "a choice name".to_string(),
                        span: self.peek().span,
                    });
                }
            }
        }

        if choices.is_empty() {
            return Err(ParseError::UnterminatedCategory {
                name,
                span: header_span,
            });
        }

        Ok(CategoryAst {
            name,
            span: header_span,
            choices,
        })
    }

    fn parse_choice(&mut self) -> Result<ChoiceAst, ParseError> {
        let name_tok = self.advance();
        let name = match name_tok.kind {
            TokenKind::Ident(s) => s,
            _ => unreachable!("caller only invokes this on an Ident token"),
        };
        let mut choice = ChoiceAst::new(name, name_tok.span);

        loop {
            match &self.peek().kind {
                TokenKind::Prop => {
                    let qual_span = self.advance().span;
                    choice.props.push(self.expect_ident("prop", qual_span)?);
                }
                TokenKind::If => {
                    let qual_span = self.advance().span;
                    choice.requires.push(self.expect_ident("if", qual_span)?);
                }
                TokenKind::Except => {
                    let qual_span = self.advance().span;
                    choice.excludes.push(self.expect_ident("except", qual_span)?);
                }
                TokenKind::Single => {
                    self.advance();
                    if choice.error {
                        return Err(ParseError::ContradictoryQualifiers {
                            name: choice.name,
                            span: choice.span,
                        });
                    }
                    choice.single = true;
                }
                TokenKind::Error => {
                    self.advance();
                    if choice.single {
                        return Err(ParseError::ContradictoryQualifiers {
                            name: choice.name,
                            span: choice.span,
                        });
                    }
                    choice.error = true;
                }
                _ => break,
            }
        }

        Ok(choice)
    }

    fn expect_ident(&mut self, qualifier: &str, qual_span: Span) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(_) => {
                let tok = self.advance();
                match tok.kind {
                    TokenKind::Ident(s) => Ok(s),
                    _ => unreachable!(),
                }
            }
            _ => Err(ParseError::MissingQualifierArgument {
                qualifier: qualifier.to_string(),
                span: qual_span,
            }),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<SpecAst, ParseError> {
    Parser::new(tokens).parse()
}
