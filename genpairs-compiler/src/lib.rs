//! Compiles GenPairs spec source into a resolved `Model`, mirroring the
//! lex -> parse -> semantic pipeline shape.

pub mod compiler;
pub mod diagnostics;

use compiler::lexer::{LexError, Lexer};
use compiler::parser::{self, ParseError};
use compiler::semantic::{self, Model, SemanticError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Runs the full lex -> parse -> semantic-build pipeline over spec source.
pub fn compile(source: &str) -> Result<Model, CompileError> {
    let tokens = Lexer::new(source).tokenize()?;
    let ast = parser::parse(tokens)?;
    let model = semantic::build(ast)?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_minimal_spec() {
        let model = compile("A: a1; a2\nB: b1; b2").unwrap();
        assert_eq!(model.category_count(), 2);
    }

    #[test]
    fn lex_errors_propagate_through_compile_error() {
        let err = compile(": a1").unwrap_err();
        assert!(matches!(err, CompileError::Lex(_)));
    }

    #[test]
    fn semantic_errors_propagate_through_compile_error() {
        let err = compile("A: a1\nB: b1 if ghost").unwrap_err();
        assert!(matches!(err, CompileError::Semantic(_)));
    }
}
