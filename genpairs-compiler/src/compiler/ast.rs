//! Parsed, unresolved spec tree — names are still bare strings here; the
//! semantic model (`compiler::semantic`) is what interns and resolves them.

use genpairs_core::Span;

#[derive(Debug, Clone)]
pub struct SpecAst {
    pub categories: Vec<CategoryAst>,
}

#[derive(Debug, Clone)]
pub struct CategoryAst {
    pub name: String,
    pub span: Span,
    pub choices: Vec<ChoiceAst>,
}

#[derive(Debug, Clone)]
pub struct ChoiceAst {
    pub name: String,
    pub span: Span,
    pub props: Vec<String>,
    pub requires: Vec<String>,
    pub excludes: Vec<String>,
    pub single: bool,
    pub error: bool,
}

impl ChoiceAst {
    pub fn new(name: String, span: Span) -> Self {
        Self {
            name,
            span,
            props: Vec::new(),
            requires: Vec::new(),
            excludes: Vec::new(),
            single: false,
            error: false,
        }
    }
}
