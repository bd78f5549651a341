//! Diagnostics accumulated during pairwise coverage and suite accounting.
//!
//! Unlike `LexError`/`ParseError`/`SemanticError`, these never abort
//! processing — spec.md §7 treats infeasible pairs and rejected suite rows
//! as non-fatal, accumulated alongside normal output.

use crate::compiler::semantic::Model;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Renders the exact format mandated by spec.md §6:
    /// `Warning - No pair possible:  [ cat_i=a cat_j=b ]`
    pub fn infeasible_pair(model: &Model, cat_a: usize, choice_a: usize, cat_b: usize, choice_b: usize) -> Self {
        let ca = &model.categories[cat_a];
        let cb = &model.categories[cat_b];
        let a = &ca.choices[choice_a];
        let b = &cb.choices[choice_b];
        Self::warning(format!(
            "Warning - No pair possible:  [ {}={} {}={} ]",
            ca.name, a.name, cb.name, b.name
        ))
    }

    /// A single or error choice for which no valid completion of the other
    /// columns exists at all (every fill attempt leaves an unmet `requires`
    /// or a property clash). There is no invariant-violating placeholder
    /// vector to fall back to, so this choice is simply reported and left
    /// out of the singles/errors section instead.
    pub fn no_special_vector(model: &Model, cat: usize, choice: usize) -> Self {
        let c = &model.categories[cat];
        let ch = &c.choices[choice];
        Self::warning(format!(
            "Warning - No single/error vector possible:  [ {}={} ]",
            c.name, ch.name
        ))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

