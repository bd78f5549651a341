//! Singles/Errors Enumerator (spec.md §4.5): one vector per `single` or
//! `error` choice, with every other column filled by a normal choice
//! compatible with the rest of the vector. Errors are emitted before
//! singles; within each group, in category-then-input order.

use crate::compiler::pairs::{search, PartialState};
use crate::compiler::semantic::{ChoiceKind, Model};
use crate::diagnostics::Diagnostic;

#[derive(Debug, Clone)]
pub struct SpecialVector {
    pub special_cat: usize,
    pub special_choice: usize,
    pub assignment: Vec<usize>,
}

/// Fixes the special choice, then hands the remaining categories to the
/// same backtracking `search` the pair enumerator and vector builder use —
/// a single unchecked forward pass over "first compatible choice" can leave
/// a `requires` unmet several columns later with no way back, so this needs
/// the same backtrack-on-dead-end machinery as everywhere else a partial
/// assignment gets completed. Returns `None` if no valid completion exists.
fn build_special_vector(model: &Model, special_cat: usize, special_choice: usize) -> Option<SpecialVector> {
    let mut state = PartialState::new(model.category_count());
    if !state.is_compatible(model, special_cat, special_choice) {
        return None;
    }
    state.place(model, special_cat, special_choice);
    if !state.requires_reachable(model) {
        return None;
    }

    let remaining: Vec<usize> = (0..model.category_count())
        .filter(|&c| c != special_cat)
        .collect();
    if !search(model, &mut state, &remaining) {
        return None;
    }

    Some(SpecialVector {
        special_cat,
        special_choice,
        assignment: state
            .assignment()
            .iter()
            .map(|slot| slot.expect("search only returns true on a total assignment"))
            .collect(),
    })
}

pub fn enumerate_singles_errors(model: &Model) -> (Vec<SpecialVector>, Vec<Diagnostic>) {
    let mut vectors = Vec::new();
    let mut diagnostics = Vec::new();
    for kind in [ChoiceKind::Error, ChoiceKind::Single] {
        for cat in 0..model.category_count() {
            for (choice_idx, choice) in model.categories[cat].choices.iter().enumerate() {
                if choice.kind == kind {
                    match build_special_vector(model, cat, choice_idx) {
                        Some(v) => vectors.push(v),
                        None => diagnostics.push(Diagnostic::no_special_vector(model, cat, choice_idx)),
                    }
                }
            }
        }
    }
    (vectors, diagnostics)
}
