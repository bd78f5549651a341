//! Pair enumerator: the universe of required pairs, and the bounded
//! DPLL-style feasibility test from spec.md §4.3.

use crate::compiler::semantic::Model;
use crate::diagnostics::Diagnostic;
use genpairs_core::PropertyName;
use std::collections::HashSet;

/// An unordered pair of (category, choice) endpoints with `cat_a < cat_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub cat_a: usize,
    pub choice_a: usize,
    pub cat_b: usize,
    pub choice_b: usize,
}

/// A partial assignment of choices to categories, tracking just enough
/// state (declared properties, excluded properties, still-unmet requires)
/// to drive the compatibility and reachability checks in spec.md §4.3(i-iii).
/// Shared between the feasibility test and the vector builder.
pub struct PartialState {
    assignment: Vec<Option<usize>>,
    declared: HashSet<PropertyName>,
    excluded: HashSet<PropertyName>,
    needed: HashSet<PropertyName>,
}

impl PartialState {
    pub fn new(category_count: usize) -> Self {
        Self {
            assignment: vec![None; category_count],
            declared: HashSet::new(),
            excluded: HashSet::new(),
            needed: HashSet::new(),
        }
    }

    pub fn assignment(&self) -> &[Option<usize>] {
        &self.assignment
    }

    pub fn get(&self, cat: usize) -> Option<usize> {
        self.assignment[cat]
    }

    pub fn declared(&self) -> &HashSet<PropertyName> {
        &self.declared
    }

    pub fn excluded(&self) -> &HashSet<PropertyName> {
        &self.excluded
    }

    /// Checks rules (i) and (ii): the candidate's excludes don't overlap
    /// properties already declared, and no already-placed choice's excludes
    /// overlap the candidate's declared properties.
    pub fn is_compatible(&self, model: &Model, cat: usize, choice_idx: usize) -> bool {
        let choice = model.choice(cat, choice_idx);
        if choice.excludes.iter().any(|p| self.declared.contains(p)) {
            return false;
        }
        if choice.properties.iter().any(|p| self.excluded.contains(p)) {
            return false;
        }
        true
    }

    pub fn place(&mut self, model: &Model, cat: usize, choice_idx: usize) {
        self.assignment[cat] = Some(choice_idx);
        let choice = model.choice(cat, choice_idx);
        for p in &choice.properties {
            self.declared.insert(p.clone());
        }
        for p in &choice.excludes {
            self.excluded.insert(p.clone());
        }
        for p in &choice.requires {
            self.needed.insert(p.clone());
        }
        self.needed.retain(|p| !self.declared.contains(p));
    }

    pub fn unplace(&mut self, model: &Model, cat: usize) {
        self.assignment[cat] = None;
        self.rebuild(model);
    }

    fn rebuild(&mut self, model: &Model) {
        self.declared.clear();
        self.excluded.clear();
        self.needed.clear();
        for (cat, slot) in self.assignment.iter().enumerate() {
            if let Some(choice_idx) = slot {
                let choice = model.choice(cat, *choice_idx);
                for p in &choice.properties {
                    self.declared.insert(p.clone());
                }
                for p in &choice.excludes {
                    self.excluded.insert(p.clone());
                }
            }
        }
        for (cat, slot) in self.assignment.iter().enumerate() {
            if let Some(choice_idx) = slot {
                let choice = model.choice(cat, *choice_idx);
                for p in &choice.requires {
                    if !self.declared.contains(p) {
                        self.needed.insert(p.clone());
                    }
                }
            }
        }
    }

    /// Rule (iii): every still-unmet `requires` can still be satisfied by a
    /// provider whose category is not yet committed to something else.
    pub fn requires_reachable(&self, model: &Model) -> bool {
        self.needed.iter().all(|p| {
            model
                .providers_of(p)
                .iter()
                .any(|&(provider_cat, _)| self.assignment[provider_cat].is_none())
        })
    }

    pub fn is_total(&self) -> bool {
        self.assignment.iter().all(Option::is_some)
    }

    pub fn is_valid(&self) -> bool {
        self.needed.is_empty()
    }
}

/// Backtracking completion search: tries each remaining category's normal
/// choices in input order, backtracking on dead ends, until every category
/// is filled with a mutually compatible, requires-satisfied choice. Shared
/// by the feasibility test, the vector builder, and the singles/errors
/// enumerator — anywhere a partial assignment needs to be finished off
/// without ever accepting an invalid result.
pub(crate) fn search(model: &Model, state: &mut PartialState, remaining: &[usize]) -> bool {
    let Some((&cat, rest)) = remaining.split_first() else {
        return state.is_total() && state.is_valid();
    };
    let candidates: Vec<usize> = model.categories[cat].normal_indices().collect();
    for choice_idx in candidates {
        if !state.is_compatible(model, cat, choice_idx) {
            continue;
        }
        state.place(model, cat, choice_idx);
        if state.requires_reachable(model) && search(model, state, rest) {
            return true;
        }
        state.unplace(model, cat);
    }
    false
}

/// Searches for any valid complete vector containing both `(cat_a, choice_a)`
/// and `(cat_b, choice_b)`, fixing the two endpoints and filling the rest.
pub fn is_feasible(model: &Model, cat_a: usize, choice_a: usize, cat_b: usize, choice_b: usize) -> bool {
    let mut state = PartialState::new(model.category_count());
    if !state.is_compatible(model, cat_a, choice_a) {
        return false;
    }
    state.place(model, cat_a, choice_a);
    if !state.is_compatible(model, cat_b, choice_b) {
        return false;
    }
    state.place(model, cat_b, choice_b);
    if !state.requires_reachable(model) {
        return false;
    }
    let remaining: Vec<usize> = (0..model.category_count())
        .filter(|&c| c != cat_a && c != cat_b)
        .collect();
    search(model, &mut state, &remaining)
}

pub fn enumerate_required_pairs(model: &Model) -> Vec<PairKey> {
    let mut pairs = Vec::new();
    for cat_a in 0..model.category_count() {
        for cat_b in (cat_a + 1)..model.category_count() {
            for choice_a in model.categories[cat_a].normal_indices() {
                for choice_b in model.categories[cat_b].normal_indices() {
                    pairs.push(PairKey {
                        cat_a,
                        choice_a,
                        cat_b,
                        choice_b,
                    });
                }
            }
        }
    }
    pairs
}

/// Owns the pair-status table for one builder invocation: every required
/// pair transitions `required -> {feasible, infeasible}` exactly once here,
/// and feasible pairs transition `uncovered -> covered` at most once more
/// as the vector builder runs.
pub struct PairTable {
    pub required: Vec<PairKey>,
    feasible: HashSet<PairKey>,
    covered: HashSet<PairKey>,
}

impl PairTable {
    pub fn is_feasible(&self, key: &PairKey) -> bool {
        self.feasible.contains(key)
    }

    pub fn is_covered(&self, key: &PairKey) -> bool {
        self.covered.contains(key)
    }

    pub fn uncovered_feasible(&self) -> impl Iterator<Item = PairKey> + '_ {
        self.required
            .iter()
            .copied()
            .filter(move |k| self.feasible.contains(k) && !self.covered.contains(k))
    }

    pub fn feasible_count(&self) -> usize {
        self.feasible.len()
    }

    pub fn mark_covered(&mut self, key: PairKey) {
        if self.feasible.contains(&key) {
            self.covered.insert(key);
        }
    }

    /// spec.md §4.4 step 3: a seed pair that survives the initial feasibility
    /// test but can't actually be completed during building is retroactively
    /// demoted and dropped from the coverage target.
    pub fn demote_to_infeasible(&mut self, key: PairKey) {
        self.feasible.remove(&key);
        self.covered.remove(&key);
    }
}

pub fn build_pair_table(model: &Model) -> (PairTable, Vec<Diagnostic>) {
    let required = enumerate_required_pairs(model);
    let mut feasible = HashSet::new();
    let mut diagnostics = Vec::new();
    for &key in &required {
        if is_feasible(model, key.cat_a, key.choice_a, key.cat_b, key.choice_b) {
            feasible.insert(key);
        } else {
            diagnostics.push(Diagnostic::infeasible_pair(
                model, key.cat_a, key.choice_a, key.cat_b, key.choice_b,
            ));
        }
    }
    (
        PairTable {
            required,
            feasible,
            covered: HashSet::new(),
        },
        diagnostics,
    )
}
