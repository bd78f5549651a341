//! Initial-suite Adapter (spec.md §4.6): subtracts the pairs already
//! covered by a pre-existing tabular suite, or — in report mode — lists the
//! feasible pairs that suite leaves uncovered. Rows are handed in already
//! split into cells; reading the actual CSV file is the CLI's job (spec.md
//! §1 treats file I/O and CSV as external collaborators).

use crate::compiler::pairs::{PairKey, PairTable};
use crate::compiler::semantic::Model;
use crate::diagnostics::Diagnostic;

/// Marks every normal/normal pair in each accepted row as covered. Rows with
/// the wrong arity, or referencing an unknown category or choice, are
/// reported and skipped — never fatal.
pub fn apply_initial_suite(
    model: &Model,
    table: &mut PairTable,
    header: &[String],
    rows: &[Vec<String>],
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let cat_indices: Vec<Option<usize>> = header
        .iter()
        .map(|name| model.categories.iter().position(|c| c.name.as_str() == name))
        .collect();

    for (row_num, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            diagnostics.push(Diagnostic::warning(format!(
                "initial-suite row {} rejected: expected {} columns, found {}",
                row_num + 1,
                header.len(),
                row.len()
            )));
            continue;
        }

        let mut resolved: Vec<(usize, usize)> = Vec::with_capacity(row.len());
        let mut accepted = true;
        for (col_idx, cell) in row.iter().enumerate() {
            let Some(cat_idx) = cat_indices[col_idx] else {
                diagnostics.push(Diagnostic::warning(format!(
                    "initial-suite row {} rejected: unknown category '{}'",
                    row_num + 1,
                    header[col_idx]
                )));
                accepted = false;
                break;
            };
            match model.categories[cat_idx]
                .choices
                .iter()
                .position(|c| c.name.as_str() == cell)
            {
                Some(choice_idx) => resolved.push((cat_idx, choice_idx)),
                None => {
                    diagnostics.push(Diagnostic::warning(format!(
                        "initial-suite row {} rejected: unknown choice '{}' in category '{}'",
                        row_num + 1,
                        cell,
                        header[col_idx]
                    )));
                    accepted = false;
                    break;
                }
            }
        }
        if !accepted {
            continue;
        }

        for i in 0..resolved.len() {
            for j in (i + 1)..resolved.len() {
                let (cat_i, choice_i) = resolved[i];
                let (cat_j, choice_j) = resolved[j];
                if !model.choice(cat_i, choice_i).is_normal() || !model.choice(cat_j, choice_j).is_normal() {
                    continue;
                }
                let key = if cat_i < cat_j {
                    PairKey {
                        cat_a: cat_i,
                        choice_a: choice_i,
                        cat_b: cat_j,
                        choice_b: choice_j,
                    }
                } else {
                    PairKey {
                        cat_a: cat_j,
                        choice_a: choice_j,
                        cat_b: cat_i,
                        choice_b: choice_i,
                    }
                };
                table.mark_covered(key);
            }
        }
    }

    diagnostics
}

/// `report uncovered pairs` mode: list every feasible pair the initial
/// suite did not already cover, skipping vector construction entirely.
pub fn report_uncovered_pairs(table: &PairTable) -> Vec<PairKey> {
    table.uncovered_feasible().collect()
}
