//! Renders the human-readable and CSV output formats (spec section 6).

use crate::Cli;
use genpairs_compiler::compiler::builder::BuiltVector;
use genpairs_compiler::compiler::pairs::PairKey;
use genpairs_compiler::compiler::semantic::Model;
use genpairs_compiler::compiler::singles::SpecialVector;
use genpairs_compiler::diagnostics::Diagnostic;

fn visible_columns(model: &Model, varying_only: bool) -> Vec<usize> {
    (0..model.category_count())
        .filter(|&c| !varying_only || model.categories[c].normal_indices().count() > 1)
        .collect()
}

/// Header row (right-aligned, padded to one shared column width across the
/// whole table), an underscore separator, then one row per vector.
fn render_table(model: &Model, cols: &[usize], assignments: &[Vec<usize>]) -> String {
    let headers: Vec<&str> = cols.iter().map(|&c| model.categories[c].name.as_str()).collect();
    let mut width = headers.iter().map(|h| h.len()).max().unwrap_or(0);

    let cells: Vec<Vec<&str>> = assignments
        .iter()
        .map(|row| {
            cols.iter()
                .map(|&c| model.categories[c].choices[row[c]].name.as_str())
                .collect()
        })
        .collect();
    for row in &cells {
        for cell in row {
            width = width.max(cell.len());
        }
    }

    let mut out = String::new();
    for h in &headers {
        out.push_str(&format!("{:>width$} ", h, width = width));
    }
    out.push('\n');
    out.push_str(&"_".repeat((width + 1) * headers.len()));
    out.push('\n');
    for row in &cells {
        for cell in row {
            out.push_str(&format!("{:>width$} ", cell, width = width));
        }
        out.push('\n');
    }
    out
}

pub fn render_human(
    model: &Model,
    warnings: &[Diagnostic],
    pairwise: &[BuiltVector],
    specials: &[SpecialVector],
    cli: &Cli,
) -> String {
    let mut out = String::new();
    for w in warnings {
        out.push_str(&w.message);
        out.push('\n');
    }

    let cols = visible_columns(model, cli.varying_columns);

    if !cli.singles_only {
        out.push_str(&format!("Pairwise coverage: {}  test vectors\n", pairwise.len()));
        let rows: Vec<Vec<usize>> = pairwise.iter().map(|v| v.assignment.clone()).collect();
        out.push_str(&render_table(model, &cols, &rows));
    }

    if !cli.omit_singles {
        out.push_str(&format!("Single and error vectors: {}  test vectors\n", specials.len()));
        let rows: Vec<Vec<usize>> = specials.iter().map(|v| v.assignment.clone()).collect();
        out.push_str(&render_table(model, &cols, &rows));
    }

    out
}

pub fn render_csv(
    model: &Model,
    warnings: &[Diagnostic],
    pairwise: &[BuiltVector],
    specials: &[SpecialVector],
    cli: &Cli,
) -> String {
    let cols = visible_columns(model, cli.varying_columns);
    let mut out = String::new();
    for w in warnings {
        out.push_str(&w.message);
        out.push('\n');
    }
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let header: Vec<&str> = cols.iter().map(|&c| model.categories[c].name.as_str()).collect();
    writer.write_record(&header).expect("in-memory CSV write never fails");

    if !cli.singles_only {
        for v in pairwise {
            let row: Vec<&str> = cols
                .iter()
                .map(|&c| model.categories[c].choices[v.assignment[c]].name.as_str())
                .collect();
            writer.write_record(&row).expect("in-memory CSV write never fails");
        }
    }
    if !cli.omit_singles {
        for v in specials {
            let row: Vec<&str> = cols
                .iter()
                .map(|&c| model.categories[c].choices[v.assignment[c]].name.as_str())
                .collect();
            writer.write_record(&row).expect("in-memory CSV write never fails");
        }
    }

    out.push_str(
        &String::from_utf8(writer.into_inner().expect("in-memory CSV writer never errors on flush"))
            .expect("category and choice names are valid UTF-8"),
    );
    out
}

pub fn render_uncovered_pairs(model: &Model, warnings: &[Diagnostic], pairs: &[PairKey]) -> String {
    let mut out = String::new();
    for w in warnings {
        out.push_str(&w.message);
        out.push('\n');
    }
    out.push_str(&format!("Uncovered pairs: {}\n", pairs.len()));
    for key in pairs {
        let ca = &model.categories[key.cat_a];
        let cb = &model.categories[key.cat_b];
        out.push_str(&format!(
            "  [ {}={} {}={} ]\n",
            ca.name, ca.choices[key.choice_a].name, cb.name, cb.choices[key.choice_b].name
        ));
    }
    out
}
