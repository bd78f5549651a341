//! GenPairs CLI — pairwise test-vector generator for category-partition specs.

mod output;
mod suite_io;

use clap::Parser as ClapParser;
use genpairs_compiler::compiler::builder::build_pairwise;
use genpairs_compiler::compiler::pairs::build_pair_table;
use genpairs_compiler::compiler::singles::enumerate_singles_errors;
use genpairs_compiler::compiler::suite::{apply_initial_suite, report_uncovered_pairs};
use genpairs_compiler::compile;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}

/// Pairwise (2-way) combinatorial test vector generator.
#[derive(ClapParser)]
#[command(
    name = "genpairs",
    version,
    about = "Generates pairwise test vectors from a category-partition spec",
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}

Examples:
  genpairs --spec suite.gp                       Read a spec and print vectors
  genpairs --spec suite.gp --csv -o vectors.csv  Write CSV output to a file
  genpairs --spec suite.gp --singles-only        Emit only single/error vectors
  genpairs --spec suite.gp --initial-suite prior.csv --report-uncovered-pairs
"
)]
struct Cli {
    /// Path to the spec source file (default: read from stdin)
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Seed for the builder's tie-breaking randomness
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Emit CSV instead of the human-readable table
    #[arg(long)]
    csv: bool,

    /// Omit the singles/errors section
    #[arg(long, conflicts_with = "singles_only")]
    omit_singles: bool,

    /// Emit only the singles/errors section
    #[arg(long)]
    singles_only: bool,

    /// Suppress columns whose only non-single, non-error choice count is <= 1
    #[arg(long)]
    varying_columns: bool,

    /// Path to a pre-existing suite (CSV: header row of category names, one row per vector)
    #[arg(long)]
    initial_suite: Option<PathBuf>,

    /// List feasible, still-uncovered pairs instead of building the pairwise section
    #[arg(long, requires = "initial_suite")]
    report_uncovered_pairs: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn read_spec_source(path: &Option<PathBuf>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match read_spec_source(&cli.spec) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} reading spec: {}", red("error:"), e);
            return ExitCode::FAILURE;
        }
    };

    let model = match compile(&source) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{} {}", red("error:"), e);
            return ExitCode::FAILURE;
        }
    };

    let (mut table, mut warnings) = build_pair_table(&model);

    if let Some(suite_path) = &cli.initial_suite {
        let (header, rows) = match suite_io::read_suite_csv(suite_path) {
            Ok(hr) => hr,
            Err(e) => {
                eprintln!("{} reading initial suite: {}", red("error:"), e);
                return ExitCode::FAILURE;
            }
        };
        let mut suite_diags = apply_initial_suite(&model, &mut table, &header, &rows);
        warnings.append(&mut suite_diags);
    }

    if cli.report_uncovered_pairs {
        let uncovered = report_uncovered_pairs(&table);
        let rendered = output::render_uncovered_pairs(&model, &warnings, &uncovered);
        return write_output(&cli.output, &rendered);
    }

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let (pairwise, mut build_warnings) = if cli.singles_only {
        (Vec::new(), Vec::new())
    } else {
        build_pairwise(&model, &mut table, &mut rng)
    };
    warnings.append(&mut build_warnings);

    let specials = if cli.omit_singles {
        Vec::new()
    } else {
        let (specials, mut special_warnings) = enumerate_singles_errors(&model);
        warnings.append(&mut special_warnings);
        specials
    };

    let rendered = if cli.csv {
        output::render_csv(&model, &warnings, &pairwise, &specials, &cli)
    } else {
        output::render_human(&model, &warnings, &pairwise, &specials, &cli)
    };

    write_output(&cli.output, &rendered)
}

fn write_output(path: &Option<PathBuf>, rendered: &str) -> ExitCode {
    let result = match path {
        Some(p) => std::fs::write(p, rendered),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} writing output: {}", red("error:"), e);
            ExitCode::FAILURE
        }
    }
}
