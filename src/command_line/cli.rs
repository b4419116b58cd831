use crate::sat::cnf::Cnf;
use crate::sat::dpll::SolveOutcome;
use crate::sat::generator::{GeneratorConfig, random_formulas};
use crate::sat::resolution::{ResolutionLimits, ResolutionVerdict};
use crate::sat::solver::{Comparison, Report, SolverOptions, compare, solve_with};
use crate::sat::text;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sat-triage",
    version,
    about = "A CNF satisfiability checker with a resolution-then-DPLL pipeline"
)]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a formula file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `generate`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve every formula in a text file (blank lines separate formulas).
    File {
        /// Path to the formula file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every formula file found under a directory.
    Dir {
        /// Path to the directory. Files with a `.txt` or `.cnf` extension
        /// are solved; everything else is skipped.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a formula provided as plain text.
    Text {
        /// Formula input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line is a clause: space-separated literals terminated by 0.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate random formulas and solve each of them.
    Generate {
        /// How many formulas to generate.
        #[arg(long, default_value_t = 10)]
        formulas: usize,

        /// Number of random clauses per formula.
        #[arg(long, default_value_t = 20)]
        clauses: usize,

        /// Variables are drawn from 1..=variables.
        #[arg(long, default_value_t = 10)]
        variables: u32,

        /// Probability of appending a contradictory unit pair, forcing the
        /// formula unsatisfiable.
        #[arg(long, default_value_t = 0.3)]
        unsat_probability: f64,

        /// Seed for the random generator; omit for a fresh seed per run.
        #[arg(long)]
        seed: Option<u64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug output, printing each formula before solving it.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Verify any satisfying assignment against the original formula.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Print formula and runtime statistics after each solve.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment (model) when one is found.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Run all three procedures (resolution, Davis-Putnam, DPLL) on each
    /// formula instead of the fallback pipeline, reporting each outcome.
    #[arg(long, default_value_t = false)]
    pub(crate) compare: bool,

    /// Write per-formula results to this file as well as stdout.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Maximum number of resolution rounds before falling back.
    #[arg(long, default_value_t = 3)]
    pub(crate) max_iterations: usize,

    /// Resolution working-set size above which the closure gives up.
    #[arg(long, default_value_t = 5000)]
    pub(crate) max_clauses: usize,

    /// Wall-clock budget for the DPLL fallback, in seconds.
    #[arg(long, default_value_t = 5.0)]
    pub(crate) timeout_secs: f64,
}

impl CommonOptions {
    pub(crate) fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            resolution: ResolutionLimits {
                max_iterations: self.max_iterations,
                max_clauses: self.max_clauses,
            },
            dpll_timeout: Duration::from_secs_f64(self.timeout_secs),
        }
    }
}

/// Solves every formula in the file at `path`.
///
/// # Errors
///
/// If the file cannot be read, contains no formulas, or the results file
/// cannot be written.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let formulas = text::read_formulas(path)
        .map_err(|e| format!("{}: {e}", path.display()))?;

    if formulas.is_empty() {
        return Err(format!("no formulas found in {}", path.display()));
    }

    println!("Loaded {} formula(s) from {}", formulas.len(), path.display());
    process_formulas(&formulas, common)
}

/// Walks `path` and solves every `.txt`/`.cnf` formula file found.
///
/// # Errors
///
/// If `path` is not a directory, or any formula file fails to solve.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        if file_path
            .extension()
            .is_none_or(|ext| ext != "txt" && ext != "cnf")
        {
            eprintln!("Skipping non-formula file: {}", file_path.display());
            continue;
        }

        println!("Solving: {}", file_path.display());
        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Parses `input` as inline formula text and solves each formula in it.
///
/// # Errors
///
/// If the input does not parse or contains no formulas.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let formulas = text::parse_formulas(input.as_bytes()).map_err(|e| e.to_string())?;

    if formulas.is_empty() {
        return Err(String::from("no formulas found in input"));
    }

    process_formulas(&formulas, common)
}

/// Generates `count` random formulas per `config` and solves each of them.
///
/// # Errors
///
/// If the results file cannot be written.
pub(crate) fn generate(
    count: usize,
    config: &GeneratorConfig,
    seed: Option<u64>,
    common: &CommonOptions,
) -> Result<(), String> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let formulas = random_formulas(&mut rng, config, count);

    println!(
        "Generated {count} formula(s) with {} clauses over {} variables",
        config.clauses, config.variables
    );
    process_formulas(&formulas, common)
}

/// Prints completion definitions for `shell` to stdout.
pub(crate) fn completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "sat-triage", &mut io::stdout());
}

fn process_formulas(formulas: &[Cnf], common: &CommonOptions) -> Result<(), String> {
    let options = common.solver_options();

    let mut sink = match &common.output {
        Some(path) => Some(
            File::create(path).map_err(|e| format!("{}: {e}", path.display()))?,
        ),
        None => None,
    };

    for (idx, formula) in formulas.iter().enumerate() {
        let index = idx + 1;

        if common.debug {
            println!("Formula #{index}:\n{formula}");
        }

        if common.compare {
            let comparison = compare(formula, &options);
            print_comparison(index, &comparison, common);
            if let Some(file) = sink.as_mut() {
                write_comparison(file, index, formula, &comparison)
                    .map_err(|e| e.to_string())?;
            }
        } else {
            let report = solve_with(formula, &options);
            print_report(index, formula, &report, common);
            if let Some(file) = sink.as_mut() {
                write_report(file, index, formula, &report).map_err(|e| e.to_string())?;
            }
        }
    }

    if let Some(path) = &common.output {
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

fn print_report(index: usize, formula: &Cnf, report: &Report, common: &CommonOptions) {
    println!(
        "Formula #{index}: {}, Result: {}, Runtime: {:.4} seconds",
        report.method,
        report.verdict,
        report.elapsed.as_secs_f64()
    );

    if let Some(witness) = &report.witness {
        if common.verify {
            let ok = witness.satisfies(formula);
            println!("Verified: {ok:?}");
            assert!(ok, "Solution failed verification!");
        }
        if common.print_solution {
            println!("Model: {witness}");
        }
    }

    if common.stats {
        print_stats(formula, report);
    }
}

fn print_comparison(index: usize, comparison: &Comparison, common: &CommonOptions) {
    println!("Formula #{index}:");
    println!(
        "Resolution: {}, Runtime: {:.4} seconds",
        resolution_label(comparison.resolution.outcome),
        comparison.resolution.elapsed.as_secs_f64()
    );
    println!(
        "Davis-Putnam: {}, Runtime: {:.4} seconds",
        verdict_label(comparison.davis_putnam.outcome),
        comparison.davis_putnam.elapsed.as_secs_f64()
    );
    println!(
        "DPLL: {}, Runtime: {:.4} seconds",
        dpll_label(&comparison.dpll.outcome),
        comparison.dpll.elapsed.as_secs_f64()
    );

    if common.print_solution {
        if let SolveOutcome::Sat(witness) = &comparison.dpll.outcome {
            println!("Model: {witness}");
        }
    }
}

const fn resolution_label(verdict: ResolutionVerdict) -> &'static str {
    match verdict {
        ResolutionVerdict::Unsat => "NOT SAT",
        ResolutionVerdict::Saturated => "SAT",
        ResolutionVerdict::OutOfBounds => "INCONCLUSIVE",
    }
}

const fn verdict_label(satisfiable: bool) -> &'static str {
    if satisfiable { "SAT" } else { "NOT SAT" }
}

fn dpll_label(outcome: &SolveOutcome) -> &'static str {
    match outcome {
        SolveOutcome::Sat(_) => "SAT",
        SolveOutcome::Unsat => "NOT SAT",
        SolveOutcome::Timeout => "TIMEOUT",
    }
}

fn write_report(
    sink: &mut impl Write,
    index: usize,
    formula: &Cnf,
    report: &Report,
) -> io::Result<()> {
    writeln!(sink, "Formula #{index}:")?;
    writeln!(sink, "{formula}")?;
    writeln!(
        sink,
        "Method: {}, Result: {}, Runtime: {:.4} seconds",
        report.method,
        report.verdict,
        report.elapsed.as_secs_f64()
    )?;
    writeln!(sink, "{}", "-".repeat(50))
}

fn write_comparison(
    sink: &mut impl Write,
    index: usize,
    formula: &Cnf,
    comparison: &Comparison,
) -> io::Result<()> {
    writeln!(sink, "Formula #{index}:")?;
    writeln!(sink, "{formula}")?;
    writeln!(
        sink,
        "Resolution: {}, Runtime: {:.4} seconds",
        resolution_label(comparison.resolution.outcome),
        comparison.resolution.elapsed.as_secs_f64()
    )?;
    writeln!(
        sink,
        "Davis-Putnam: {}, Runtime: {:.4} seconds",
        verdict_label(comparison.davis_putnam.outcome),
        comparison.davis_putnam.elapsed.as_secs_f64()
    )?;
    writeln!(
        sink,
        "DPLL: {}, Runtime: {:.4} seconds",
        dpll_label(&comparison.dpll.outcome),
        comparison.dpll.elapsed.as_secs_f64()
    )?;
    writeln!(sink, "{}", "-".repeat(50))
}

/// Reads allocation figures from jemalloc, in MiB.
fn memory_usage() -> (f64, f64) {
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

fn print_stats(formula: &Cnf, report: &Report) {
    let (allocated, resident) = memory_usage();

    println!("=======================[ Formula statistics ]========================");
    stat_line("Variables", formula.variables().len());
    stat_line("Clauses", formula.len());
    stat_line("Literals", formula.literal_count());
    println!("========================[ Search statistics ]========================");
    stat_line("Method", report.method);
    stat_line("Result", report.verdict);
    stat_line("Runtime (s)", format!("{:.4}", report.elapsed.as_secs_f64()));
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    println!("=====================================================================");
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}
