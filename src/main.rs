//! # sat-triage
//!
//! `sat-triage` decides the satisfiability of propositional CNF formulas.
//! It reads the plain clause-per-line text format (space-separated literals,
//! `0` terminator, blank line between formulas) and reports, for each
//! formula, the verdict, the procedure that produced it, and the runtime.
//!
//! Two modes are available:
//!
//! 1. **Pipeline** (default): a bounded resolution closure runs first; when
//!    it hits its iteration or clause bound, a DPLL search with a wall-clock
//!    timeout takes over. The reported result names the deciding method, or
//!    `TIMEOUT` when even DPLL runs out of budget.
//! 2. **Comparison** (`--compare`): resolution, Davis-Putnam and DPLL each
//!    run independently on every formula, with per-procedure runtimes.
//!
//! ## Usage
//!
//! ```sh
//! # Solve every formula in a file with the pipeline
//! sat-triage formulas.txt
//!
//! # The same, spelled out, with tighter resolution bounds
//! sat-triage file --path formulas.txt --max-iterations 2 --max-clauses 500
//!
//! # Solve an inline formula and print the model
//! sat-triage text --input "1 -2 0
//! 2 3 0" --print-solution
//!
//! # Compare all three procedures on 50 random formulas, saving results
//! sat-triage generate --formulas 50 --seed 7 --compare --output results.txt
//!
//! # Solve every .txt/.cnf file under a directory
//! sat-triage dir --path benchmarks/
//! ```
//!
//! Memory figures in the `--stats` table come from jemalloc, which is also
//! installed as the global allocator.

use crate::command_line::cli::{Cli, Commands};
use clap::Parser;

mod command_line;
mod sat;

/// Global allocator using `tikv-jemallocator`, both for performance and so
/// the stats table can report allocation figures.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    // A bare path with no subcommand is shorthand for `file --path`.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(command_line::cli::solve_file(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => {
            exit_on_error(command_line::cli::solve_file(&path, &common));
        }
        Some(Commands::Dir { path, common }) => {
            exit_on_error(command_line::cli::solve_dir(&path, &common));
        }
        Some(Commands::Text { input, common }) => {
            exit_on_error(command_line::cli::solve_text(&input, &common));
        }
        Some(Commands::Generate {
            formulas,
            clauses,
            variables,
            unsat_probability,
            seed,
            common,
        }) => {
            let config = sat::generator::GeneratorConfig {
                clauses,
                variables,
                unsat_injection_probability: unsat_probability,
            };
            exit_on_error(command_line::cli::generate(formulas, &config, seed, &common));
        }
        Some(Commands::Completions { shell }) => command_line::cli::completions(shell),
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn exit_on_error(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
