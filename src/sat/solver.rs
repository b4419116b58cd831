//! The solving pipeline: resolution first, DPLL as the fallback.
//!
//! Resolution is cheap on small formulas and conclusive whenever it stays
//! within its bounds, so it always runs first. Only an out-of-bounds
//! outcome triggers the DPLL search, itself capped by a wall-clock timeout
//! with no further fallback behind it. The Davis-Putnam procedure is
//! deliberately absent from this chain: it exists as a directly invokable
//! alternative for comparison runs only.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::davis_putnam::davis_putnam;
use crate::sat::dpll::{SolveOutcome, dpll_with_timeout};
use crate::sat::resolution::{ResolutionLimits, ResolutionVerdict, resolution_closure};
use std::fmt;
use std::time::{Duration, Instant};

/// The procedure that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Resolution,
    Dpll,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolution => write!(f, "Resolution"),
            Self::Dpll => write!(f, "DPLL"),
        }
    }
}

/// Final answer of the pipeline. `Timeout` is a first-class outcome so that
/// an exhausted search is never mistaken for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
    Timeout,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sat => write!(f, "SAT"),
            Self::Unsat => write!(f, "NOT SAT"),
            Self::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

/// Resource bounds for the pipeline. Everything is caller-adjustable;
/// [`SolverOptions::default`] carries the conventional limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub resolution: ResolutionLimits,
    pub dpll_timeout: Duration,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            resolution: ResolutionLimits::default(),
            dpll_timeout: Duration::from_secs(5),
        }
    }
}

/// What the pipeline decided, how, and how long the deciding procedure ran.
#[derive(Debug, Clone)]
pub struct Report {
    pub method: Method,
    pub verdict: Verdict,
    /// Wall-clock time of the procedure that produced the verdict (the
    /// resolution attempt is not counted against a fallback DPLL run).
    pub elapsed: Duration,
    /// The satisfying assignment, when the deciding procedure was DPLL and
    /// the formula is satisfiable. Resolution produces no model.
    pub witness: Option<Assignment>,
}

/// Solves `cnf` with the default limits. See [`solve_with`].
#[must_use]
pub fn solve(cnf: &Cnf) -> Report {
    solve_with(cnf, &SolverOptions::default())
}

/// Runs the resolution-then-DPLL pipeline on `cnf`.
///
/// A conclusive resolution outcome is reported as-is (saturation counts as
/// satisfiable, see the caveat on [`crate::sat::resolution`]). Otherwise the
/// verdict comes from the timed DPLL search, with [`Verdict::Timeout`] as
/// the answer of last resort.
#[must_use]
pub fn solve_with(cnf: &Cnf, options: &SolverOptions) -> Report {
    let start = Instant::now();

    match resolution_closure(cnf, options.resolution) {
        ResolutionVerdict::Unsat => Report {
            method: Method::Resolution,
            verdict: Verdict::Unsat,
            elapsed: start.elapsed(),
            witness: None,
        },
        ResolutionVerdict::Saturated => Report {
            method: Method::Resolution,
            verdict: Verdict::Sat,
            elapsed: start.elapsed(),
            witness: None,
        },
        ResolutionVerdict::OutOfBounds => {
            log::debug!("resolution inconclusive, falling back to DPLL");
            let fallback_start = Instant::now();

            let (verdict, witness) = match dpll_with_timeout(cnf, options.dpll_timeout) {
                SolveOutcome::Sat(assignment) => (Verdict::Sat, Some(assignment)),
                SolveOutcome::Unsat => (Verdict::Unsat, None),
                SolveOutcome::Timeout => (Verdict::Timeout, None),
            };

            Report {
                method: Method::Dpll,
                verdict,
                elapsed: fallback_start.elapsed(),
                witness,
            }
        }
    }
}

/// An outcome paired with the wall-clock time it took to produce.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub outcome: T,
    pub elapsed: Duration,
}

fn timed<T>(run: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let outcome = run();
    Timed {
        outcome,
        elapsed: start.elapsed(),
    }
}

/// Side-by-side results of all three procedures on one formula.
///
/// Each procedure runs independently with its own budget; none of them
/// feeds into another. The three outcome types stay distinct on purpose:
/// resolution is three-valued, Davis-Putnam is a plain boolean, and DPLL
/// may time out or carry a witness.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub resolution: Timed<ResolutionVerdict>,
    pub davis_putnam: Timed<bool>,
    pub dpll: Timed<SolveOutcome>,
}

/// Runs resolution, Davis-Putnam and DPLL on `cnf` and reports each
/// procedure's outcome and runtime.
#[must_use]
pub fn compare(cnf: &Cnf, options: &SolverOptions) -> Comparison {
    Comparison {
        resolution: timed(|| resolution_closure(cnf, options.resolution)),
        davis_putnam: timed(|| davis_putnam(cnf)),
        dpll: timed(|| dpll_with_timeout(cnf, options.dpll_timeout)),
    }
}
