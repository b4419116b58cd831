//! DPLL (Davis-Putnam-Logemann-Loveland) search with a cooperative deadline.
//!
//! The simplification rules are the same as the Davis-Putnam procedure, but
//! each elimination, propagation and branch step also extends a partial
//! [`Assignment`], so a satisfiable verdict carries its witness. Every
//! recursive invocation first polls a wall-clock deadline; a call that finds
//! the deadline passed aborts with [`DpllResult::Cancelled`] before doing
//! any work. Cancellation is cooperative only: a simplification step already
//! underway runs to completion before the next poll.
//!
//! Backtracking is implicit. Each branch receives freshly derived formula
//! and assignment snapshots, so abandoning a branch means simply returning
//! from it; nothing is undone in place.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::time::{Duration, Instant};

/// Outcome of a single (possibly recursive) [`dpll`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DpllResult {
    /// Satisfiable, with the partial assignment that witnesses it. Variables
    /// absent from the witness may take arbitrary values.
    Sat(Assignment),
    /// Unsatisfiable under the assignment the call was entered with.
    Unsat,
    /// The deadline passed before the call could decide. Propagated
    /// unchanged to the caller.
    Cancelled,
}

/// Outcome of a deadline-wrapped solve. Mirrors [`DpllResult`] with the
/// cancellation translated into a result value rather than an abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Satisfiable, with a witnessing assignment.
    Sat(Assignment),
    /// Unsatisfiable.
    Unsat,
    /// The search exceeded its time budget. Distinct from both verdicts and
    /// never collapsed into them.
    Timeout,
}

/// Recursive DPLL over `cnf`, extending `assignment` one variable per step.
///
/// The `true` branch of a split is explored first; its satisfying
/// assignment, if any, is returned without touching the `false` branch.
#[must_use]
pub fn dpll(cnf: &Cnf, assignment: &Assignment, deadline: Instant) -> DpllResult {
    if Instant::now() >= deadline {
        log::trace!("dpll: deadline passed with {} clauses left", cnf.len());
        return DpllResult::Cancelled;
    }

    if cnf.is_empty() {
        return DpllResult::Sat(assignment.clone());
    }
    if cnf.has_empty_clause() {
        return DpllResult::Unsat;
    }

    if let Some(pure) = cnf.first_pure_literal() {
        return dpll(&cnf.assign(pure), &assignment.with(pure), deadline);
    }

    if let Some(unit) = cnf.unit_literals().next() {
        return dpll(&cnf.assign(unit), &assignment.with(unit), deadline);
    }

    let var = cnf
        .first_literal()
        .expect("clauses remain, so a literal remains")
        .variable();

    let positive = Literal::of(var, true);
    match dpll(&cnf.assign(positive), &assignment.with(positive), deadline) {
        DpllResult::Unsat => {}
        verdict => return verdict,
    }

    let negative = Literal::of(var, false);
    dpll(&cnf.assign(negative), &assignment.with(negative), deadline)
}

/// Runs [`dpll`] against a deadline of now plus `timeout`, translating a
/// cancelled search into [`SolveOutcome::Timeout`].
#[must_use]
pub fn dpll_with_timeout(cnf: &Cnf, timeout: Duration) -> SolveOutcome {
    let deadline = Instant::now() + timeout;

    match dpll(cnf, &Assignment::new(), deadline) {
        DpllResult::Sat(assignment) => SolveOutcome::Sat(assignment),
        DpllResult::Unsat => SolveOutcome::Unsat,
        DpllResult::Cancelled => SolveOutcome::Timeout,
    }
}
