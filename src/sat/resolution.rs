//! Bounded resolution closure.
//!
//! Repeatedly resolves every pair of clauses in a working set, merging the
//! resolvents back in, until one of three things happens: the empty clause
//! is derived (the formula is unsatisfiable), a round contributes nothing
//! new (the closure has saturated), or a resource bound trips.
//!
//! Two approximations are part of the procedure's contract and must not be
//! "fixed" silently:
//!
//! - [`Clause::resolve_on`] eliminates only the first complementary pair of
//!   each clause pair, not every pair, so some resolvents stay tautological
//!   and the closure explored is a subset of full propositional resolution.
//! - A saturated closure without the empty clause is reported as
//!   [`ResolutionVerdict::Saturated`] and read downstream as "satisfiable".
//!   Under the restriction above that is evidence, not proof: saturation as
//!   satisfiability can be read either as an intentional fast filter or as
//!   a latent soundness gap, and both readings are left open here. Callers
//!   who need certainty must treat `Saturated` as "sat or unknown" and
//!   confirm with a complete procedure.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Outcome of the bounded closure computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionVerdict {
    /// The empty clause was derived: the formula is unsatisfiable.
    Unsat,
    /// A full round produced no clause absent from the working set. Read as
    /// satisfiable by callers, with the caveat documented on this module.
    Saturated,
    /// An iteration or clause-count bound tripped before either of the
    /// conclusive outcomes. Not an error: the defined trigger for falling
    /// back to another procedure.
    OutOfBounds,
}

impl ResolutionVerdict {
    /// Whether the closure reached a conclusive outcome.
    #[must_use]
    pub const fn is_conclusive(self) -> bool {
        !matches!(self, Self::OutOfBounds)
    }
}

/// Resource bounds for [`resolution_closure`]. Both must stay configurable
/// so tests can force the out-of-bounds path with tight limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionLimits {
    /// Maximum number of full pairwise rounds.
    pub max_iterations: usize,
    /// Working-set size above which a round refuses to start.
    pub max_clauses: usize,
}

impl Default for ResolutionLimits {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            max_clauses: 5000,
        }
    }
}

/// Computes the bounded resolution closure of `cnf`.
///
/// The working set starts as the deduplicated input clauses. Each round
/// checks the clause bound, resolves every unordered pair, short-circuits to
/// [`ResolutionVerdict::Unsat`] on an empty resolvent, and merges the new
/// resolvents; a round that contributes nothing new saturates the closure.
/// Exhausting the iteration budget yields [`ResolutionVerdict::OutOfBounds`].
#[must_use]
pub fn resolution_closure(cnf: &Cnf, limits: ResolutionLimits) -> ResolutionVerdict {
    if cnf.has_empty_clause() {
        return ResolutionVerdict::Unsat;
    }

    let mut working: FxHashSet<Clause> = cnf.iter().cloned().collect();

    for round in 1..=limits.max_iterations {
        if working.len() > limits.max_clauses {
            log::debug!(
                "resolution: {} clauses exceed the bound of {} at round {round}, giving up",
                working.len(),
                limits.max_clauses,
            );
            return ResolutionVerdict::OutOfBounds;
        }

        let mut generated: FxHashSet<Clause> = FxHashSet::default();

        for (left, right) in working.iter().tuple_combinations::<(_, _)>() {
            if let Some(resolvent) = left.resolve_on(right) {
                if resolvent.is_empty() {
                    log::trace!("resolution: empty clause from {left} and {right}");
                    return ResolutionVerdict::Unsat;
                }
                generated.insert(resolvent);
            }
        }

        if generated.is_subset(&working) {
            log::trace!("resolution: saturated after round {round}");
            return ResolutionVerdict::Saturated;
        }

        working.extend(generated);
    }

    ResolutionVerdict::OutOfBounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(rows: &[&[i32]]) -> Cnf {
        Cnf::try_from_rows(rows.iter().map(|row| row.iter().copied()))
            .expect("test formula")
    }

    #[test]
    fn test_contradiction_is_unsat() {
        let formula = cnf(&[&[1], &[-1]]);
        assert_eq!(
            resolution_closure(&formula, ResolutionLimits::default()),
            ResolutionVerdict::Unsat
        );
    }

    #[test]
    fn test_input_empty_clause_is_unsat() {
        let formula = cnf(&[&[1, 2], &[]]);
        assert_eq!(
            resolution_closure(&formula, ResolutionLimits::default()),
            ResolutionVerdict::Unsat
        );
    }

    #[test]
    fn test_empty_formula_saturates() {
        assert_eq!(
            resolution_closure(&Cnf::default(), ResolutionLimits::default()),
            ResolutionVerdict::Saturated
        );
    }

    #[test]
    fn test_satisfiable_formula_saturates() {
        let formula = cnf(&[&[1, 2], &[-1, 2]]);
        assert_eq!(
            resolution_closure(&formula, ResolutionLimits::default()),
            ResolutionVerdict::Saturated
        );
    }

    #[test]
    fn test_duplicate_clauses_collapse() {
        let formula = cnf(&[&[1, 2], &[2, 1], &[1, 2]]);
        assert_eq!(
            resolution_closure(&formula, ResolutionLimits::default()),
            ResolutionVerdict::Saturated
        );
    }

    #[test]
    fn test_clause_bound_trips() {
        let formula = cnf(&[&[1, 2], &[-1, 3], &[-2, 3]]);
        let limits = ResolutionLimits {
            max_iterations: 10,
            max_clauses: 2,
        };
        assert_eq!(
            resolution_closure(&formula, limits),
            ResolutionVerdict::OutOfBounds
        );
    }

    #[test]
    fn test_iteration_bound_trips() {
        // Deriving the contradiction from this chain needs more than one
        // round, so a one-round budget is inconclusive.
        let formula = cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]);
        let limits = ResolutionLimits {
            max_iterations: 1,
            max_clauses: 5000,
        };
        assert_eq!(
            resolution_closure(&formula, limits),
            ResolutionVerdict::OutOfBounds
        );
    }

    #[test]
    fn test_deep_contradiction_found_within_default_budget() {
        // All four polarity combinations over two variables: unsatisfiable,
        // but only via intermediate unit resolvents.
        let formula = cnf(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]);
        assert_eq!(
            resolution_closure(&formula, ResolutionLimits::default()),
            ResolutionVerdict::Unsat
        );
    }
}
