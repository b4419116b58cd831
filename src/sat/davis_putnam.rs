//! Recursive Davis-Putnam splitting.
//!
//! Answers pure satisfiability with no model. Simplification (pure literal
//! elimination, unit propagation) loops in place; recursion happens only at
//! the branching step, where both cofactors are checked and the results
//! OR-ed. Every path either shrinks the clause set or eliminates a variable,
//! so the procedure terminates.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;

/// Decides satisfiability of `cnf`: `true` means satisfiable.
#[must_use]
pub fn davis_putnam(cnf: &Cnf) -> bool {
    split(cnf.clone())
}

fn split(mut cnf: Cnf) -> bool {
    loop {
        if cnf.has_empty_clause() {
            return false;
        }
        if cnf.is_empty() {
            return true;
        }

        // Pure literal elimination: every clause containing the pure literal
        // is satisfied for free. One literal per pass, then re-simplify.
        if let Some(pure) = cnf.first_pure_literal() {
            cnf = cnf.assign(pure);
            continue;
        }

        // Unit propagation. All units found in this pass are applied in
        // order; a contradicted unit surfaces as an empty clause on the next
        // pass rather than being special-cased here.
        let units: Vec<Literal> = cnf.unit_literals().collect();
        if !units.is_empty() {
            for unit in units {
                cnf = cnf.assign(unit);
            }
            continue;
        }

        // Neither simplification applies: branch on the first variable still
        // mentioned and accept if either cofactor is satisfiable.
        let var = cnf
            .first_literal()
            .expect("clauses remain, so a literal remains")
            .variable();

        return split(cnf.assign(Literal::of(var, true)))
            || split(cnf.assign(Literal::of(var, false)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(rows: &[&[i32]]) -> Cnf {
        Cnf::try_from_rows(rows.iter().map(|row| row.iter().copied()))
            .expect("test formula")
    }

    #[test]
    fn test_empty_formula_is_sat() {
        assert!(davis_putnam(&Cnf::default()));
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        assert!(!davis_putnam(&cnf(&[&[1, 2], &[]])));
    }

    #[test]
    fn test_contradiction_is_unsat() {
        assert!(!davis_putnam(&cnf(&[&[1], &[-1]])));
    }

    #[test]
    fn test_trivially_satisfiable() {
        assert!(davis_putnam(&cnf(&[&[1, 2], &[-1, 2]])));
    }

    #[test]
    fn test_pure_literal_alone_settles_it() {
        assert!(davis_putnam(&cnf(&[&[1, 2], &[1, -2]])));
    }

    #[test]
    fn test_unit_propagation() {
        // No pure literal: every variable occurs in both polarities. The
        // unit 1 must propagate before anything else can move.
        assert!(davis_putnam(&cnf(&[&[1], &[-1, 2], &[1, -2]])));
    }

    #[test]
    fn test_unit_conflict() {
        // Propagating the unit 1 leaves the contradictory units 2 and -2.
        assert!(!davis_putnam(&cnf(&[&[1], &[-1, 2], &[-2, -1]])));
    }

    #[test]
    fn test_full_polarity_square_is_unsat() {
        assert!(!davis_putnam(&cnf(&[
            &[1, 2],
            &[-1, 2],
            &[1, -2],
            &[-1, -2]
        ])));
    }

    #[test]
    fn test_branching_required() {
        // No pure literals, no units; satisfiable only through the split.
        assert!(davis_putnam(&cnf(&[&[1, 2], &[-1, -2], &[1, -2]])));
    }
}
