use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable, ZeroLiteral};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt;

/// A formula in conjunctive normal form: a collection of clauses, all of
/// which must be satisfied.
///
/// Clause order and multiplicity carry no logical meaning, but syntactic
/// duplicates are allowed since derivation can legitimately produce them.
/// Formulas are immutable per solver call: the simplification steps build
/// reduced copies rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
}

impl Cnf {
    #[must_use]
    pub const fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Builds a formula from rows of raw signed literal values.
    ///
    /// # Errors
    ///
    /// Returns [`ZeroLiteral`] if any row contains a `0`; the terminator is
    /// wire-format syntax and must be stripped before construction.
    pub fn try_from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, ZeroLiteral>
    where
        R: IntoIterator<Item = i32>,
    {
        let clauses = rows
            .into_iter()
            .map(|row| row.into_iter().map(Literal::new).collect::<Result<Clause, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(clauses))
    }

    /// Whether the formula has no clauses at all (trivially satisfiable).
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// The set of distinct literals occurring in the formula.
    pub fn literals(&self) -> FxHashSet<Literal> {
        self.iter().flat_map(Clause::iter).collect()
    }

    /// The set of distinct variables mentioned by the formula. Derived on
    /// demand, never stored.
    pub fn variables(&self) -> FxHashSet<Variable> {
        self.iter()
            .flat_map(Clause::iter)
            .map(Literal::variable)
            .collect()
    }

    /// Total literal occurrence count across all clauses.
    pub fn literal_count(&self) -> usize {
        self.iter().map(Clause::len).sum()
    }

    /// The first literal in clause order, used as the branching pick.
    pub fn first_literal(&self) -> Option<Literal> {
        self.iter().flat_map(Clause::iter).next()
    }

    /// The first literal, in clause order, whose negation occurs nowhere in
    /// the formula.
    pub fn first_pure_literal(&self) -> Option<Literal> {
        let literals = self.literals();

        self.iter()
            .flat_map(Clause::iter)
            .find(|lit| !literals.contains(&lit.negated()))
    }

    /// The literals of all unit clauses, in clause order.
    pub fn unit_literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.clauses.iter().filter_map(Clause::unit_literal)
    }

    /// The formula under `lit` assumed true: clauses containing `lit` are
    /// satisfied and dropped, and the falsified `lit.negated()` is pruned
    /// from the survivors. A survivor pruned to nothing becomes the empty
    /// clause, the contradiction witness.
    #[must_use]
    pub fn assign(&self, lit: Literal) -> Self {
        let falsified = lit.negated();

        self.iter()
            .filter(|clause| !clause.contains(lit))
            .map(|clause| clause.without(falsified))
            .collect()
    }
}

impl From<Vec<Clause>> for Cnf {
    fn from(clauses: Vec<Clause>) -> Self {
        Self::new(clauses)
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Cnf {
    /// Renders the wire format: one `0`-terminated clause per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join("\n"))
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
    fn test_rejects_zero_literal() {
        let rows = vec![vec![1, 0, 2]];
        assert!(Cnf::try_from_rows(rows).is_err());
    }

    #[test]
    fn test_structural_queries() {
        let formula = cnf(&[&[1, -2], &[2], &[]]);
        assert_eq!(formula.len(), 3);
        assert!(formula.has_empty_clause());
        assert_eq!(formula.variables().len(), 2);
        assert_eq!(formula.literal_count(), 3);
        assert_eq!(
            formula.unit_literals().collect::<Vec<_>>(),
            vec![Literal::new(2).expect("nonzero")]
        );
    }

    #[test]
    fn test_assign_drops_and_prunes() {
        let formula = cnf(&[&[1, 2], &[-1, 3], &[3, 4]]);
        let reduced = formula.assign(Literal::new(1).expect("nonzero"));
        assert_eq!(reduced, cnf(&[&[3], &[3, 4]]));
    }

    #[test]
    fn test_assign_can_expose_empty_clause() {
        let formula = cnf(&[&[-1]]);
        let reduced = formula.assign(Literal::new(1).expect("nonzero"));
        assert!(reduced.has_empty_clause());
    }

    #[test]
    fn test_pure_literal_detection() {
        // 1 occurs in both polarities; 2 only positively.
        let formula = cnf(&[&[1, 2], &[-1, 2]]);
        assert_eq!(formula.first_pure_literal(), Literal::new(2).ok());
    }

    #[test]
    fn test_simplified_formula_has_no_pure_or_unit() {
        // Already simplified: no unit clauses, every variable in both
        // polarities. Re-running the detectors must find nothing.
        let formula = cnf(&[&[1, 2], &[-1, -2]]);
        assert_eq!(formula.first_pure_literal(), None);
        assert_eq!(formula.unit_literals().count(), 0);
    }

    #[test]
    fn test_display_round_trip_shape() {
        let formula = cnf(&[&[1, -2], &[3]]);
        assert_eq!(formula.to_string(), "-2 1 0\n3 0");
    }
}
