use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt;

/// A partial mapping from variables to truth values, built incrementally
/// during search.
///
/// Branches never share a mutable assignment: each recursive step receives
/// its own extended copy via [`Assignment::with`], so abandoning a branch
/// needs no undo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(FxHashMap<Variable, bool>);

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `lit` as true: its variable is bound to its polarity.
    pub fn assign(&mut self, lit: Literal) {
        self.0.insert(lit.variable(), lit.polarity());
    }

    /// A copy of the assignment extended with `lit` made true.
    #[must_use]
    pub fn with(&self, lit: Literal) -> Self {
        let mut extended = self.clone();
        extended.assign(lit);
        extended
    }

    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0.get(&var).copied()
    }

    /// The truth value of `lit` under this assignment, `None` if its
    /// variable is unbound.
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.variable())
            .map(|value| value == lit.polarity())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every clause of `cnf` holds at least one literal already true
    /// here. Unbound variables may then take arbitrary values without
    /// breaking satisfaction.
    pub fn satisfies(&self, cnf: &Cnf) -> bool {
        cnf.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| self.literal_value(lit) == Some(true))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0.iter().map(|(&var, &value)| (var, value))
    }
}

impl fmt::Display for Assignment {
    /// Renders the model as signed literals in variable order, e.g. `1 -2 3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .iter()
            .sorted_by_key(|&(var, _)| var)
            .map(|(var, value)| Literal::of(var, value))
            .join(" ");
        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: i32) -> Literal {
        Literal::new(value).expect("test literal")
    }

    #[test]
    fn test_with_leaves_parent_untouched() {
        let parent = Assignment::new().with(lit(1));
        let child = parent.with(lit(-2));

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.value(2), Some(false));
        assert_eq!(parent.value(2), None);
    }

    #[test]
    fn test_literal_value() {
        let assignment = Assignment::new().with(lit(-3));
        assert_eq!(assignment.literal_value(lit(-3)), Some(true));
        assert_eq!(assignment.literal_value(lit(3)), Some(false));
        assert_eq!(assignment.literal_value(lit(4)), None);
    }

    #[test]
    fn test_satisfies() {
        let formula = Cnf::try_from_rows(vec![vec![1, 2], vec![-1, 2]]).expect("formula");
        let witness = Assignment::new().with(lit(2));
        assert!(witness.satisfies(&formula));

        let losing = Assignment::new().with(lit(-2)).with(lit(-1));
        assert!(!losing.satisfies(&formula));
    }

    #[test]
    fn test_display_sorted_by_variable() {
        let assignment = Assignment::new().with(lit(3)).with(lit(-1));
        assert_eq!(assignment.to_string(), "-1 3");
    }
}
