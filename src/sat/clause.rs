use crate::sat::literal::Literal;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// Inline storage for clause literals. Most generated and benchmark clauses
/// stay under eight literals, so they avoid a heap allocation.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// A disjunction of literals, kept sorted and deduplicated so that equal
/// clause sets compare and hash equal regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals: LiteralStorage = literals.into_iter().collect();
        literals.sort_unstable();
        literals.dedup();
        Self { literals }
    }

    /// The empty clause: satisfied by no assignment.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The sole literal of a unit clause, `None` otherwise.
    pub fn unit_literal(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [lit] => Some(*lit),
            _ => None,
        }
    }

    pub fn contains(&self, lit: Literal) -> bool {
        self.literals.binary_search(&lit).is_ok()
    }

    /// Whether the clause holds a complementary literal pair and is therefore
    /// satisfied by every assignment.
    pub fn is_tautology(&self) -> bool {
        self.iter().any(|lit| self.contains(lit.negated()))
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// A copy of the clause with every occurrence of `lit` removed.
    #[must_use]
    pub fn without(&self, lit: Literal) -> Self {
        if self.contains(lit) {
            Self {
                literals: self.iter().filter(|&l| l != lit).collect(),
            }
        } else {
            self.clone()
        }
    }

    /// Resolves this clause against `other` on the first literal `l` of this
    /// clause whose negation occurs in `other`. The resolvent is the union of
    /// both clauses minus that one complementary pair; further complementary
    /// pairs are left in place, so the resolvent may be tautological.
    ///
    /// Returns `None` when the clauses share no complementary literal.
    pub fn resolve_on(&self, other: &Self) -> Option<Self> {
        let pivot = self.iter().find(|&lit| other.contains(lit.negated()))?;
        let complement = pivot.negated();

        Some(Self::new(
            self.iter()
                .chain(other.iter())
                .filter(|&lit| lit != pivot && lit != complement),
        ))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Clause {
    /// Renders the wire format line: literals separated by spaces, terminated
    /// by `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{} 0", self.literals.iter().join(" "))
        }
    }
}
