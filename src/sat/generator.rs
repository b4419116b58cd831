//! Random CNF formula generation for benchmarking and comparison runs.
//!
//! Clauses draw a distinct variable subset with coin-flip polarities, and a
//! configurable fraction of formulas is forced unsatisfiable by appending a
//! contradictory unit pair.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use fastrand::Rng;

/// Shape parameters for random formula generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of random clauses per formula.
    pub clauses: usize,
    /// Variables are drawn from `1..=variables`.
    pub variables: Variable,
    /// Probability of appending the contradictory unit pair `v 0` / `-v 0`,
    /// which makes the formula unsatisfiable regardless of the rest.
    pub unsat_injection_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            clauses: 20,
            variables: 10,
            unsat_injection_probability: 0.3,
        }
    }
}

/// Generates one random clause over `1..=variables`.
///
/// The clause length is drawn uniformly from `3..=min(10, variables)`
/// (clamped down when fewer than three variables exist), and the chosen
/// variables are distinct, so the clause is never tautological.
///
/// # Panics
///
/// If `variables` is `0`.
#[must_use]
pub fn random_clause(rng: &mut Rng, variables: Variable) -> Clause {
    assert!(variables > 0, "cannot draw literals without variables");

    let longest = variables.min(10);
    let shortest = longest.min(3);
    let len = rng.u32(shortest..=longest) as usize;

    let mut pool: Vec<Variable> = (1..=variables).collect();
    rng.shuffle(&mut pool);

    pool.into_iter()
        .take(len)
        .map(|var| Literal::of(var, rng.bool()))
        .collect()
}

/// Generates a random formula per `config`.
///
/// # Panics
///
/// If `config.variables` is `0`.
#[must_use]
pub fn random_formula(rng: &mut Rng, config: &GeneratorConfig) -> Cnf {
    let mut clauses: Vec<Clause> = (0..config.clauses)
        .map(|_| random_clause(rng, config.variables))
        .collect();

    if rng.f64() < config.unsat_injection_probability {
        let var = rng.u32(1..=config.variables);
        clauses.push(Clause::new([Literal::of(var, true)]));
        clauses.push(Clause::new([Literal::of(var, false)]));
    }

    Cnf::new(clauses)
}

/// Generates `count` independent random formulas.
///
/// # Panics
///
/// If `config.variables` is `0`.
#[must_use]
pub fn random_formulas(rng: &mut Rng, config: &GeneratorConfig, count: usize) -> Vec<Cnf> {
    (0..count).map(|_| random_formula(rng, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::davis_putnam::davis_putnam;

    #[test]
    fn test_clause_length_bounds() {
        let mut rng = Rng::with_seed(7);

        for _ in 0..100 {
            let clause = random_clause(&mut rng, 10);
            assert!(clause.len() >= 3);
            assert!(clause.len() <= 10);
        }
    }

    #[test]
    fn test_clause_variables_are_distinct() {
        let mut rng = Rng::with_seed(11);

        for _ in 0..100 {
            let clause = random_clause(&mut rng, 6);
            let vars: Vec<_> = clause.iter().map(Literal::variable).collect();
            let mut deduped = vars.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(vars.len(), deduped.len());
            assert!(!clause.is_tautology());
        }
    }

    #[test]
    fn test_few_variables_clamp_the_length() {
        let mut rng = Rng::with_seed(13);
        let clause = random_clause(&mut rng, 2);
        assert!((1..=2).contains(&clause.len()));
    }

    #[test]
    fn test_no_injection_keeps_clause_count() {
        let mut rng = Rng::with_seed(17);
        let config = GeneratorConfig {
            clauses: 15,
            variables: 8,
            unsat_injection_probability: 0.0,
        };

        let formula = random_formula(&mut rng, &config);
        assert_eq!(formula.len(), 15);
    }

    #[test]
    fn test_forced_injection_makes_unsat() {
        let mut rng = Rng::with_seed(19);
        let config = GeneratorConfig {
            clauses: 5,
            variables: 6,
            unsat_injection_probability: 1.0,
        };

        for _ in 0..20 {
            let formula = random_formula(&mut rng, &config);
            assert_eq!(formula.len(), 7);
            assert!(!davis_putnam(&formula));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GeneratorConfig::default();
        let first = random_formulas(&mut Rng::with_seed(23), &config, 4);
        let second = random_formulas(&mut Rng::with_seed(23), &config, 4);
        assert_eq!(first, second);
    }
}
