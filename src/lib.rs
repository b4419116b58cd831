//! This crate decides the satisfiability of propositional formulas in
//! conjunctive normal form.
//!
//! Three procedures are provided: a bounded resolution closure, a recursive
//! Davis-Putnam splitting check, and a deadline-aware DPLL search that also
//! produces a model. The [`sat::solver`] module chains them into a pipeline
//! that tries resolution first and falls back to DPLL when the closure runs
//! out of bounds.

/// The `sat` module holds the formula model, the three decision procedures
/// and the orchestrating pipeline.
pub mod sat;
