//! Genetic search over lookup-table policies.
//!
//! A policy genome maps each of the 243 possible observations to an action. This
//! crate evolves a population of such genomes towards higher average episode
//! scores, as measured by a [`GenomeEvaluator`](trashbot_evaluator::fitness_evaluator::GenomeEvaluator).
//!
//! # How Training Works
//!
//! 1. **Generation** - [`PopulationGenerator`] fills the first population with
//!    uniformly random genomes
//! 2. **Evaluation** - every genome plays a batch of episodes in parallel and gets
//!    its average score as fitness
//! 3. **Tracking** - [`BestIndividual`] keeps the best genome seen so far, across
//!    all generations
//! 4. **Crossover** - [`OnePointCrossover`] picks parent pairs with a
//!    [`ParentSelection`] and splices them at a random point
//! 5. **Mutation** - [`RandomMutator`] resamples each gene with a fixed chance
//!
//! [`GeneticOptimizer`] drives the whole loop and returns an
//! [`OptimizationOutcome`] with the best genome and per-generation records.
//!
//! # Architecture
//!
//! ```text
//! PopulationGenerator
//!     ↓ seeds
//! Population ──evaluate_fitness──→ GenomeEvaluator (per genome, in parallel)
//!     ↓ cross                          ↓ fitness
//! OnePointCrossover ← ParentSelection  BestIndividual
//!     ↓ mutate
//! RandomMutator
//!     ↓
//! next Population
//! ```
//!
//! # Reproducibility
//!
//! All randomness is drawn from the RNG handed to [`GeneticOptimizer::run`].
//! Parallel evaluation gets one child seed per genome from that RNG, so a seeded
//! run produces the same result regardless of thread count.

pub use self::{operators::*, optimizer::*, population::*, selection::*};

mod operators;
mod optimizer;
mod population;
mod selection;

/// Error returned when a genetic operator is configured with invalid parameters.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum OperatorError {
    #[display("mutation chance must be within [0, 1], got {chance}")]
    InvalidMutationChance { chance: f64 },
    #[display("tournament size must be at least 1")]
    EmptyTournament,
}
