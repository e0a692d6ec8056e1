//! Recombination and mutation operators.
//!
//! Both operators take an evaluated [`Population`] by reference and return a new
//! one of the same size. Input genomes are never modified.

use rand::Rng;
use trashbot_evaluator::genome::PolicyGenome;

use crate::{OperatorError, ParentSelection, Population, TournamentSelection};

/// One-point crossover over parents chosen by a [`ParentSelection`].
///
/// Each step picks two parents and a split point `k` drawn uniformly from
/// `0..population.len()`, then emits `p1[..k] + p2[k..]` and `p2[..k] + p1[k..]`.
/// Split points past the genome length copy the first parent whole.
#[derive(Debug)]
pub struct OnePointCrossover {
    selection: Box<dyn ParentSelection>,
}

impl Default for OnePointCrossover {
    fn default() -> Self {
        Self::new(Box::new(TournamentSelection::default()))
    }
}

impl OnePointCrossover {
    #[must_use]
    pub fn new(selection: Box<dyn ParentSelection>) -> Self {
        Self { selection }
    }

    #[must_use]
    pub fn selection(&self) -> &dyn ParentSelection {
        self.selection.as_ref()
    }

    /// Builds a new population of unevaluated children with the same size as
    /// `population`.
    ///
    /// Children are produced in pairs; for odd sizes the second child of the
    /// last pair is dropped.
    pub fn cross<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng,
    {
        let parents = population.genomes();
        let size = parents.len();
        let mut children = Vec::with_capacity(size + 1);

        while children.len() < size {
            let (Some(p1), Some(p2)) = (
                self.selection.select(parents, rng),
                self.selection.select(parents, rng),
            ) else {
                break;
            };
            let split = rng.random_range(0..size);
            children.push(p1.splice(p2, split));
            children.push(p2.splice(p1, split));
        }

        children.truncate(size);
        Population::new(children)
    }
}

/// Replaces each gene with a fresh random action with a fixed probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomMutator {
    mutation_chance: f64,
}

impl RandomMutator {
    /// # Errors
    ///
    /// Returns [`OperatorError::InvalidMutationChance`] unless
    /// `0.0 <= mutation_chance <= 1.0`.
    pub fn new(mutation_chance: f64) -> Result<Self, OperatorError> {
        if !(0.0..=1.0).contains(&mutation_chance) {
            return Err(OperatorError::InvalidMutationChance {
                chance: mutation_chance,
            });
        }
        Ok(Self { mutation_chance })
    }

    #[must_use]
    pub fn mutation_chance(&self) -> f64 {
        self.mutation_chance
    }

    /// Returns a mutated copy of every genome in `population`.
    ///
    /// Each gene is independently resampled from the non-sentinel actions with
    /// probability `mutation_chance`. A resampled gene may equal the old one.
    pub fn mutate<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        population
            .genomes()
            .iter()
            .map(|genome| self.mutate_genome(genome, rng))
            .collect()
    }

    fn mutate_genome<R>(&self, genome: &PolicyGenome, rng: &mut R) -> PolicyGenome
    where
        R: Rng + ?Sized,
    {
        genome.resample_genes(rng, |rng| rng.random_bool(self.mutation_chance))
    }
}
