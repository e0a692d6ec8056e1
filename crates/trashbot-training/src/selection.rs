use std::fmt;

use rand::{RngCore, seq::IndexedRandom as _};
use trashbot_evaluator::genome::PolicyGenome;

use crate::{OperatorError, population::fitness_key};

/// Strategy for picking a parent out of an evaluated population.
pub trait ParentSelection: fmt::Debug + Send + Sync {
    /// Picks one parent, or `None` if `population` is empty.
    fn select<'a>(
        &self,
        population: &'a [PolicyGenome],
        rng: &mut dyn RngCore,
    ) -> Option<&'a PolicyGenome>;
}

/// Draws `size` individuals with replacement and keeps the fittest.
///
/// On equal fitness the later draw wins. Unevaluated genomes lose to every
/// evaluated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { size: 2 }
    }
}

impl TournamentSelection {
    /// # Errors
    ///
    /// Returns [`OperatorError::EmptyTournament`] if `size` is zero.
    pub fn new(size: usize) -> Result<Self, OperatorError> {
        if size == 0 {
            return Err(OperatorError::EmptyTournament);
        }
        Ok(Self { size })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl ParentSelection for TournamentSelection {
    fn select<'a>(
        &self,
        population: &'a [PolicyGenome],
        rng: &mut dyn RngCore,
    ) -> Option<&'a PolicyGenome> {
        (0..self.size)
            .filter_map(|_| population.choose(&mut *rng))
            .max_by(|a, b| fitness_key(a).total_cmp(&fitness_key(b)))
    }
}

/// Picks a parent uniformly at random, ignoring fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformSelection;

impl ParentSelection for UniformSelection {
    fn select<'a>(
        &self,
        population: &'a [PolicyGenome],
        rng: &mut dyn RngCore,
    ) -> Option<&'a PolicyGenome> {
        population.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn pair(rng: &mut Pcg64Mcg) -> Vec<PolicyGenome> {
        vec![
            PolicyGenome::random(rng).with_fitness(1.0),
            PolicyGenome::random(rng).with_fitness(5.0),
        ]
    }

    fn count_best(selection: &dyn ParentSelection, draws: usize) -> usize {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let population = pair(&mut rng);
        (0..draws)
            .filter(|_| {
                selection
                    .select(&population, &mut rng)
                    .unwrap()
                    .fitness()
                    == Some(5.0)
            })
            .count()
    }

    #[test]
    fn test_zero_size_tournament_rejected() {
        assert_eq!(
            TournamentSelection::new(0),
            Err(OperatorError::EmptyTournament)
        );
        assert_eq!(TournamentSelection::default().size(), 2);
    }

    #[test]
    fn test_empty_population_selects_nothing() {
        let mut rng = rand::rng();
        assert!(TournamentSelection::default().select(&[], &mut rng).is_none());
        assert!(UniformSelection.select(&[], &mut rng).is_none());
    }

    #[test]
    fn test_tournament_favours_fitter_parent() {
        // picking the weaker of two needs both draws to miss: 1/4
        let hits = count_best(&TournamentSelection::default(), 4000);
        assert!((2800..3200).contains(&hits), "hits {hits}");
    }

    #[test]
    fn test_uniform_ignores_fitness() {
        let hits = count_best(&UniformSelection, 4000);
        assert!((1800..2200).contains(&hits), "hits {hits}");
    }

    #[test]
    fn test_large_tournament_always_finds_best_of_two() {
        let selection = TournamentSelection::new(64).unwrap();
        assert_eq!(count_best(&selection, 200), 200);
    }

    #[test]
    fn test_unevaluated_genome_loses() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let population = vec![
            PolicyGenome::random(&mut rng).with_fitness(-100.0),
            PolicyGenome::random(&mut rng),
        ];
        let selection = TournamentSelection::new(64).unwrap();
        for _ in 0..50 {
            let picked = selection.select(&population, &mut rng).unwrap();
            assert_eq!(picked.fitness(), Some(-100.0));
        }
    }
}
