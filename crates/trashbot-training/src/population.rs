use std::{
    num::NonZeroUsize,
    panic,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use trashbot_evaluator::{
    EvaluationError, cancel::CancelToken, fitness_evaluator::GenomeEvaluator, genome::PolicyGenome,
};
use trashbot_stats::DescriptiveStats;

/// Produces uniformly random genomes for the initial population.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopulationGenerator;

impl PopulationGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates one unevaluated genome with every gene drawn uniformly from the
    /// non-sentinel actions.
    pub fn generate<R>(&self, rng: &mut R) -> PolicyGenome
    where
        R: Rng + ?Sized,
    {
        PolicyGenome::random(rng)
    }

    /// Generates a population of `size` unevaluated genomes.
    pub fn generate_population<R>(&self, size: usize, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        (0..size).map(|_| self.generate(rng)).collect()
    }
}

/// An ordered collection of genomes evaluated together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    genomes: Vec<PolicyGenome>,
}

impl FromIterator<PolicyGenome> for Population {
    fn from_iter<T: IntoIterator<Item = PolicyGenome>>(iter: T) -> Self {
        Self {
            genomes: iter.into_iter().collect(),
        }
    }
}

impl Population {
    #[must_use]
    pub fn new(genomes: Vec<PolicyGenome>) -> Self {
        Self { genomes }
    }

    #[must_use]
    pub fn genomes(&self) -> &[PolicyGenome] {
        &self.genomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    #[must_use]
    pub fn into_genomes(self) -> Vec<PolicyGenome> {
        self.genomes
    }

    /// Evaluates every genome and stores its fitness.
    ///
    /// One seed per genome is drawn from `rng` up front, then the genomes are
    /// split into at most `workers` chunks that are evaluated on scoped threads.
    /// The assigned fitness values depend only on `rng`, not on `workers`.
    ///
    /// Once any worker fails, the others stop before their next genome, and the
    /// population is left partially evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `evaluator`, including
    /// [`EvaluationError::Cancelled`].
    pub fn evaluate_fitness<E, R>(
        &mut self,
        evaluator: &E,
        rng: &mut R,
        cancel: &CancelToken,
        workers: NonZeroUsize,
    ) -> Result<(), EvaluationError>
    where
        E: GenomeEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        let seeds = (0..self.genomes.len())
            .map(|_| rng.random::<u64>())
            .collect::<Vec<_>>();
        let chunk_size = self.genomes.len().div_ceil(workers.get()).max(1);
        let failed = &AtomicBool::new(false);

        thread::scope(|s| {
            let handles = self
                .genomes
                .chunks_mut(chunk_size)
                .zip(seeds.chunks(chunk_size))
                .map(|(genomes, seeds)| {
                    s.spawn(move || -> Result<(), EvaluationError> {
                        for (genome, &seed) in genomes.iter_mut().zip(seeds) {
                            if failed.load(Ordering::Relaxed) {
                                break;
                            }
                            let mut rng = Pcg64Mcg::seed_from_u64(seed);
                            match evaluator.evaluate_genome(genome, &mut rng, cancel) {
                                Ok(fitness) => genome.set_fitness(fitness),
                                Err(e) => {
                                    failed.store(true, Ordering::Relaxed);
                                    return Err(e);
                                }
                            }
                        }
                        Ok(())
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Result<(), EvaluationError>>()
        })
    }

    /// Highest-fitness evaluated genome. Ties go to the later genome.
    #[must_use]
    pub fn best(&self) -> Option<&PolicyGenome> {
        self.genomes
            .iter()
            .filter(|g| g.fitness().is_some())
            .max_by(|a, b| fitness_key(a).total_cmp(&fitness_key(b)))
    }

    /// Statistics over the fitness of evaluated genomes, or `None` if no genome
    /// has been evaluated.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.genomes.iter().filter_map(PolicyGenome::fitness))
    }
}

/// Fitness used for ranking; unevaluated genomes rank below every real value.
pub(crate) fn fitness_key(genome: &PolicyGenome) -> f32 {
    genome.fitness().unwrap_or(f32::NEG_INFINITY)
}
