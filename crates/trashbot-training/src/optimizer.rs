use std::{num::NonZeroUsize, thread};

use rand::Rng;
use tracing::{debug, info, warn};
use trashbot_evaluator::{
    EvaluationError, cancel::CancelToken, fitness_evaluator::GenomeEvaluator, genome::PolicyGenome,
};
use trashbot_stats::DescriptiveStats;

use crate::{OnePointCrossover, Population, PopulationGenerator, RandomMutator};

/// Best genome seen so far in a run.
///
/// The initial best fitness is negative infinity and only a strictly greater
/// fitness replaces the current best, so the tracked fitness never decreases
/// and a genome scoring negative infinity is never kept.
#[derive(Debug, Clone, Default)]
pub struct BestIndividual {
    genome: Option<PolicyGenome>,
}

impl BestIndividual {
    #[must_use]
    pub fn genome(&self) -> Option<&PolicyGenome> {
        self.genome.as_ref()
    }

    #[must_use]
    pub fn fitness(&self) -> Option<f32> {
        self.genome.as_ref().and_then(PolicyGenome::fitness)
    }

    #[must_use]
    pub fn into_genome(self) -> Option<PolicyGenome> {
        self.genome
    }

    /// Offers every evaluated genome of `population`; returns `true` if the best
    /// changed.
    pub fn update(&mut self, population: &Population) -> bool {
        let Some(candidate) = population.best() else {
            return false;
        };
        let current = self.fitness().unwrap_or(f32::NEG_INFINITY);
        let improved = candidate.fitness().is_some_and(|new| new > current);
        if improved {
            self.genome = Some(candidate.clone());
        }
        improved
    }
}

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best fitness seen in this or any earlier generation.
    pub best_fitness: Option<f32>,
    /// Best fitness within this generation only.
    pub generation_best: Option<f32>,
    pub fitness_stats: Option<DescriptiveStats>,
}

/// Result of [`GeneticOptimizer::run`].
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// Best genome over all evaluated generations, with its fitness set.
    ///
    /// `None` if no generation was evaluated or no genome was evaluated.
    pub best: Option<PolicyGenome>,
    /// One record per fully evaluated generation, in order.
    pub history: Vec<GenerationRecord>,
    /// Whether the run stopped early because the cancel token fired.
    pub cancelled: bool,
}

impl OptimizationOutcome {
    #[must_use]
    pub fn best_fitness(&self) -> Option<f32> {
        self.best.as_ref().and_then(PolicyGenome::fitness)
    }

    /// Best-so-far fitness after each generation.
    pub fn best_fitness_log(&self) -> impl Iterator<Item = Option<f32>> + '_ {
        self.history.iter().map(|record| record.best_fitness)
    }
}

/// Drives the generational loop: generate, evaluate, track best, cross, mutate.
#[derive(Debug)]
pub struct GeneticOptimizer<E> {
    population_size: usize,
    max_generations: usize,
    generator: PopulationGenerator,
    evaluator: E,
    crossover: OnePointCrossover,
    mutator: RandomMutator,
    workers: NonZeroUsize,
}

impl<E> GeneticOptimizer<E>
where
    E: GenomeEvaluator,
{
    /// Creates an optimizer that evaluates on all available cores.
    #[must_use]
    pub fn new(
        population_size: usize,
        max_generations: usize,
        evaluator: E,
        crossover: OnePointCrossover,
        mutator: RandomMutator,
    ) -> Self {
        Self {
            population_size,
            max_generations,
            generator: PopulationGenerator::new(),
            evaluator,
            crossover,
            mutator,
            workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Caps the number of evaluation threads.
    #[must_use]
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    #[must_use]
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    #[must_use]
    pub fn mutator(&self) -> &RandomMutator {
        &self.mutator
    }

    /// Runs up to `max_generations` generations and returns the best genome
    /// found.
    ///
    /// Cancellation is checked before each generation and inside the
    /// evaluator. A cancelled run keeps the best genome of the generations that
    /// finished evaluating; a partially evaluated generation is discarded.
    ///
    /// # Errors
    ///
    /// Returns any evaluator error other than [`EvaluationError::Cancelled`].
    pub fn run<R>(
        &self,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<OptimizationOutcome, EvaluationError>
    where
        R: Rng,
    {
        let mut population = self
            .generator
            .generate_population(self.population_size, rng);
        let mut best = BestIndividual::default();
        let mut history = Vec::with_capacity(self.max_generations);
        let mut cancelled = false;

        for generation in 0..self.max_generations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            match population.evaluate_fitness(&self.evaluator, rng, cancel, self.workers) {
                Ok(()) => {}
                Err(EvaluationError::Cancelled) => {
                    cancelled = true;
                    break;
                }
                Err(e) => return Err(e),
            }

            if best.update(&population) {
                debug!(generation, fitness = ?best.fitness(), "new best genome");
            }
            let record = GenerationRecord {
                generation,
                best_fitness: best.fitness(),
                generation_best: population.best().and_then(PolicyGenome::fitness),
                fitness_stats: population.fitness_stats(),
            };
            info!(
                generation,
                best = ?record.best_fitness,
                generation_best = ?record.generation_best,
                mean = ?record.fitness_stats.as_ref().map(|s| s.mean),
                "generation evaluated"
            );
            history.push(record);

            if generation + 1 < self.max_generations {
                let children = self.crossover.cross(&population, rng);
                population = self.mutator.mutate(&children, rng);
            }
        }

        if cancelled {
            warn!(
                generations = history.len(),
                "optimization cancelled, returning best so far"
            );
        }
        let best = best.into_genome();
        if best.is_none() {
            warn!("optimization produced no evaluated genome");
        }

        Ok(OptimizationOutcome {
            best,
            history,
            cancelled,
        })
    }
}
