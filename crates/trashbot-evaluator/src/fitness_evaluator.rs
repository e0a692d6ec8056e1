//! Fitness evaluation: scoring a genome by playing it on fresh episodes.
//!
//! Fitness is the arithmetic mean of the final scores of `game_runs` independent
//! episodes. Grid generation and `MoveRandom` both draw from the random source,
//! so fitness is a noisy estimate of the genome's expected score; evaluating the
//! same genome twice only gives the same result when the random source is
//! seeded identically.

use std::fmt;

use rand::{Rng, RngCore};
use trashbot_engine::{GridConfig, GridConfigError, GridWorld, ScoreConfig};
use tracing::debug;

use crate::{
    EvaluationError,
    cancel::CancelToken,
    episode::{EpisodeSummary, play_episode},
    genome::PolicyGenome,
    policy::GenomePolicy,
};

/// Assigns a scalar fitness to a genome (higher is better).
///
/// Used by the genetic optimizer; implementations must be shareable across the
/// worker threads that evaluate a generation in parallel.
pub trait GenomeEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_genome(
        &self,
        genome: &PolicyGenome,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<f32, EvaluationError>;
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EvaluatorConfigError {
    #[display("{_0}")]
    #[from]
    Grid(GridConfigError),
    #[display("at least one game run is required per evaluation")]
    NoGameRuns,
}

/// Evaluates genomes by averaging their score over several simulated episodes.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    grid: GridConfig,
    score: ScoreConfig,
    game_runs: usize,
}

impl FitnessEvaluator {
    /// Creates an evaluator playing `game_runs` episodes per genome.
    pub fn new(
        grid: GridConfig,
        score: ScoreConfig,
        game_runs: usize,
    ) -> Result<Self, EvaluatorConfigError> {
        grid.validate()?;
        if game_runs == 0 {
            return Err(EvaluatorConfigError::NoGameRuns);
        }
        Ok(Self {
            grid,
            score,
            game_runs,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    #[must_use]
    pub fn score_config(&self) -> &ScoreConfig {
        &self.score
    }

    #[must_use]
    pub fn game_runs(&self) -> usize {
        self.game_runs
    }

    /// Plays one fresh episode with `genome` as the policy.
    pub fn play<R>(&self, genome: &PolicyGenome, rng: &mut R) -> Result<EpisodeSummary, EvaluationError>
    where
        R: Rng + ?Sized,
    {
        let mut world = GridWorld::new(&self.grid, self.score, rng)?;
        play_episode(&mut world, &mut GenomePolicy::new(genome), rng)
    }

    /// Returns the mean final score of `game_runs` episodes.
    ///
    /// `cancel` is checked before each episode.
    pub fn evaluate<R>(
        &self,
        genome: &PolicyGenome,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<f32, EvaluationError>
    where
        R: Rng + ?Sized,
    {
        let mut total = 0_i128;
        for _ in 0..self.game_runs {
            cancel.check()?;
            let summary = self.play(genome, rng)?;
            total += i128::from(summary.score);
        }
        #[expect(clippy::cast_precision_loss)]
        let fitness = total as f32 / self.game_runs as f32;
        debug!(fitness, game_runs = self.game_runs, "evaluated genome");
        Ok(fitness)
    }
}

impl GenomeEvaluator for FitnessEvaluator {
    fn evaluate_genome(
        &self,
        genome: &PolicyGenome,
        rng: &mut dyn RngCore,
        cancel: &CancelToken,
    ) -> Result<f32, EvaluationError> {
        self.evaluate(genome, rng, cancel)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use trashbot_engine::RobotAction;

    use super::*;
    use crate::genome::GENOME_LEN;

    fn genome(action: RobotAction) -> PolicyGenome {
        PolicyGenome::new(vec![action; GENOME_LEN]).unwrap()
    }

    fn grid(rows: usize, cols: usize, max_turns: usize, trash: f64) -> GridConfig {
        GridConfig {
            rows,
            cols,
            max_turns,
            trash_spawn_chance: trash,
            ..GridConfig::default()
        }
    }

    #[test]
    fn test_rejects_zero_game_runs() {
        let result = FitnessEvaluator::new(grid(3, 3, 5, 0.5), ScoreConfig::default(), 0);
        assert_eq!(result.unwrap_err(), EvaluatorConfigError::NoGameRuns);
    }

    #[test]
    fn test_rejects_invalid_grid() {
        let result = FitnessEvaluator::new(grid(0, 3, 5, 0.5), ScoreConfig::default(), 1);
        assert!(matches!(result, Err(EvaluatorConfigError::Grid(_))));
    }

    #[test]
    fn test_skip_only_genome_scores_zero() {
        let evaluator =
            FitnessEvaluator::new(grid(5, 5, 50, 0.5), ScoreConfig::default(), 10).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let fitness = evaluator
            .evaluate(&genome(RobotAction::SkipTurn), &mut rng, &CancelToken::new())
            .unwrap();
        assert_eq!(fitness, 0.0);
    }

    #[test]
    fn test_wall_hugging_genome_is_penalised_every_turn() {
        let evaluator =
            FitnessEvaluator::new(grid(4, 4, 20, 0.3), ScoreConfig::default(), 3).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let fitness = evaluator
            .evaluate(&genome(RobotAction::MoveNorth), &mut rng, &CancelToken::new())
            .unwrap();
        assert_eq!(fitness, -5.0 * 20.0);
    }

    #[test]
    fn test_fitness_is_mean_of_episode_scores() {
        // Every cell holds trash: collect succeeds once, then fails each turn.
        let evaluator =
            FitnessEvaluator::new(grid(2, 2, 4, 1.0), ScoreConfig::default(), 5).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let fitness = evaluator
            .evaluate(&genome(RobotAction::CollectTrash), &mut rng, &CancelToken::new())
            .unwrap();
        assert_eq!(fitness, 10.0 - 3.0);
    }

    #[test]
    fn test_same_seed_reproduces_fitness() {
        let evaluator =
            FitnessEvaluator::new(grid(6, 6, 40, 0.4), ScoreConfig::default(), 4).unwrap();
        let genome = genome(RobotAction::MoveRandom);
        let a = evaluator
            .evaluate(&genome, &mut Pcg64Mcg::seed_from_u64(9), &CancelToken::new())
            .unwrap();
        let b = evaluator
            .evaluate(&genome, &mut Pcg64Mcg::seed_from_u64(9), &CancelToken::new())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cancelled_token_aborts_evaluation() {
        let evaluator =
            FitnessEvaluator::new(grid(3, 3, 5, 0.5), ScoreConfig::default(), 2).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut rng = Pcg64Mcg::seed_from_u64(4);
        let result = evaluator.evaluate(&genome(RobotAction::SkipTurn), &mut rng, &cancel);
        assert_eq!(result, Err(EvaluationError::Cancelled));
    }

    #[test]
    fn test_trait_object_evaluation() {
        let evaluator =
            FitnessEvaluator::new(grid(3, 3, 5, 0.0), ScoreConfig::default(), 2).unwrap();
        let evaluator: &dyn GenomeEvaluator = &evaluator;
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let fitness = evaluator
            .evaluate_genome(&genome(RobotAction::CollectTrash), &mut rng, &CancelToken::new())
            .unwrap();
        assert_eq!(fitness, -5.0);
    }

    #[test]
    fn test_extreme_penalties_average_without_overflow() {
        let score = ScoreConfig {
            wall_bump: i32::MIN,
            ..ScoreConfig::default()
        };
        let evaluator = FitnessEvaluator::new(grid(2, 2, 4, 0.0), score, 2).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(6);
        let fitness = evaluator
            .evaluate(&genome(RobotAction::MoveNorth), &mut rng, &CancelToken::new())
            .unwrap();
        #[expect(clippy::cast_precision_loss)]
        let expected = 4.0 * i32::MIN as f32;
        assert_eq!(fitness, expected);
    }
}
