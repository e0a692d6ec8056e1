use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use chrono::Local;
use tracing::{info, warn};
use trashbot_evaluator::{cancel::CancelToken, fitness_evaluator::FitnessEvaluator};
use trashbot_training::{
    GeneticOptimizer, OnePointCrossover, OptimizationOutcome, ParentSelection, RandomMutator,
    TournamentSelection, UniformSelection,
};

use super::world::{self, WorldArg};
use crate::{
    model::{policy_model::PolicyModel, run_summary::RunSummary},
    util,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub(crate) enum SelectionKind {
    /// Fittest of `tournament_size` random draws
    #[default]
    Tournament,
    /// Uniformly random parents (legacy)
    Uniform,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Genomes per generation
    #[arg(long, default_value_t = 200)]
    pub(crate) population_size: usize,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 10)]
    pub(crate) generations: usize,
    /// Per-gene probability of mutation
    #[arg(long, default_value_t = 0.1)]
    pub(crate) mutation_chance: f64,
    /// Episodes played per fitness evaluation
    #[arg(long, default_value_t = 100)]
    pub(crate) game_runs: usize,
    /// Parent selection strategy: `tournament` or `uniform`
    #[arg(long, default_value = "tournament")]
    selection: SelectionKind,
    /// Individuals drawn per tournament
    #[arg(long, default_value_t = 2)]
    tournament_size: usize,
    #[clap(flatten)]
    pub(crate) world: WorldArg,
    /// Seed for the master RNG; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many seconds and keep the best genome so far
    #[arg(long)]
    time_limit: Option<u64>,
    /// Evaluation threads (defaults to available parallelism)
    #[arg(long)]
    threads: Option<NonZeroUsize>,
    /// Model name stored in the output
    #[arg(long, default_value = "ga")]
    name: String,
    /// Directory receiving a `ga_<timestamp>` result folder; model JSON goes to
    /// stdout when omitted
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let grid = arg.world.grid_config();
    let score = arg.world.score_config();
    let evaluator = FitnessEvaluator::new(grid.clone(), score, arg.game_runs)?;
    let selection: Box<dyn ParentSelection> = match arg.selection {
        SelectionKind::Tournament => Box::new(TournamentSelection::new(arg.tournament_size)?),
        SelectionKind::Uniform => Box::new(UniformSelection),
    };
    let mut optimizer = GeneticOptimizer::new(
        arg.population_size,
        arg.generations,
        evaluator,
        OnePointCrossover::new(selection),
        RandomMutator::new(arg.mutation_chance)?,
    );
    if let Some(threads) = arg.threads {
        optimizer = optimizer.with_workers(threads);
    }
    let cancel = arg
        .time_limit
        .map_or_else(CancelToken::new, |secs| {
            CancelToken::with_time_limit(Duration::from_secs(secs))
        });
    let mut rng = world::master_rng(arg.seed);

    info!(
        population_size = arg.population_size,
        generations = arg.generations,
        mutation_chance = arg.mutation_chance,
        game_runs = arg.game_runs,
        rows = grid.rows,
        cols = grid.cols,
        boundary = %grid.boundary,
        selection = %arg.selection,
        "starting training"
    );
    let started = Instant::now();
    let outcome = optimizer.run(&mut rng, &cancel)?;
    let elapsed = started.elapsed();

    eprintln!("Training completed in {elapsed:.1?}");
    if outcome.cancelled {
        eprintln!(
            "  Stopped early after {} of {} generations",
            outcome.history.len(),
            arg.generations
        );
    }
    match outcome.best_fitness() {
        Some(fitness) => eprintln!("  Best fitness: {fitness:.3}"),
        None => eprintln!("  Best fitness: N/A"),
    }

    let summary = RunSummary {
        population_size: arg.population_size,
        generations: arg.generations,
        mutation_chance: arg.mutation_chance,
        game_runs: arg.game_runs,
        grid: grid.clone(),
        fitness: outcome.best_fitness(),
        elapsed,
        fitness_log: outcome.best_fitness_log().collect(),
    };
    let model = outcome
        .best
        .as_ref()
        .map(|best| PolicyModel::new(arg.name.clone(), best, grid, score));

    match &arg.output_dir {
        Some(output_dir) => {
            let run_dir = save_run(output_dir, &summary, &outcome, model.as_ref())?;
            eprintln!("Results saved to {}", run_dir.display());
        }
        None => match &model {
            Some(model) => util::save_json(model, None)?,
            None => warn!("no genome was evaluated, nothing to write"),
        },
    }

    Ok(())
}

/// Creates `<output_dir>/ga_<YYYY-MM-DD_HH-MM>/` and writes the run artifacts.
fn save_run(
    output_dir: &Path,
    summary: &RunSummary,
    outcome: &OptimizationOutcome,
    model: Option<&PolicyModel>,
) -> anyhow::Result<PathBuf> {
    let run_dir = output_dir.join(run_dir_name(Local::now()));
    fs::create_dir_all(&run_dir)
        .with_context(|| format!("Failed to create directory: {}", run_dir.display()))?;

    util::write_text_file(run_dir.join("info.txt"), &summary.to_string())?;
    if let Some(best) = &outcome.best {
        util::write_text_file(run_dir.join("strategy.txt"), &best.to_string())?;
    }
    if let Some(model) = model {
        util::save_json(model, Some(&run_dir.join("model.json")))?;
    }
    Ok(run_dir)
}

fn run_dir_name<Tz>(now: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("ga_{}", now.format("%Y-%m-%d_%H-%M"))
}
