use std::path::PathBuf;

use anyhow::Context as _;
use rand::Rng;
use tracing::debug;
use trashbot_engine::{ActionError, GridWorld};
use trashbot_evaluator::{
    classifier::{NaiveBayesClassifier, OnlineClassifier as _},
    episode::{EpisodeSummary, play_episode},
    genome::PolicyGenome,
    observation::Observation,
    policy::{ClassifierPolicy, GenomePolicy, Policy},
};
use trashbot_stats::DescriptiveStats;

use super::world;
use crate::model::policy_model::PolicyModel;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub(crate) enum PolicyKind {
    /// Look up the genome table directly
    #[default]
    Genome,
    /// Naive Bayes classifier trained from the genome table
    Classifier,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Policy model JSON written by `train`
    #[arg(long)]
    model: PathBuf,
    /// How actions are chosen: `genome` or `classifier`
    #[arg(long, default_value = "genome")]
    policy: PolicyKind,
    /// Number of episodes to play
    #[arg(long, default_value_t = 10)]
    episodes: usize,
    /// Seed for the master RNG; fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let model = PolicyModel::open(&arg.model)?;
    let genome = model
        .to_genome()
        .with_context(|| format!("Invalid genome in {}", arg.model.display()))?;
    model.grid.validate()?;
    let mut rng = world::master_rng(arg.seed);

    eprintln!("Model: {} (trained at {})", model.name, model.trained_at);
    let summaries = match arg.policy {
        PolicyKind::Genome => {
            play_episodes(&model, &mut GenomePolicy::new(&genome), arg.episodes, &mut rng)?
        }
        PolicyKind::Classifier => {
            let classifier = train_classifier(&genome)?;
            debug!(examples = classifier.example_count(), "trained classifier");
            let mut policy = ClassifierPolicy::new(classifier);
            play_episodes(&model, &mut policy, arg.episodes, &mut rng)?
        }
    };

    for (i, summary) in summaries.iter().enumerate() {
        println!(
            "Episode #{i}: score {}, turns {}, trash collected {}, wall bumps {}, failed collections {}, trash left {}",
            summary.score,
            summary.turns,
            summary.stats.trash_collected(),
            summary.stats.wall_bumps(),
            summary.stats.failed_collections(),
            summary.remaining_trash,
        );
    }

    #[expect(clippy::cast_precision_loss)]
    let scores = summaries.iter().map(|s| s.score as f32);
    if let Some(stats) = DescriptiveStats::new(scores) {
        println!("Score Stats ({} episodes, {} policy):", stats.count, arg.policy);
        println!("  Min:    {:.3}", stats.min);
        println!("  Max:    {:.3}", stats.max);
        println!("  Mean:   {:.3}", stats.mean);
        println!("  Median: {:.3}", stats.median);
        println!("  StdDev: {:.3}", stats.std_dev);
    }

    Ok(())
}

fn play_episodes<P, R>(
    model: &PolicyModel,
    policy: &mut P,
    episodes: usize,
    rng: &mut R,
) -> anyhow::Result<Vec<EpisodeSummary>>
where
    P: Policy,
    R: Rng,
{
    (0..episodes)
        .map(|episode| -> anyhow::Result<EpisodeSummary> {
            let mut world = GridWorld::new(&model.grid, model.score, rng)?;
            let summary = play_episode(&mut world, policy, rng)?;
            debug!(episode, score = summary.score, "episode finished");
            Ok(summary)
        })
        .collect()
}

/// Trains a classifier with one example per observation key, labelled with the
/// genome's action for that key.
fn train_classifier(genome: &PolicyGenome) -> Result<NaiveBayesClassifier, ActionError> {
    let mut classifier = NaiveBayesClassifier::new();
    for observation in Observation::all() {
        if let Some(action) = genome.action_for(observation.key()) {
            classifier.update(action, &observation)?;
        }
    }
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use trashbot_engine::{GridConfig, RobotAction, ScoreConfig};
    use trashbot_evaluator::{genome::GENOME_LEN, observation::KEY_COUNT};

    use super::*;

    fn uniform_genome(action: RobotAction) -> PolicyGenome {
        PolicyGenome::new(vec![action; GENOME_LEN]).unwrap()
    }

    #[test]
    fn test_classifier_learns_uniform_table() {
        let classifier = train_classifier(&uniform_genome(RobotAction::CollectTrash)).unwrap();
        assert_eq!(classifier.example_count(), KEY_COUNT);
        for observation in Observation::all() {
            assert_eq!(
                classifier.predict(&observation),
                Some(RobotAction::CollectTrash)
            );
        }
    }

    #[test]
    fn test_play_episodes_with_stored_model() {
        let genome = uniform_genome(RobotAction::SkipTurn);
        let grid = GridConfig {
            rows: 3,
            cols: 3,
            max_turns: 15,
            ..GridConfig::default()
        };
        let model = PolicyModel::new("skip", &genome, grid, ScoreConfig::DEFAULT);
        let mut rng = world::master_rng(Some(8));

        let summaries =
            play_episodes(&model, &mut GenomePolicy::new(&genome), 4, &mut rng).unwrap();
        assert_eq!(summaries.len(), 4);
        for summary in summaries {
            assert_eq!(summary.score, 0);
            assert_eq!(summary.turns, 15);
            assert_eq!(summary.stats.skipped_turns(), 15);
        }
    }
}
