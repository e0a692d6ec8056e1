//! Driving a policy through a complete episode.

use rand::Rng;
use trashbot_engine::{EpisodeStats, GridWorld};

use crate::{EvaluationError, policy::Policy};

/// Final state of a finished episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSummary {
    pub score: i64,
    pub turns: usize,
    pub remaining_trash: usize,
    pub stats: EpisodeStats,
}

impl EpisodeSummary {
    #[must_use]
    pub fn from_world(world: &GridWorld) -> Self {
        Self {
            score: world.score(),
            turns: world.turn(),
            remaining_trash: world.remaining_trash(),
            stats: world.stats().clone(),
        }
    }
}

/// Applies `policy` once per turn until the episode is terminal.
///
/// Errors from the policy or from applying its action end the episode early.
pub fn play_episode<P, R>(
    world: &mut GridWorld,
    policy: &mut P,
    rng: &mut R,
) -> Result<EpisodeSummary, EvaluationError>
where
    P: Policy + ?Sized,
    R: Rng + ?Sized,
{
    while !world.is_game_over() {
        let action = policy.select_action(world, rng)?;
        world.apply_action(action, rng)?;
    }
    Ok(EpisodeSummary::from_world(world))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use trashbot_engine::{ActionError, GridConfig, InternalCellState, RobotAction, ScoreConfig};

    use super::*;
    use crate::policy::RandomPolicy;

    struct FixedPolicy(RobotAction);

    impl Policy for FixedPolicy {
        fn select_action<R>(
            &mut self,
            _world: &GridWorld,
            _rng: &mut R,
        ) -> Result<RobotAction, EvaluationError>
        where
            R: Rng + ?Sized,
        {
            Ok(self.0)
        }
    }

    fn world(max_turns: usize) -> GridWorld {
        let config = GridConfig {
            rows: 3,
            cols: 3,
            max_turns,
            trash_spawn_chance: 0.0,
            ..GridConfig::default()
        };
        GridWorld::from_cells(
            &config,
            ScoreConfig::default(),
            vec![InternalCellState::Trash; 9],
        )
        .unwrap()
    }

    #[test]
    fn test_plays_until_turn_limit() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut world = world(25);
        let summary = play_episode(&mut world, &mut RandomPolicy, &mut rng).unwrap();
        assert_eq!(summary.turns, 25);
        assert!(world.is_game_over());
    }

    #[test]
    fn test_collect_then_fail() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let mut world = world(3);
        let summary =
            play_episode(&mut world, &mut FixedPolicy(RobotAction::CollectTrash), &mut rng)
                .unwrap();
        assert_eq!(summary.score, 10 - 1 - 1);
        assert_eq!(summary.stats.trash_collected(), 1);
        assert_eq!(summary.remaining_trash, 8);
    }

    #[test]
    fn test_sentinel_aborts_episode() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let mut world = world(3);
        let result = play_episode(&mut world, &mut FixedPolicy(RobotAction::None), &mut rng);
        assert_eq!(result, Err(EvaluationError::Action(ActionError::Sentinel)));
        assert_eq!(world.turn(), 0);
    }
}
