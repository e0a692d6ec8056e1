use clap::Args;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;
use trashbot_engine::{BoundaryMode, GridConfig, ScoreConfig};

/// Grid shape and scoring flags shared by the subcommands.
#[derive(Debug, Clone, Args)]
pub(crate) struct WorldArg {
    /// Number of grid rows
    #[arg(long, default_value_t = 10)]
    rows: usize,
    /// Number of grid columns
    #[arg(long, default_value_t = 10)]
    cols: usize,
    /// Turns per episode
    #[arg(long, default_value_t = 200)]
    max_turns: usize,
    /// Probability of a cell starting with trash
    #[arg(long, default_value_t = 0.2)]
    trash_chance: f64,
    /// Grid edge behaviour: `bounded` (walls) or `toroidal` (legacy wrap-around)
    #[arg(long, default_value = "bounded")]
    boundary: BoundaryMode,
    /// Score for a successful move
    #[arg(long, default_value_t = ScoreConfig::DEFAULT.moved, allow_hyphen_values = true)]
    move_score: i32,
    /// Score for skipping a turn
    #[arg(long, default_value_t = ScoreConfig::DEFAULT.skipped_turn, allow_hyphen_values = true)]
    skip_score: i32,
    /// Score for collecting trash
    #[arg(long, default_value_t = ScoreConfig::DEFAULT.collected_trash, allow_hyphen_values = true)]
    collect_score: i32,
    /// Score for collecting on an empty cell
    #[arg(long, default_value_t = ScoreConfig::DEFAULT.failed_to_collect_trash, allow_hyphen_values = true)]
    failed_collect_score: i32,
    /// Score for walking into a wall
    #[arg(long, default_value_t = ScoreConfig::DEFAULT.wall_bump, allow_hyphen_values = true)]
    wall_score: i32,
}

impl WorldArg {
    pub(crate) fn grid_config(&self) -> GridConfig {
        GridConfig {
            rows: self.rows,
            cols: self.cols,
            max_turns: self.max_turns,
            trash_spawn_chance: self.trash_chance,
            boundary: self.boundary,
        }
    }

    pub(crate) fn score_config(&self) -> ScoreConfig {
        ScoreConfig {
            moved: self.move_score,
            skipped_turn: self.skip_score,
            collected_trash: self.collect_score,
            failed_to_collect_trash: self.failed_collect_score,
            wall_bump: self.wall_score,
        }
    }
}

/// Builds the master RNG, from `seed` when given.
pub(crate) fn master_rng(seed: Option<u64>) -> Pcg64Mcg {
    match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rand::Rng as _;

    use super::*;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[clap(flatten)]
        world: WorldArg,
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let wrapper = Wrapper::try_parse_from(["test"]).unwrap();
        assert_eq!(wrapper.world.grid_config(), GridConfig::default());
        assert_eq!(wrapper.world.score_config(), ScoreConfig::DEFAULT);
    }

    #[test]
    fn test_negative_scores_and_toroidal() {
        let wrapper = Wrapper::try_parse_from([
            "test",
            "--wall-score",
            "-20",
            "--boundary",
            "toroidal",
            "--rows",
            "3",
        ])
        .unwrap();
        assert_eq!(wrapper.world.score_config().wall_bump, -20);
        let grid = wrapper.world.grid_config();
        assert!(grid.boundary.is_toroidal());
        assert_eq!(grid.rows, 3);
    }

    #[test]
    fn test_seeded_master_rng_is_reproducible() {
        let a = master_rng(Some(5)).random::<u64>();
        let b = master_rng(Some(5)).random::<u64>();
        assert_eq!(a, b);
    }
}
