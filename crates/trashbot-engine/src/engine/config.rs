use serde::{Deserialize, Serialize};

use crate::GridConfigError;

/// How the grid treats positions beyond its edges.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum BoundaryMode {
    /// Edges are walls: moving off the grid fails with a penalty, and the robot
    /// only sees its own cell and its four orthogonal neighbours.
    #[default]
    Bounded,
    /// Legacy wrap-around grid: moves off one edge re-enter from the opposite
    /// edge and always succeed. There are no walls and no fog of war.
    Toroidal,
}

/// Shape and population parameters of an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_turns: usize,
    /// Probability that a cell holds trash when the grid is created.
    pub trash_spawn_chance: f64,
    #[serde(default)]
    pub boundary: BoundaryMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            max_turns: 200,
            trash_spawn_chance: 0.2,
            boundary: BoundaryMode::Bounded,
        }
    }
}

impl GridConfig {
    /// Checks that the configuration describes a grid an episode can be played on.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        let Self {
            rows,
            cols,
            trash_spawn_chance,
            ..
        } = *self;
        if rows == 0 || cols == 0 {
            return Err(GridConfigError::EmptyGrid { rows, cols });
        }
        if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
            return Err(GridConfigError::TooLarge { rows, cols });
        }
        if !(0.0..=1.0).contains(&trash_spawn_chance) {
            return Err(GridConfigError::InvalidTrashChance {
                chance: trash_spawn_chance,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Score changes applied for each action outcome.
///
/// Values may be negative (penalties). The defaults reward collecting trash and
/// penalise bumping into walls and collecting from an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub moved: i32,
    pub skipped_turn: i32,
    pub collected_trash: i32,
    pub failed_to_collect_trash: i32,
    pub wall_bump: i32,
}

impl ScoreConfig {
    pub const DEFAULT: Self = Self {
        moved: 0,
        skipped_turn: 0,
        collected_trash: 10,
        failed_to_collect_trash: -1,
        wall_bump: -5,
    };
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let config = GridConfig {
            rows: 0,
            ..GridConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(GridConfigError::EmptyGrid { rows: 0, cols: 10 })
        );
    }

    #[test]
    fn test_validate_rejects_bad_trash_chance() {
        for chance in [-0.1, 1.5, f64::NAN] {
            let config = GridConfig {
                trash_spawn_chance: chance,
                ..GridConfig::default()
            };
            assert!(config.validate().is_err(), "chance {chance} should be rejected");
        }
    }

    #[test]
    fn test_boundary_defaults_to_bounded_when_missing() {
        let json = r#"{"rows":3,"cols":4,"max_turns":5,"trash_spawn_chance":0.5}"#;
        let config: GridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.boundary, BoundaryMode::Bounded);
    }
}
