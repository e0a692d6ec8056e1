use rand::Rng;

use crate::{
    ActionError, GridConfigError,
    core::{
        action::RobotAction,
        cell::{CellState, InternalCellState},
        position::{Direction, Position},
    },
};

use super::{
    config::{BoundaryMode, GridConfig, ScoreConfig},
    episode_stats::EpisodeStats,
};

/// Lifecycle state of an episode.
///
/// `Terminal` is absorbing: there is no transition back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeState {
    Active,
    Terminal,
}

/// Result of applying one [`RobotAction`] through [`GridWorld::apply_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ActionOutcome {
    /// The action consumed a turn and achieved its effect.
    Succeeded,
    /// The action consumed a turn but failed (wall bump or nothing to collect).
    Failed,
    /// The episode was already terminal; nothing changed.
    Ignored,
}

impl ActionOutcome {
    fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }
}

/// A single episode of the trash picking game.
///
/// The grid is stored row-major. The robot starts at [`Position::ORIGIN`] with
/// turn and score at zero. Every mutating call first checks for termination
/// (`turn >= max_turns`) and becomes a no-op on a terminal episode.
#[derive(Debug, Clone)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    extent: Position,
    cells: Vec<InternalCellState>,
    boundary: BoundaryMode,
    score_config: ScoreConfig,
    robot_position: Position,
    target_position: Position,
    movement_direction: Option<Direction>,
    turn: usize,
    max_turns: usize,
    score: i64,
    stats: EpisodeStats,
}

impl GridWorld {
    /// Creates an episode whose cells independently hold trash with
    /// `config.trash_spawn_chance`.
    pub fn new<R>(
        config: &GridConfig,
        score_config: ScoreConfig,
        rng: &mut R,
    ) -> Result<Self, GridConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let cells = (0..config.cell_count())
            .map(|_| {
                if rng.random_bool(config.trash_spawn_chance) {
                    InternalCellState::Trash
                } else {
                    InternalCellState::Empty
                }
            })
            .collect();
        Self::from_cells(config, score_config, cells)
    }

    /// Creates an episode from an explicit row-major cell layout.
    ///
    /// `config.trash_spawn_chance` is validated but otherwise unused.
    pub fn from_cells(
        config: &GridConfig,
        score_config: ScoreConfig,
        cells: Vec<InternalCellState>,
    ) -> Result<Self, GridConfigError> {
        config.validate()?;
        if cells.len() != config.cell_count() {
            return Err(GridConfigError::CellCountMismatch {
                expected: config.cell_count(),
                actual: cells.len(),
            });
        }
        let too_large = GridConfigError::TooLarge {
            rows: config.rows,
            cols: config.cols,
        };
        let extent = Position::new(
            i32::try_from(config.rows).map_err(|_| too_large.clone())?,
            i32::try_from(config.cols).map_err(|_| too_large)?,
        );
        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            extent,
            cells,
            boundary: config.boundary,
            score_config,
            robot_position: Position::ORIGIN,
            target_position: Position::ORIGIN,
            movement_direction: None,
            turn: 0,
            max_turns: config.max_turns,
            score: 0,
            stats: EpisodeStats::new(),
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    #[must_use]
    pub fn score_config(&self) -> &ScoreConfig {
        &self.score_config
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    #[must_use]
    pub fn robot_position(&self) -> Position {
        self.robot_position
    }

    /// Target of the most recent move attempt.
    ///
    /// Equals the start position until the first move. After a wall bump it holds
    /// the out-of-grid position the robot tried to reach.
    #[must_use]
    pub fn target_position(&self) -> Position {
        self.target_position
    }

    /// Direction of the most recent move attempt.
    #[must_use]
    pub fn movement_direction(&self) -> Option<Direction> {
        self.movement_direction
    }

    #[must_use]
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.turn >= self.max_turns
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        if self.is_game_over() {
            EpisodeState::Terminal
        } else {
            EpisodeState::Active
        }
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        (0..self.extent.row).contains(&pos.row) && (0..self.extent.col).contains(&pos.col)
    }

    /// Returns the cell at `pos` as seen from the robot's current position.
    ///
    /// On a bounded grid, positions outside the grid are `Wall` and in-grid cells
    /// outside the robot's Von Neumann neighbourhood are `Hidden`. On a toroidal
    /// grid the position wraps and every cell is visible.
    #[must_use]
    pub fn cell_at(&self, pos: Position) -> CellState {
        match self.boundary {
            BoundaryMode::Bounded => match self.index(pos) {
                None => CellState::Wall,
                Some(_) if !self.robot_position.is_von_neumann_neighbor(pos) => CellState::Hidden,
                Some(index) => self.cells[index].into(),
            },
            BoundaryMode::Toroidal => self.internal_cell(self.wrap(pos)).into(),
        }
    }

    /// Returns the ground truth of an in-grid cell, ignoring visibility.
    #[must_use]
    pub fn internal_cell_at(&self, pos: Position) -> Option<InternalCellState> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Number of cells that still hold trash.
    #[must_use]
    pub fn remaining_trash(&self) -> usize {
        self.cells.iter().filter(|c| c.is_trash()).count()
    }

    /// Tries to move the robot one step towards `direction`.
    ///
    /// Returns `true` if the robot moved. On a bounded grid, a move off the edge
    /// leaves the robot in place, applies the wall bump penalty and returns `false`.
    pub fn move_robot(&mut self, direction: Direction) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.turn += 1;
        self.movement_direction = Some(direction);

        let mut target = self.robot_position.step(direction);
        if self.boundary.is_toroidal() {
            target = self.wrap(target);
        }
        self.target_position = target;

        let moved = self.contains(target);
        if moved {
            self.robot_position = target;
            self.add_score(self.score_config.moved);
        } else {
            self.add_score(self.score_config.wall_bump);
        }
        self.stats.record_move(moved);
        moved
    }

    /// Spends the current turn without acting.
    ///
    /// Returns `false` if the episode is already terminal.
    pub fn skip_turn(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.turn += 1;
        self.add_score(self.score_config.skipped_turn);
        self.stats.record_skip();
        true
    }

    /// Tries to pick up trash from the robot's cell.
    ///
    /// Returns `true` and clears the cell if it held trash, otherwise applies the
    /// failed collection penalty and returns `false`.
    pub fn collect_trash(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.turn += 1;

        let collected = match self.index(self.robot_position) {
            Some(index) if self.cells[index].is_trash() => {
                self.cells[index] = InternalCellState::Empty;
                true
            }
            _ => false,
        };
        if collected {
            self.add_score(self.score_config.collected_trash);
        } else {
            self.add_score(self.score_config.failed_to_collect_trash);
        }
        self.stats.record_collection(collected);
        collected
    }

    /// Applies `action`, drawing a uniformly random direction for
    /// [`RobotAction::MoveRandom`].
    ///
    /// The `None` sentinel has no handler and is rejected regardless of the
    /// episode state.
    pub fn apply_action<R>(
        &mut self,
        action: RobotAction,
        rng: &mut R,
    ) -> Result<ActionOutcome, ActionError>
    where
        R: Rng + ?Sized,
    {
        if action.is_none() {
            return Err(ActionError::Sentinel);
        }
        if self.is_game_over() {
            return Ok(ActionOutcome::Ignored);
        }
        let success = match action {
            RobotAction::None => return Err(ActionError::Sentinel),
            RobotAction::MoveNorth => self.move_robot(Direction::North),
            RobotAction::MoveEast => self.move_robot(Direction::East),
            RobotAction::MoveSouth => self.move_robot(Direction::South),
            RobotAction::MoveWest => self.move_robot(Direction::West),
            RobotAction::MoveRandom => self.move_robot(rng.random()),
            RobotAction::SkipTurn => self.skip_turn(),
            RobotAction::CollectTrash => self.collect_trash(),
        };
        Ok(ActionOutcome::from_success(success))
    }

    /// Scores are accumulated in `i64` and saturate instead of overflowing.
    fn add_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(i64::from(delta));
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        Some(row * self.cols + col)
    }

    fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.row.rem_euclid(self.extent.row),
            pos.col.rem_euclid(self.extent.col),
        )
    }

    fn internal_cell(&self, pos: Position) -> InternalCellState {
        self.index(pos)
            .map_or(InternalCellState::Empty, |index| self.cells[index])
    }
}
