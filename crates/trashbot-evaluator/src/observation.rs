//! Encoding of the robot's local surroundings into lookup-table keys.
//!
//! The robot samples five cells in a fixed order: its own cell, then north, east,
//! south and west. Each sampled cell becomes a base-3 digit (Empty = 0, Trash = 1,
//! Wall = 2) and the key is `Σ digit[i] · 3^i`, so the centre cell is the least
//! significant digit.
//!
//! ```
//! use trashbot_evaluator::observation::{Observation, ObservedCell};
//!
//! let observation = Observation::new([
//!     ObservedCell::Trash, // centre
//!     ObservedCell::Wall,  // north
//!     ObservedCell::Empty, // east
//!     ObservedCell::Empty, // south
//!     ObservedCell::Wall,  // west
//! ]);
//! assert_eq!(observation.key(), 1 + 2 * 3 + 2 * 81);
//! assert_eq!(Observation::from_key(observation.key()), Some(observation));
//! ```

use serde::{Deserialize, Serialize};
use trashbot_engine::{CellState, Direction, GridWorld, Position};

use crate::ObservationError;

/// Number of sampled cells.
pub const OBSERVATION_LEN: usize = 5;

/// Number of distinct observation keys (`3^5`).
pub const KEY_COUNT: usize = 243;

/// Offsets sampled around the robot, in key digit order.
pub const OBSERVATION_OFFSETS: [Position; OBSERVATION_LEN] = [
    Position::ORIGIN,
    Direction::North.delta(),
    Direction::East.delta(),
    Direction::South.delta(),
    Direction::West.delta(),
];

/// Names of the sampled cells, in key digit order.
pub const FEATURE_NAMES: [&str; OBSERVATION_LEN] =
    ["centerCell", "northCell", "eastCell", "southCell", "westCell"];

/// A sampled cell restricted to the classes a policy can see.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum ObservedCell {
    Empty,
    Trash,
    Wall,
}

impl ObservedCell {
    pub const LEN: usize = 3;
    pub const ALL: [Self; Self::LEN] = [Self::Empty, Self::Trash, Self::Wall];

    /// Base-3 digit of this cell in an observation key.
    #[must_use]
    pub const fn digit(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Trash => 1,
            Self::Wall => 2,
        }
    }

    #[must_use]
    pub const fn from_digit(digit: usize) -> Option<Self> {
        match digit {
            0 => Some(Self::Empty),
            1 => Some(Self::Trash),
            2 => Some(Self::Wall),
            _ => None,
        }
    }

    /// Converts an observed [`CellState`], or `None` if the cell is hidden.
    #[must_use]
    pub const fn from_cell_state(state: CellState) -> Option<Self> {
        match state {
            CellState::Empty => Some(Self::Empty),
            CellState::Trash => Some(Self::Trash),
            CellState::Wall => Some(Self::Wall),
            CellState::Hidden => None,
        }
    }
}

/// The five cells around the robot, in [`OBSERVATION_OFFSETS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    cells: [ObservedCell; OBSERVATION_LEN],
}

impl Observation {
    #[must_use]
    pub const fn new(cells: [ObservedCell; OBSERVATION_LEN]) -> Self {
        Self { cells }
    }

    /// Samples the cells around the robot's current position.
    ///
    /// All sampled offsets lie in the robot's own field of view, so a `Hidden`
    /// cell here means the visibility rule is broken and is reported as an error.
    pub fn observe(world: &GridWorld) -> Result<Self, ObservationError> {
        let robot = world.robot_position();
        let mut cells = [ObservedCell::Empty; OBSERVATION_LEN];
        for (cell, offset) in cells.iter_mut().zip(OBSERVATION_OFFSETS) {
            let position = robot + offset;
            *cell = ObservedCell::from_cell_state(world.cell_at(position))
                .ok_or(ObservationError::HiddenCell { position })?;
        }
        Ok(Self { cells })
    }

    /// Decodes a key produced by [`Self::key`], or `None` if `key >= KEY_COUNT`.
    #[must_use]
    pub fn from_key(key: usize) -> Option<Self> {
        if key >= KEY_COUNT {
            return None;
        }
        let mut rest = key;
        let mut cells = [ObservedCell::Empty; OBSERVATION_LEN];
        for cell in &mut cells {
            *cell = ObservedCell::from_digit(rest % ObservedCell::LEN)?;
            rest /= ObservedCell::LEN;
        }
        Some(Self { cells })
    }

    /// Iterates over every possible observation in key order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..KEY_COUNT).filter_map(Self::from_key)
    }

    #[must_use]
    pub fn key(&self) -> usize {
        self.cells
            .iter()
            .rev()
            .fold(0, |key, cell| key * ObservedCell::LEN + cell.digit())
    }

    #[must_use]
    pub fn cells(&self) -> &[ObservedCell; OBSERVATION_LEN] {
        &self.cells
    }

    #[must_use]
    pub fn center(&self) -> ObservedCell {
        self.cells[0]
    }

    /// Pairs each sampled cell with its feature name.
    pub fn features(&self) -> impl Iterator<Item = (&'static str, ObservedCell)> + '_ {
        FEATURE_NAMES.into_iter().zip(self.cells.iter().copied())
    }
}
