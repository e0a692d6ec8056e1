//! Grid world engine for the trash picking robot.
//!
//! The engine is split in two layers:
//!
//! - [`core`] - value types shared by every crate: [`Position`], [`Direction`],
//!   [`CellState`], [`InternalCellState`] and [`RobotAction`]
//! - [`engine`] - the turn based episode state machine ([`GridWorld`]) and its
//!   configuration ([`GridConfig`], [`ScoreConfig`])
//!
//! An episode starts with the robot at `(0, 0)` on a grid where each cell holds
//! trash with a fixed probability. Every mutating call consumes one turn, and once
//! the turn counter reaches the configured limit the episode is terminal and all
//! further calls are no-ops.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//! use trashbot_engine::{Direction, GridConfig, GridWorld, ScoreConfig};
//!
//! let mut rng = Pcg64Mcg::seed_from_u64(7);
//! let config = GridConfig {
//!     rows: 5,
//!     cols: 5,
//!     max_turns: 10,
//!     ..GridConfig::default()
//! };
//! let mut world = GridWorld::new(&config, ScoreConfig::default(), &mut rng).unwrap();
//!
//! // The robot starts in the top-left corner, so moving north bumps into a wall.
//! assert!(!world.move_robot(Direction::North));
//! assert_eq!(world.score(), -5);
//! assert_eq!(world.turn(), 1);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when an integer does not name one of the four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction value: {value}")]
pub struct InvalidDirectionError {
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GridConfigError {
    #[display("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[display("grid dimensions {rows}x{cols} do not fit in a signed 32-bit position")]
    TooLarge { rows: usize, cols: usize },
    #[display("trash spawn chance must be within [0, 1], got {chance}")]
    InvalidTrashChance { chance: f64 },
    #[display("cell layout has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("the None action has no handler and cannot be applied")]
    Sentinel,
}
