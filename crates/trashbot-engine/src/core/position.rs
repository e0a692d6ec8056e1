use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

use crate::InvalidDirectionError;

/// A cell coordinate on the grid.
///
/// Rows grow downwards and columns grow to the right, so `(0, 0)` is the
/// top-left corner. Positions carry no implicit bounds: adding a direction
/// delta to an edge cell yields an out-of-grid position, which the grid
/// reports as a wall.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Add,
)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        self + direction.delta()
    }

    /// Returns `true` if `other` is this position or one of its four orthogonal neighbours.
    #[must_use]
    pub fn is_von_neumann_neighbor(self, other: Self) -> bool {
        let distance = (self.row - other.row).abs() + (self.col - other.col).abs();
        distance <= 1
    }
}

/// One of the four cardinal directions the robot can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the unit offset for one step in this direction.
    #[must_use]
    pub const fn delta(self) -> Position {
        match self {
            Self::North => Position::new(-1, 0),
            Self::East => Position::new(0, 1),
            Self::South => Position::new(1, 0),
            Self::West => Position::new(0, -1),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidDirectionError { value })
    }
}

/// Allows drawing a uniformly random direction with `rng.random()`.
impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.random_range(0..Direction::LEN)]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn test_position_addition_is_componentwise() {
        let p = Position::new(3, -2) + Position::new(-1, 5);
        assert_eq!(p, Position::new(2, 3));
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::North.delta(), Position::new(-1, 0));
        assert_eq!(Direction::East.delta(), Position::new(0, 1));
        assert_eq!(Direction::South.delta(), Position::new(1, 0));
        assert_eq!(Direction::West.delta(), Position::new(0, -1));
    }

    #[test]
    fn test_direction_try_from_rejects_out_of_range() {
        assert_eq!(Direction::try_from(2), Ok(Direction::South));
        assert_eq!(
            Direction::try_from(4),
            Err(InvalidDirectionError { value: 4 })
        );
        assert!(Direction::try_from(u8::MAX).is_err());
    }

    #[test]
    fn test_von_neumann_neighborhood() {
        let center = Position::new(2, 2);
        for direction in Direction::ALL {
            assert!(center.is_von_neumann_neighbor(center.step(direction)));
        }
        assert!(center.is_von_neumann_neighbor(center));
        assert!(!center.is_von_neumann_neighbor(Position::new(3, 3)));
        assert!(!center.is_von_neumann_neighbor(Position::new(0, 2)));
    }

    #[test]
    fn test_random_direction_covers_all_values() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let mut seen = [false; Direction::LEN];
        for _ in 0..200 {
            let direction: Direction = rng.random();
            seen[direction as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
