use serde::{Deserialize, Serialize};

use crate::Direction;

/// An action the robot can take on its turn.
///
/// [`RobotAction::None`] is a sentinel meaning "no action decided". It is never a
/// valid gene and applying it to an episode is rejected; see [`RobotAction::GENES`]
/// for the values a policy is allowed to choose from.
///
/// Actions display and parse by variant name, which is also the format used when
/// a policy is persisted as a comma-separated list:
///
/// ```
/// use trashbot_engine::RobotAction;
///
/// assert_eq!(RobotAction::CollectTrash.to_string(), "CollectTrash");
/// assert_eq!("MoveWest".parse::<RobotAction>().ok(), Some(RobotAction::MoveWest));
/// ```
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
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum RobotAction {
    None,
    MoveNorth,
    MoveEast,
    MoveSouth,
    MoveWest,
    MoveRandom,
    SkipTurn,
    CollectTrash,
}

impl RobotAction {
    /// Number of non-sentinel actions.
    pub const GENE_COUNT: usize = 7;

    /// Every action except the `None` sentinel, in declaration order.
    pub const GENES: [Self; Self::GENE_COUNT] = [
        Self::MoveNorth,
        Self::MoveEast,
        Self::MoveSouth,
        Self::MoveWest,
        Self::MoveRandom,
        Self::SkipTurn,
        Self::CollectTrash,
    ];

    /// Position of this action in [`Self::GENES`], or `None` for the sentinel.
    #[must_use]
    pub const fn gene_index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::MoveNorth => Some(0),
            Self::MoveEast => Some(1),
            Self::MoveSouth => Some(2),
            Self::MoveWest => Some(3),
            Self::MoveRandom => Some(4),
            Self::SkipTurn => Some(5),
            Self::CollectTrash => Some(6),
        }
    }

    /// Returns the fixed direction of a directed move, or `None` otherwise.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveNorth => Some(Direction::North),
            Self::MoveEast => Some(Direction::East),
            Self::MoveSouth => Some(Direction::South),
            Self::MoveWest => Some(Direction::West),
            Self::None | Self::MoveRandom | Self::SkipTurn | Self::CollectTrash => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genes_exclude_sentinel() {
        assert!(!RobotAction::GENES.contains(&RobotAction::None));
        assert_eq!(RobotAction::GENES.len(), RobotAction::GENE_COUNT);
    }

    #[test]
    fn test_gene_index_matches_genes_order() {
        for (i, action) in RobotAction::GENES.into_iter().enumerate() {
            assert_eq!(action.gene_index(), Some(i));
        }
        assert_eq!(RobotAction::None.gene_index(), None);
    }

    #[test]
    fn test_names_round_trip() {
        for action in RobotAction::GENES {
            let parsed: RobotAction = action.to_string().parse().unwrap();
            assert_eq!(parsed, action);
        }
        assert!("Teleport".parse::<RobotAction>().is_err());
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&RobotAction::MoveRandom).unwrap();
        assert_eq!(json, "\"MoveRandom\"");
    }
}
