use serde::{Deserialize, Serialize};

/// Ground truth content of a grid cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum InternalCellState {
    #[default]
    Empty,
    Trash,
}

/// A cell as observed from the robot's position.
///
/// - `Wall` is reported for any position outside the grid
/// - `Hidden` is reported for in-grid cells outside the robot's field of view
/// - `Empty` and `Trash` mirror [`InternalCellState`] for visible cells
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
pub enum CellState {
    Empty,
    Trash,
    Wall,
    Hidden,
}

impl From<InternalCellState> for CellState {
    fn from(value: InternalCellState) -> Self {
        match value {
            InternalCellState::Empty => Self::Empty,
            InternalCellState::Trash => Self::Trash,
        }
    }
}
