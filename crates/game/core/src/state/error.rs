//! State management errors.
//!
//! Errors related to roster capacity, placement and grid occupancy.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{GridPos, UnitId};

/// Errors raised by the grid occupancy index.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Cell already holds a different unit.
    #[error("cell {pos} is already occupied by {occupant}")]
    CellTaken { pos: GridPos, occupant: UnitId },

    /// Unit is still recorded at another cell; it must be cleared first.
    #[error("unit {unit} is still recorded at {recorded}")]
    StaleOccupancy { unit: UnitId, recorded: GridPos },

    /// Unit has no recorded cell.
    #[error("unit {unit} is not on the grid")]
    NotPlaced { unit: UnitId },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::CellTaken { .. } => ErrorSeverity::Recoverable,
            GridError::StaleOccupancy { .. } | GridError::NotPlaced { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::CellTaken { .. } => "GRID_CELL_TAKEN",
            GridError::StaleOccupancy { .. } => "GRID_STALE_OCCUPANCY",
            GridError::NotPlaced { .. } => "GRID_NOT_PLACED",
        }
    }
}

/// Errors that occur while building or placing the roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Roster is full (max capacity reached).
    #[error("unit roster is full (max: {max})")]
    RosterFull { max: usize },

    /// A unit with this id already exists.
    #[error("unit {0} already exists")]
    DuplicateUnit(UnitId),

    /// No unit with this id exists.
    #[error("unit {0} not found")]
    UnknownUnit(UnitId),

    /// Placement target has no walkable ground or lies outside the surface.
    #[error("no ground at {0}")]
    NoGround(GridPos),

    /// Unit is dead and cannot be placed.
    #[error("unit {0} is dead")]
    DeadUnit(UnitId),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            RosterFull { .. } | DuplicateUnit(_) | UnknownUnit(_) | DeadUnit(_) => {
                ErrorSeverity::Validation
            }
            NoGround(_) => ErrorSeverity::Recoverable,
            Grid(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            RosterFull { .. } => "STATE_ROSTER_FULL",
            DuplicateUnit(_) => "STATE_DUPLICATE_UNIT",
            UnknownUnit(_) => "STATE_UNKNOWN_UNIT",
            NoGround(_) => "STATE_NO_GROUND",
            DeadUnit(_) => "STATE_DEAD_UNIT",
            Grid(err) => err.error_code(),
        }
    }
}
