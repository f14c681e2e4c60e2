//! Error types for the turn scheduler and the transition pipeline.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattlePhase, UnitId};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Errors raised by phase transitions and turn advancement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    /// Operation attempted outside the phase that accepts it.
    #[error("not allowed during {phase}")]
    InvalidPhase { phase: BattlePhase },

    /// Combat cannot start without living units.
    #[error("no living units to fight")]
    NoUnits,

    /// A living unit was never placed on the grid.
    #[error("{0} has not been placed")]
    Unplaced(UnitId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TurnError::InvalidPhase { .. } => ErrorSeverity::Recoverable,
            TurnError::NoUnits | TurnError::Unplaced(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::InvalidPhase { .. } => "TURN_INVALID_PHASE",
            TurnError::NoUnits => "TURN_NO_UNITS",
            TurnError::Unplaced(_) => "TURN_UNPLACED",
        }
    }
}
