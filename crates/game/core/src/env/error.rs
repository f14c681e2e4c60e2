//! Oracle access errors.
//!
//! Errors related to terrain and skill catalog construction and lookups.

use crate::env::SkillId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GridPos, SurfaceId};

/// Errors that occur when building or querying oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Surface id is not known to the terrain oracle.
    #[error("{0} not found")]
    UnknownSurface(SurfaceId),

    /// Surface id registered twice.
    #[error("{0} registered twice")]
    DuplicateSurface(SurfaceId),

    /// Cell size must be positive.
    #[error("{surface} has a non-positive cell size")]
    InvalidCellSize { surface: SurfaceId },

    /// Cell lies outside its surface's bounds.
    #[error("{0} is out of surface bounds")]
    OutOfBounds(GridPos),

    /// Skill id is not in the catalog.
    #[error("{0} not found")]
    UnknownSkill(SkillId),

    /// Skill id registered twice.
    #[error("{0} registered twice")]
    DuplicateSkill(SkillId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            UnknownSurface(_) | UnknownSkill(_) | OutOfBounds(_) => ErrorSeverity::Validation,
            DuplicateSurface(_) | DuplicateSkill(_) | InvalidCellSize { .. } => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            UnknownSurface(_) => "ORACLE_UNKNOWN_SURFACE",
            DuplicateSurface(_) => "ORACLE_DUPLICATE_SURFACE",
            InvalidCellSize { .. } => "ORACLE_INVALID_CELL_SIZE",
            OutOfBounds(_) => "ORACLE_OUT_OF_BOUNDS",
            UnknownSkill(_) => "ORACLE_UNKNOWN_SKILL",
            DuplicateSkill(_) => "ORACLE_DUPLICATE_SKILL",
        }
    }
}
