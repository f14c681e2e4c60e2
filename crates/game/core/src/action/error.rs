//! Action resolution errors.
//!
//! Every inbound intent either commits completely or fails with one of these
//! kinds before any state is touched.

use crate::action::Target;
use crate::env::SkillId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattlePhase, GridPos, UnitId};

/// Per-turn resource an intent can run short of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    ActionPoints,
    MovePoints,
    /// The once-per-turn basic attack.
    Attack,
}

/// Errors that can occur while validating or resolving an intent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Intent submitted outside the phase that accepts it.
    #[error("not allowed during {phase}")]
    InvalidPhase { phase: BattlePhase },

    /// Unit id is unknown or its unit is dead.
    #[error("{0} does not refer to a living unit")]
    DeadUnitReference(UnitId),

    /// Intent from a unit whose turn is not active.
    #[error("{unit} cannot act during another unit's turn")]
    NotCurrentActor {
        unit: UnitId,
        current: Option<UnitId>,
    },

    /// Target has the wrong kind or allegiance for this intent.
    #[error("{0} is not a legal target")]
    InvalidTarget(Target),

    /// Target is farther than the attack or skill reaches.
    #[error("target is out of range ({distance:?} > {range})")]
    OutOfRange { distance: Option<u32>, range: u32 },

    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: Resource,
        required: u32,
        available: u32,
    },

    /// Destination has no ground, is occupied, or cannot be reached.
    #[error("{0} is occupied or blocked")]
    OccupiedOrBlocked(GridPos),

    /// Charge found no free cell next to its target.
    #[error("no free cell next to {target}")]
    NoLegalDestination { target: UnitId },

    /// Skill missing from the catalog or from the caster's loadout.
    #[error("{skill} is not available to {unit}")]
    UnknownSkill { unit: UnitId, skill: SkillId },

    /// Internal bookkeeping disagrees with itself.
    #[error("battle state desync around {unit}")]
    Desync { unit: UnitId },
}

impl ActionError {
    /// Builds a [`ActionError::Desync`], asserting in debug builds.
    pub(crate) fn desync(unit: UnitId) -> Self {
        debug_assert!(false, "battle state desync around {unit}");
        ActionError::Desync { unit }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InvalidPhase { .. } | NotCurrentActor { .. } => ErrorSeverity::Recoverable,
            InsufficientResource { .. } | OccupiedOrBlocked(_) => ErrorSeverity::Recoverable,
            NoLegalDestination { .. } => ErrorSeverity::Recoverable,
            DeadUnitReference(_) | InvalidTarget(_) | OutOfRange { .. } => {
                ErrorSeverity::Validation
            }
            UnknownSkill { .. } => ErrorSeverity::Validation,
            Desync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InvalidPhase { .. } => "ACTION_INVALID_PHASE",
            DeadUnitReference(_) => "ACTION_DEAD_UNIT_REFERENCE",
            NotCurrentActor { .. } => "ACTION_NOT_CURRENT_ACTOR",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            OccupiedOrBlocked(_) => "ACTION_OCCUPIED_OR_BLOCKED",
            NoLegalDestination { .. } => "ACTION_NO_LEGAL_DESTINATION",
            UnknownSkill { .. } => "ACTION_UNKNOWN_SKILL",
            Desync { .. } => "ACTION_DESYNC",
        }
    }
}
