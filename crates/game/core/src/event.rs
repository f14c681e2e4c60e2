//! Outbound notifications for presentation and logging collaborators.
//!
//! The engine appends events as it commits state transitions. Collaborators
//! drain them with [`crate::engine::BattleEngine::take_events`] and render,
//! animate or log them; events never feed back into the simulation.

use crate::state::{BattlePhase, BattleResult, GridPos, UnitId};

/// A committed state transition, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A unit was put on the grid during placement.
    UnitPlaced { unit: UnitId, position: GridPos },

    /// The battle moved to a new phase.
    PhaseChanged { phase: BattlePhase },

    /// A unit's turn began; its AP and MP are full.
    TurnStarted { unit: UnitId },

    /// A unit's turn finished.
    TurnEnded { unit: UnitId },

    /// A unit moved along `path` (start and destination inclusive).
    UnitMoved { unit: UnitId, path: Vec<GridPos> },

    /// HP removed from a unit.
    UnitDamaged {
        unit: UnitId,
        amount: u32,
        source: UnitId,
    },

    /// HP restored to a unit.
    UnitHealed {
        unit: UnitId,
        amount: u32,
        source: UnitId,
    },

    /// A unit's HP reached zero. Emitted once per unit.
    UnitDefeated { unit: UnitId },

    /// One side has no living units left. Emitted once per battle.
    BattleEnded { result: BattleResult },
}

impl BattleEvent {
    /// The unit this event is about, if it concerns one.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            BattleEvent::UnitPlaced { unit, .. }
            | BattleEvent::TurnStarted { unit }
            | BattleEvent::TurnEnded { unit }
            | BattleEvent::UnitMoved { unit, .. }
            | BattleEvent::UnitDamaged { unit, .. }
            | BattleEvent::UnitHealed { unit, .. }
            | BattleEvent::UnitDefeated { unit } => Some(*unit),
            BattleEvent::PhaseChanged { .. } | BattleEvent::BattleEnded { .. } => None,
        }
    }
}
