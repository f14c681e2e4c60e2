//! Action resolution: movement, basic attacks and skills.
//!
//! Each intent is a small value type implementing [`ActionTransition`]. The
//! engine drives it through `pre_validate → apply → post_validate`; all
//! checks run in `pre_validate` against the untouched state, so a failing
//! intent never leaves partial effects behind.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`] and the [`Resource`] an intent can run out of
//! - `movement`: [`MoveAction`]
//! - `combat`: [`AttackAction`]
//! - `skill`: [`SkillAction`], including the charge relocation
//! - `targeting`: legal target queries used for highlighting
mod combat;
mod error;
mod movement;
mod skill;
pub mod targeting;

pub use combat::AttackAction;
pub use error::{ActionError, Resource};
pub use movement::MoveAction;
pub use skill::SkillAction;

use crate::env::{BattleEnv, SkillId};
use crate::state::{BattleState, GridPos, Unit, UnitId};

/// Defines how a concrete intent mutates battle state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the unit performing this action.
    fn actor(&self) -> UnitId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the battle state directly.
    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// What a skill is aimed at: a unit, or a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Unit(UnitId),
    Cell(GridPos),
}

impl core::fmt::Display for Target {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Target::Unit(unit) => write!(f, "unit {unit}"),
            Target::Cell(pos) => write!(f, "cell {pos}"),
        }
    }
}

/// Inbound intent from a player, a policy or a session controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Move(MoveAction),
    Attack(AttackAction),
    Skill(SkillAction),
}

impl Intent {
    pub fn movement(unit: UnitId, destination: GridPos) -> Self {
        Intent::Move(MoveAction::new(unit, destination))
    }

    pub fn attack(unit: UnitId, target: UnitId) -> Self {
        Intent::Attack(AttackAction::new(unit, target))
    }

    pub fn skill(unit: UnitId, skill: SkillId, target: Target) -> Self {
        Intent::Skill(SkillAction::new(unit, skill, target))
    }

    pub fn actor(&self) -> UnitId {
        match self {
            Intent::Move(action) => action.actor(),
            Intent::Attack(action) => action.actor(),
            Intent::Skill(action) => action.actor(),
        }
    }
}

/// HP change applied to one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HpChange {
    Damage(u32),
    Heal(u32),
}

/// A resolved effect on a single unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitEffect {
    pub unit: UnitId,
    pub change: HpChange,
    /// The change took the unit from alive to dead.
    pub defeated: bool,
}

/// Everything a committed intent changed, in resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    /// Cells walked by the actor, start and destination inclusive.
    pub path: Option<Vec<GridPos>>,
    pub effects: Vec<UnitEffect>,
}

impl ActionOutcome {
    /// Units defeated by this intent.
    pub fn defeated(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.effects.iter().filter(|e| e.defeated).map(|e| e.unit)
    }
}

/// Looks up a unit that must exist and be alive.
pub(crate) fn living_unit(state: &BattleState, id: UnitId) -> Result<&Unit, ActionError> {
    state
        .unit(id)
        .filter(|unit| unit.is_alive())
        .ok_or(ActionError::DeadUnitReference(id))
}

/// Position of a living unit that must be on the grid during combat.
pub(crate) fn placed(unit: &Unit) -> Result<GridPos, ActionError> {
    unit.position.ok_or_else(|| ActionError::desync(unit.id))
}

/// Applies an HP change, unplacing the unit if it dies.
pub(crate) fn apply_hp_change(
    state: &mut BattleState,
    unit: UnitId,
    change: HpChange,
) -> Result<UnitEffect, ActionError> {
    let record = state
        .unit_mut(unit)
        .filter(|u| u.is_alive())
        .ok_or_else(|| ActionError::desync(unit))?;

    let applied = match change {
        HpChange::Damage(amount) => HpChange::Damage(record.take_damage(amount)),
        HpChange::Heal(amount) => HpChange::Heal(record.heal(amount)),
    };
    let defeated = !record.is_alive();
    if defeated {
        state.unplace(unit);
    }

    Ok(UnitEffect {
        unit,
        change: applied,
        defeated,
    })
}

/// Rejects any state where the grid index and unit records disagree.
pub(crate) fn check_occupancy(state: &BattleState, actor: UnitId) -> Result<(), ActionError> {
    if state.occupancy_consistent() {
        Ok(())
    } else {
        Err(ActionError::desync(actor))
    }
}
