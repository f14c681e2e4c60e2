//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe units, grid occupancy
//! and turn bookkeeping. Callers read this state freely but mutate it
//! exclusively through [`crate::engine::BattleEngine`].
pub mod error;
pub mod types;

pub use error::{GridError, StateError};
pub use types::{
    BattlePhase, BattleResult, CardinalDirection, Cell, Faction, GridIndex, GridPos, Stats,
    SurfaceId, TurnState, Unit, UnitId,
};

use crate::config::BattleConfig;

/// Canonical snapshot of the deterministic battle state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Roster in insertion order. Insertion order is the stable input order
    /// used when sorting turn order.
    units: Vec<Unit>,

    /// Cell to unit occupancy across every surface.
    pub grid: GridIndex,

    /// Phase, turn order and active unit.
    pub turn: TurnState,
}

impl BattleState {
    /// Creates an empty state in the placement phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit to the roster. The unit is not placed on the grid.
    pub fn add_unit(&mut self, mut unit: Unit) -> Result<UnitId, StateError> {
        if self.units.len() >= BattleConfig::MAX_UNITS {
            return Err(StateError::RosterFull {
                max: BattleConfig::MAX_UNITS,
            });
        }
        if self.unit(unit.id).is_some() {
            return Err(StateError::DuplicateUnit(unit.id));
        }
        unit.position = None;
        let id = unit.id;
        self.units.push(unit);
        Ok(id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// All units, dead or alive, in roster order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Living units of the given faction, in roster order.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter(move |u| u.faction == faction && u.is_alive())
    }

    pub fn has_living(&self, faction: Faction) -> bool {
        self.living(faction).next().is_some()
    }

    pub fn occupant_at(&self, pos: GridPos) -> Option<&Unit> {
        self.grid.occupant_at(pos).and_then(|id| self.unit(id))
    }

    /// The unit whose turn is active, if any.
    pub fn current_unit(&self) -> Option<&Unit> {
        self.turn.current.and_then(|id| self.unit(id))
    }

    pub fn phase(&self) -> BattlePhase {
        self.turn.phase
    }

    /// Records `unit` at `pos` in both the grid index and the unit itself.
    ///
    /// Terrain validation is the caller's responsibility.
    pub(crate) fn place(&mut self, unit: UnitId, pos: GridPos) -> Result<(), StateError> {
        let record = self.unit(unit).ok_or(StateError::UnknownUnit(unit))?;
        if !record.is_alive() {
            return Err(StateError::DeadUnit(unit));
        }
        match self.grid.position_of(unit) {
            Some(_) => self.grid.relocate(unit, pos)?,
            None => self.grid.set_occupied(pos, Some(unit))?,
        }
        if let Some(record) = self.unit_mut(unit) {
            record.position = Some(pos);
        }
        Ok(())
    }

    /// Removes a unit from the grid. Its roster entry is kept.
    pub(crate) fn unplace(&mut self, unit: UnitId) -> Option<GridPos> {
        let pos = self.grid.remove_unit(unit);
        if let Some(record) = self.unit_mut(unit) {
            record.position = None;
        }
        pos
    }

    /// Checks that every living unit's recorded position agrees with the grid index.
    pub fn occupancy_consistent(&self) -> bool {
        self.units.iter().all(|unit| {
            let indexed = self.grid.position_of(unit.id);
            indexed == unit.position
                && self.grid.cells_holding(unit.id) == usize::from(indexed.is_some())
                && (unit.is_alive() || indexed.is_none())
        })
    }
}
