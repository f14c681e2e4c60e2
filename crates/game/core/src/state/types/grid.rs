use std::collections::HashMap;

use super::{GridPos, UnitId};
use crate::state::GridError;

/// Occupancy index mapping grid cells to the unit standing on them.
///
/// # Invariants
///
/// - A cell holds at most one occupant.
/// - A unit is recorded at exactly one cell, or not at all.
///
/// Both directions are kept in sync so either lookup is O(1). Moving a unit is
/// a two-step clear-then-set; setting a unit that is still recorded elsewhere
/// is rejected with [`GridError::StaleOccupancy`] instead of leaving a ghost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridIndex {
    occupants: HashMap<GridPos, UnitId>,
    positions: HashMap<UnitId, GridPos>,
}

impl GridIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant_at(&self, pos: GridPos) -> Option<UnitId> {
        self.occupants.get(&pos).copied()
    }

    pub fn position_of(&self, unit: UnitId) -> Option<GridPos> {
        self.positions.get(&unit).copied()
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupants.contains_key(&pos)
    }

    /// Sets or clears the occupant of `pos`.
    ///
    /// Clearing an empty cell is a no-op.
    pub fn set_occupied(&mut self, pos: GridPos, unit: Option<UnitId>) -> Result<(), GridError> {
        match unit {
            None => {
                if let Some(previous) = self.occupants.remove(&pos) {
                    self.positions.remove(&previous);
                }
                Ok(())
            }
            Some(unit) => {
                if let Some(occupant) = self.occupant_at(pos) {
                    return if occupant == unit {
                        Ok(())
                    } else {
                        Err(GridError::CellTaken { pos, occupant })
                    };
                }
                if let Some(recorded) = self.position_of(unit) {
                    return Err(GridError::StaleOccupancy { unit, recorded });
                }
                self.occupants.insert(pos, unit);
                self.positions.insert(unit, pos);
                Ok(())
            }
        }
    }

    /// Clears the unit's current cell, then records it at `to`.
    ///
    /// Validation happens before either step, so a failure leaves the index untouched.
    pub fn relocate(&mut self, unit: UnitId, to: GridPos) -> Result<(), GridError> {
        let from = self
            .position_of(unit)
            .ok_or(GridError::NotPlaced { unit })?;
        if from == to {
            return Ok(());
        }
        if let Some(occupant) = self.occupant_at(to) {
            return Err(GridError::CellTaken { pos: to, occupant });
        }
        self.set_occupied(from, None)?;
        self.set_occupied(to, Some(unit))
    }

    /// Removes the unit from wherever it is recorded.
    pub fn remove_unit(&mut self, unit: UnitId) -> Option<GridPos> {
        let pos = self.positions.remove(&unit)?;
        self.occupants.remove(&pos);
        Some(pos)
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Iterates `(cell, occupant)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, UnitId)> + '_ {
        self.occupants.iter().map(|(&pos, &unit)| (pos, unit))
    }

    /// Number of cells that report `unit` as occupant. Always 0 or 1.
    pub fn cells_holding(&self, unit: UnitId) -> usize {
        self.occupants.values().filter(|&&u| u == unit).count()
    }
}
