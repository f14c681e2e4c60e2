use crate::action::{
    ActionError, ActionOutcome, ActionTransition, Resource, check_occupancy, living_unit, placed,
};
use crate::env::BattleEnv;
use crate::reachability::{self, ReachableSet};
use crate::state::{BattleState, GridPos, UnitId};

/// Move the acting unit to a reachable cell, paying Manhattan distance in MP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: UnitId,
    pub destination: GridPos,
}

impl MoveAction {
    pub fn new(actor: UnitId, destination: GridPos) -> Self {
        Self { actor, destination }
    }

    /// Validates the move and returns its MP cost together with the
    /// reachable set it was checked against.
    fn plan(
        &self,
        state: &BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<(u32, ReachableSet), ActionError> {
        let unit = living_unit(state, self.actor)?;
        let start = placed(unit)?;

        let distance = start
            .manhattan(self.destination)
            .ok_or(ActionError::OutOfRange {
                distance: None,
                range: unit.stats.current_mp,
            })?;
        let terrain = env.terrain();
        if !terrain.is_within_bounds(self.destination) || !terrain.has_ground(self.destination) {
            return Err(ActionError::OccupiedOrBlocked(self.destination));
        }

        let cost = distance.max(1);
        if cost > unit.stats.current_mp {
            return Err(ActionError::InsufficientResource {
                resource: Resource::MovePoints,
                required: cost,
                available: unit.stats.current_mp,
            });
        }

        let reachable = reachability::reachable_for(state, terrain, env.config(), self.actor)
            .ok_or_else(|| ActionError::desync(self.actor))?;
        if !reachable.contains(self.destination) {
            return Err(ActionError::OccupiedOrBlocked(self.destination));
        }

        Ok((cost, reachable))
    }
}

impl ActionTransition for MoveAction {
    type Error = ActionError;
    type Result = ActionOutcome;

    fn actor(&self) -> UnitId {
        self.actor
    }

    fn pre_validate(&self, state: &BattleState, env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.plan(state, env).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let (cost, reachable) = self.plan(state, env)?;
        let path = reachable
            .path_to(self.destination)
            .ok_or_else(|| ActionError::desync(self.actor))?;

        state
            .place(self.actor, self.destination)
            .map_err(|_| ActionError::desync(self.actor))?;
        let unit = state
            .unit_mut(self.actor)
            .ok_or_else(|| ActionError::desync(self.actor))?;
        unit.stats.current_mp -= cost;

        Ok(ActionOutcome {
            path: Some(path),
            effects: Vec::new(),
        })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        check_occupancy(state, self.actor)
    }
}
