use tracing::{debug, info, warn};

use crate::action::Intent;
use crate::config::BattleConfig;
use crate::event::BattleEvent;
use crate::policy::Decision;
use crate::state::{BattlePhase, BattleResult, BattleState, Faction, Unit, UnitId};

use super::{BattleEngine, TurnError};

/// Deterministic acting order of the living units.
///
/// Units sort by `speed + faction_bias` (bias for the player side only),
/// descending; equal scores go to the side with the larger bias. The sort is
/// stable, so remaining ties keep roster order and recomputing on unchanged
/// state always yields the same order.
pub fn compute_turn_order(state: &BattleState, config: &BattleConfig) -> Vec<UnitId> {
    let bias = |unit: &Unit| match unit.faction {
        Faction::Player => config.faction_bias,
        Faction::Enemy => 0.0,
    };
    let score = |unit: &Unit| unit.stats.speed as f32 + bias(unit);

    let mut living: Vec<&Unit> = state.units().iter().filter(|u| u.is_alive()).collect();
    living.sort_by(|a, b| {
        score(b)
            .total_cmp(&score(a))
            .then_with(|| bias(b).total_cmp(&bias(a)))
    });
    living.into_iter().map(|u| u.id).collect()
}

/// Turn scheduling methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Leaves placement and starts the first turn.
    ///
    /// Every living unit must be on the grid. If one side is already empty
    /// the battle ends immediately.
    pub fn enter_combat(&mut self) -> Result<(), TurnError> {
        let phase = self.phase();
        if phase != BattlePhase::Placement {
            return Err(TurnError::InvalidPhase { phase });
        }

        let mut living = self.state.units().iter().filter(|u| u.is_alive());
        let Some(first) = living.next() else {
            return Err(TurnError::NoUnits);
        };
        if let Some(unplaced) = std::iter::once(first)
            .chain(living)
            .find(|u| u.position.is_none())
        {
            return Err(TurnError::Unplaced(unplaced.id));
        }

        self.set_phase(BattlePhase::Combat);
        if self.check_battle_end() {
            return Ok(());
        }

        self.state.turn.order = compute_turn_order(self.state, self.env.config());
        self.state.turn.turn_count = 0;
        self.start_turn(0);
        self.run_automated_turns();
        Ok(())
    }

    /// Ends the active unit's turn and starts the next one.
    pub fn end_turn(&mut self) -> Result<(), TurnError> {
        let phase = self.phase();
        if phase != BattlePhase::Combat {
            return Err(TurnError::InvalidPhase { phase });
        }
        self.advance_turn();
        self.run_automated_turns();
        Ok(())
    }

    fn set_phase(&mut self, phase: BattlePhase) {
        self.state.turn.phase = phase;
        info!(%phase, "battle phase changed");
        self.events.push(BattleEvent::PhaseChanged { phase });
    }

    /// Makes `order[index]` the active unit and refreshes its resources.
    pub(super) fn start_turn(&mut self, index: usize) {
        let Some(&unit) = self.state.turn.order.get(index) else {
            debug_assert!(false, "turn index {index} outside the turn order");
            return;
        };

        let turn = &mut self.state.turn;
        turn.index = index;
        turn.current = Some(unit);
        turn.current_removed = false;

        match self.state.unit_mut(unit) {
            Some(record) => {
                record.stats.refresh();
                record.has_attacked = false;
            }
            None => debug_assert!(false, "{unit} is in the turn order without a record"),
        }

        debug!(%unit, turn = self.state.turn.turn_count, "turn started");
        self.events.push(BattleEvent::TurnStarted { unit });
    }

    /// Ends the current turn, prunes dead units and starts the successor.
    pub(super) fn advance_turn(&mut self) {
        if let Some(unit) = self.state.turn.current {
            debug!(%unit, "turn ended");
            self.events.push(BattleEvent::TurnEnded { unit });
        }
        self.state.turn.turn_count += 1;

        let dead: Vec<UnitId> = self
            .state
            .turn
            .order
            .iter()
            .copied()
            .filter(|&id| !self.state.unit(id).is_some_and(Unit::is_alive))
            .collect();
        for unit in dead {
            self.state.turn.remove(unit);
        }

        if self.state.turn.order.is_empty() {
            debug_assert!(false, "combat continues with an empty turn order");
            self.state.turn.current = None;
            return;
        }
        let next = self.state.turn.next_index();
        self.start_turn(next);
    }

    /// Ends the battle if one side has no living units. Returns true once
    /// the battle is over.
    pub(super) fn check_battle_end(&mut self) -> bool {
        if self.phase() == BattlePhase::BattleEnd {
            return true;
        }

        let result = if !self.state.has_living(Faction::Player) {
            BattleResult::Defeat
        } else if !self.state.has_living(Faction::Enemy) {
            BattleResult::Victory
        } else {
            return false;
        };

        self.state.turn.result = Some(result);
        self.set_phase(BattlePhase::BattleEnd);
        info!(%result, turns = self.state.turn.turn_count, "battle ended");
        self.events.push(BattleEvent::BattleEnded { result });
        true
    }

    /// Plays turns for units the policy controls until a human-controlled
    /// unit is active or the battle ends.
    ///
    /// Stops after one full rotation of automated turns so a policy that
    /// controls every unit cannot spin forever.
    pub(super) fn run_automated_turns(&mut self) {
        let mut automated = 0usize;

        while self.state.turn.is_combat() {
            let Some(unit) = self
                .state
                .current_unit()
                .filter(|u| self.policy.controls(u))
                .map(|u| u.id)
            else {
                break;
            };
            if automated >= self.state.turn.order.len() {
                warn!(%unit, "no human-controlled unit left in the rotation; pausing automation");
                break;
            }
            automated += 1;

            let turn_before = self.state.turn.turn_count;
            match self.policy.decide(self.state, &self.env, unit) {
                Decision::Attack(target) => {
                    if let Err(error) = self.resolve(&Intent::attack(unit, target)) {
                        warn!(%unit, %target, %error, "automated attack rejected; passing");
                    }
                }
                Decision::Pass => debug!(%unit, "automated unit passes"),
            }

            if self.state.turn.is_combat() && self.state.turn.turn_count == turn_before {
                self.advance_turn();
            }
        }
    }
}
