//! Turn scheduling and intent execution pipeline.
//!
//! The [`BattleEngine`] is the only writer of [`BattleState`]. It validates
//! who may act, drives intents through the transition pipeline, records
//! outbound events, removes defeated units from the turn order and decides
//! when a turn or the battle ends.

mod errors;
mod transition;
mod turns;

pub use errors::{TransitionPhase, TurnError};
pub use turns::compute_turn_order;

use tracing::debug;

use crate::action::{ActionError, ActionOutcome, HpChange, Intent, Target, living_unit, targeting};
use crate::env::{BattleEnv, SkillId};
use crate::event::BattleEvent;
use crate::policy::{NearestTargetPolicy, TurnPolicy};
use crate::reachability::{self, ReachableSet};
use crate::state::{BattlePhase, BattleState, Faction, GridPos, UnitId};

static NEAREST: NearestTargetPolicy = NearestTargetPolicy::new(Faction::Enemy);

/// Battle engine wiring the state to its read-only collaborators.
///
/// Every collaborator is handed over at construction; nothing is looked up
/// ad hoc. Events accumulate until drained with [`BattleEngine::take_events`].
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    env: BattleEnv<'a>,
    policy: &'a dyn TurnPolicy,
    events: Vec<BattleEvent>,
}

impl<'a> BattleEngine<'a> {
    /// Creates an engine whose enemy turns are played by [`NearestTargetPolicy`].
    ///
    /// Pass [`ManualPolicy`](crate::policy::ManualPolicy) to
    /// [`BattleEngine::with_policy`] to drive every turn from outside.
    pub fn new(state: &'a mut BattleState, env: BattleEnv<'a>) -> Self {
        Self {
            state,
            env,
            policy: &NEAREST,
            events: Vec::new(),
        }
    }

    /// Replaces the policy that plays automated turns.
    pub fn with_policy(mut self, policy: &'a dyn TurnPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn env(&self) -> BattleEnv<'a> {
        self.env
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.turn.phase
    }

    /// The unit whose turn is active.
    pub fn current_unit(&self) -> Option<UnitId> {
        self.state.turn.current
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== placement =====

    /// Puts `unit` on `pos`, or moves it there if already placed.
    pub fn place_unit(&mut self, unit: UnitId, pos: GridPos) -> Result<(), ActionError> {
        if self.phase() != BattlePhase::Placement {
            return Err(ActionError::InvalidPhase {
                phase: self.phase(),
            });
        }
        living_unit(self.state, unit)?;

        let terrain = self.env.terrain();
        if !terrain.is_within_bounds(pos) || !terrain.has_ground(pos) {
            return Err(ActionError::OccupiedOrBlocked(pos));
        }
        if self.state.grid.occupant_at(pos).is_some_and(|other| other != unit) {
            return Err(ActionError::OccupiedOrBlocked(pos));
        }

        self.state
            .place(unit, pos)
            .map_err(|_| ActionError::desync(unit))?;
        debug!(%unit, %pos, "unit placed");
        self.events.push(BattleEvent::UnitPlaced {
            unit,
            position: pos,
        });
        Ok(())
    }

    // ===== intents =====

    pub fn request_move(
        &mut self,
        unit: UnitId,
        destination: GridPos,
    ) -> Result<ActionOutcome, ActionError> {
        self.execute(&Intent::movement(unit, destination))
    }

    pub fn request_attack(
        &mut self,
        unit: UnitId,
        target: UnitId,
    ) -> Result<ActionOutcome, ActionError> {
        self.execute(&Intent::attack(unit, target))
    }

    pub fn request_skill(
        &mut self,
        unit: UnitId,
        skill: SkillId,
        target: Target,
    ) -> Result<ActionOutcome, ActionError> {
        self.execute(&Intent::skill(unit, skill, target))
    }

    /// Resolves an intent from the active unit, then plays any automated
    /// turns that follow.
    pub fn execute(&mut self, intent: &Intent) -> Result<ActionOutcome, ActionError> {
        let outcome = self.resolve(intent)?;
        self.run_automated_turns();
        Ok(outcome)
    }

    // ===== queries =====

    /// Cells `unit` can move to with its remaining MP.
    pub fn reachable(&self, unit: UnitId) -> Option<ReachableSet> {
        reachability::reachable_for(self.state, self.env.terrain(), self.env.config(), unit)
    }

    pub fn attack_targets(&self, unit: UnitId) -> Vec<UnitId> {
        targeting::attack_targets(self.state, &self.env, unit)
    }

    pub fn skill_targets(&self, unit: UnitId, skill: SkillId) -> Vec<GridPos> {
        targeting::skill_targets(self.state, &self.env, unit, skill)
    }

    // ===== internals =====

    /// Checks phase, liveness and turn ownership, in that order.
    fn validate_actor(&self, unit: UnitId) -> Result<(), ActionError> {
        if !self.state.turn.is_combat() {
            return Err(ActionError::InvalidPhase {
                phase: self.phase(),
            });
        }
        living_unit(self.state, unit)?;

        let current = self.state.turn.current;
        if current != Some(unit) || self.state.turn.current_removed {
            return Err(ActionError::NotCurrentActor { unit, current });
        }
        Ok(())
    }

    /// Validates and commits one intent without running automated turns.
    fn resolve(&mut self, intent: &Intent) -> Result<ActionOutcome, ActionError> {
        let actor = intent.actor();
        self.validate_actor(actor)?;

        let outcome = transition::execute_transition(intent, self.state, &self.env)?;
        self.state.turn.nonce += 1;
        self.record(actor, &outcome);

        for unit in outcome.defeated() {
            self.state.turn.remove(unit);
        }
        if self.check_battle_end() {
            return Ok(outcome);
        }

        let exhausted = self
            .state
            .unit(actor)
            .is_some_and(|unit| unit.is_exhausted());
        if self.state.turn.current_removed || (self.env.config().auto_end_turn && exhausted) {
            self.advance_turn();
        }
        Ok(outcome)
    }

    /// Appends the events describing a committed outcome.
    fn record(&mut self, actor: UnitId, outcome: &ActionOutcome) {
        if let Some(path) = &outcome.path {
            debug!(unit = %actor, steps = path.len().saturating_sub(1), "unit moved");
            self.events.push(BattleEvent::UnitMoved {
                unit: actor,
                path: path.clone(),
            });
        }

        for effect in &outcome.effects {
            let event = match effect.change {
                HpChange::Damage(amount) => {
                    debug!(source = %actor, target = %effect.unit, amount, "damage dealt");
                    BattleEvent::UnitDamaged {
                        unit: effect.unit,
                        amount,
                        source: actor,
                    }
                }
                HpChange::Heal(amount) => {
                    debug!(source = %actor, target = %effect.unit, amount, "healed");
                    BattleEvent::UnitHealed {
                        unit: effect.unit,
                        amount,
                        source: actor,
                    }
                }
            };
            self.events.push(event);

            if effect.defeated {
                debug!(unit = %effect.unit, "unit defeated");
                self.events
                    .push(BattleEvent::UnitDefeated { unit: effect.unit });
            }
        }
    }
}

impl core::fmt::Debug for BattleEngine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("phase", &self.phase())
            .field("current", &self.current_unit())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}
