//! Interaction sessions: one explicit state per selection mode.
//!
//! A [`SessionController`] turns discrete input events into intents. The
//! legal target set of a mode is computed once when the mode starts and the
//! session is discarded when its intent commits, when it is cancelled, or
//! when the active unit changes. Cancelling never touches battle state.

use crate::action::{ActionError, ActionOutcome, Target};
use crate::engine::BattleEngine;
use crate::env::SkillId;
use crate::reachability::ReachableSet;
use crate::state::{GridPos, UnitId};

/// Discrete input from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    SelectUnit(UnitId),
    SelectCell(GridPos),
    Confirm,
    Cancel,
}

/// The pending interaction, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Idle,
    Moving {
        unit: UnitId,
        reachable: ReachableSet,
        pending: Option<GridPos>,
    },
    Attacking {
        unit: UnitId,
        targets: Vec<UnitId>,
        pending: Option<UnitId>,
    },
    Casting {
        unit: UnitId,
        skill: SkillId,
        targets: Vec<GridPos>,
        pending: Option<GridPos>,
    },
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    /// The unit this session acts for.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Session::Idle => None,
            Session::Moving { unit, .. }
            | Session::Attacking { unit, .. }
            | Session::Casting { unit, .. } => Some(*unit),
        }
    }

    /// Cells to highlight for the current mode.
    pub fn highlighted(&self, engine: &BattleEngine<'_>) -> Vec<GridPos> {
        match self {
            Session::Idle => Vec::new(),
            Session::Moving { reachable, .. } => reachable.cells().collect(),
            Session::Attacking { targets, .. } => targets
                .iter()
                .filter_map(|&id| engine.state().unit(id).and_then(|u| u.position))
                .collect(),
            Session::Casting { targets, .. } => targets.clone(),
        }
    }
}

/// What handling an input event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The event does not apply to the current session.
    Ignored,
    /// A unit was selected for the next mode.
    Selected(UnitId),
    /// A target was chosen and awaits confirmation.
    Pending,
    /// The intent was committed and the session closed.
    Committed(ActionOutcome),
    /// The session closed without side effects.
    Cancelled,
}

/// Owns the single interaction session and the current selection.
#[derive(Clone, Debug, Default)]
pub struct SessionController {
    selected: Option<UnitId>,
    session: Session,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// Starts movement mode for the selected unit.
    pub fn begin_move(&mut self, engine: &BattleEngine<'_>) -> Result<(), ActionError> {
        let unit = self.actor(engine)?;
        let reachable = engine
            .reachable(unit)
            .ok_or(ActionError::DeadUnitReference(unit))?;
        self.session = Session::Moving {
            unit,
            reachable,
            pending: None,
        };
        Ok(())
    }

    /// Starts attack mode for the selected unit.
    pub fn begin_attack(&mut self, engine: &BattleEngine<'_>) -> Result<(), ActionError> {
        let unit = self.actor(engine)?;
        self.session = Session::Attacking {
            unit,
            targets: engine.attack_targets(unit),
            pending: None,
        };
        Ok(())
    }

    /// Starts skill mode for the selected unit.
    pub fn begin_skill(
        &mut self,
        engine: &BattleEngine<'_>,
        skill: SkillId,
    ) -> Result<(), ActionError> {
        let unit = self.actor(engine)?;
        self.session = Session::Casting {
            unit,
            skill,
            targets: engine.skill_targets(unit, skill),
            pending: None,
        };
        Ok(())
    }

    /// Feeds one input event through the current session.
    ///
    /// A failed commit keeps the session open so another target can be tried.
    pub fn handle(
        &mut self,
        engine: &mut BattleEngine<'_>,
        event: InputEvent,
    ) -> Result<SessionOutcome, ActionError> {
        if self.session.unit().is_some() && self.session.unit() != engine.current_unit() {
            self.reset();
        }

        match event {
            InputEvent::Cancel => {
                let had_session = !self.session.is_idle();
                self.reset();
                Ok(if had_session {
                    SessionOutcome::Cancelled
                } else {
                    SessionOutcome::Ignored
                })
            }
            InputEvent::SelectUnit(unit) => Ok(self.select_unit(engine, unit)),
            InputEvent::SelectCell(pos) => Ok(self.select_cell(engine, pos)),
            InputEvent::Confirm => self.confirm(engine),
        }
    }

    fn actor(&self, engine: &BattleEngine<'_>) -> Result<UnitId, ActionError> {
        let unit = self
            .selected
            .or(engine.current_unit())
            .ok_or(ActionError::InvalidPhase {
                phase: engine.phase(),
            })?;
        if !engine.state().turn.is_combat() {
            return Err(ActionError::InvalidPhase {
                phase: engine.phase(),
            });
        }
        if engine.current_unit() != Some(unit) {
            return Err(ActionError::NotCurrentActor {
                unit,
                current: engine.current_unit(),
            });
        }
        Ok(unit)
    }

    fn reset(&mut self) {
        self.session = Session::Idle;
        self.selected = None;
    }

    fn select_unit(&mut self, engine: &BattleEngine<'_>, unit: UnitId) -> SessionOutcome {
        match &mut self.session {
            Session::Idle => {
                if engine.state().unit(unit).is_some_and(|u| u.is_alive()) {
                    self.selected = Some(unit);
                    SessionOutcome::Selected(unit)
                } else {
                    SessionOutcome::Ignored
                }
            }
            Session::Attacking {
                targets, pending, ..
            } if targets.contains(&unit) => {
                *pending = Some(unit);
                SessionOutcome::Pending
            }
            Session::Casting { .. } | Session::Moving { .. } => {
                match engine.state().unit(unit).and_then(|u| u.position) {
                    Some(pos) => self.select_cell(engine, pos),
                    None => SessionOutcome::Ignored,
                }
            }
            Session::Attacking { .. } => SessionOutcome::Ignored,
        }
    }

    fn select_cell(&mut self, engine: &BattleEngine<'_>, pos: GridPos) -> SessionOutcome {
        match &mut self.session {
            Session::Idle => match engine.state().grid.occupant_at(pos) {
                Some(unit) => self.select_unit(engine, unit),
                None => SessionOutcome::Ignored,
            },
            Session::Moving {
                reachable, pending, ..
            } if reachable.contains(pos) => {
                *pending = Some(pos);
                SessionOutcome::Pending
            }
            Session::Attacking {
                targets, pending, ..
            } => match engine.state().grid.occupant_at(pos) {
                Some(unit) if targets.contains(&unit) => {
                    *pending = Some(unit);
                    SessionOutcome::Pending
                }
                _ => SessionOutcome::Ignored,
            },
            Session::Casting {
                targets, pending, ..
            } if targets.contains(&pos) => {
                *pending = Some(pos);
                SessionOutcome::Pending
            }
            Session::Moving { .. } | Session::Casting { .. } => SessionOutcome::Ignored,
        }
    }

    fn confirm(&mut self, engine: &mut BattleEngine<'_>) -> Result<SessionOutcome, ActionError> {
        let result = match &self.session {
            Session::Moving {
                unit,
                pending: Some(pos),
                ..
            } => engine.request_move(*unit, *pos),
            Session::Attacking {
                unit,
                pending: Some(target),
                ..
            } => engine.request_attack(*unit, *target),
            Session::Casting {
                unit,
                skill,
                pending: Some(pos),
                ..
            } => engine.request_skill(*unit, *skill, Target::Cell(*pos)),
            _ => return Ok(SessionOutcome::Ignored),
        };

        let outcome = result?;
        self.reset();
        Ok(SessionOutcome::Committed(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{BattleEnv, SkillCatalog, Surface, Terrain};
    use crate::state::{BattleState, Cell, Faction, Stats, SurfaceId, Unit};

    fn at(x: i32, z: i32) -> GridPos {
        GridPos::new(SurfaceId(0), Cell::new(x, z))
    }

    fn battle() -> (BattleState, Terrain, SkillCatalog, BattleConfig) {
        let mut state = BattleState::new();
        let hero = Stats::new(10, 4, 0, 5).with_ap(1).with_mp(2);
        state
            .add_unit(Unit::new(UnitId(1), Faction::Player, hero))
            .unwrap();
        state
            .add_unit(Unit::new(UnitId(2), Faction::Enemy, Stats::new(10, 1, 0, 1)))
            .unwrap();
        let terrain = Terrain::new()
            .with_surface(Surface::flat(SurfaceId(0), 5, 5))
            .unwrap();
        (state, terrain, SkillCatalog::new(), BattleConfig::default())
    }

    #[test]
    fn move_mode_commits_on_confirm() {
        let (mut state, terrain, skills, config) = battle();
        let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
        engine.place_unit(UnitId(1), at(0, 0)).unwrap();
        engine.place_unit(UnitId(2), at(4, 4)).unwrap();
        engine.enter_combat().unwrap();

        let mut controller = SessionController::new();
        assert_eq!(
            controller.handle(&mut engine, InputEvent::SelectUnit(UnitId(1))),
            Ok(SessionOutcome::Selected(UnitId(1)))
        );
        controller.begin_move(&engine).unwrap();
        assert!(controller.session().highlighted(&engine).contains(&at(1, 1)));

        assert_eq!(
            controller.handle(&mut engine, InputEvent::SelectCell(at(4, 0))),
            Ok(SessionOutcome::Ignored)
        );
        assert_eq!(
            controller.handle(&mut engine, InputEvent::SelectCell(at(1, 1))),
            Ok(SessionOutcome::Pending)
        );
        assert!(matches!(
            controller.handle(&mut engine, InputEvent::Confirm),
            Ok(SessionOutcome::Committed(_))
        ));
        assert!(controller.session().is_idle());
        assert_eq!(engine.state().unit(UnitId(1)).unwrap().position, Some(at(1, 1)));
    }

    #[test]
    fn cancel_has_no_side_effects() {
        let (mut state, terrain, skills, config) = battle();
        let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
        engine.place_unit(UnitId(1), at(0, 0)).unwrap();
        engine.place_unit(UnitId(2), at(1, 0)).unwrap();
        engine.enter_combat().unwrap();
        let before = engine.state().clone();

        let mut controller = SessionController::new();
        controller.begin_attack(&engine).unwrap();
        assert_eq!(
            controller.handle(&mut engine, InputEvent::SelectUnit(UnitId(2))),
            Ok(SessionOutcome::Pending)
        );
        assert_eq!(
            controller.handle(&mut engine, InputEvent::Cancel),
            Ok(SessionOutcome::Cancelled)
        );
        assert!(controller.session().is_idle());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn modes_require_the_active_unit() {
        let (mut state, terrain, skills, config) = battle();
        let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
        engine.place_unit(UnitId(1), at(0, 0)).unwrap();
        engine.place_unit(UnitId(2), at(4, 4)).unwrap();

        let mut controller = SessionController::new();
        assert!(matches!(
            controller.begin_move(&engine),
            Err(ActionError::InvalidPhase { .. })
        ));

        engine.enter_combat().unwrap();
        controller
            .handle(&mut engine, InputEvent::SelectUnit(UnitId(2)))
            .unwrap();
        assert_eq!(
            controller.begin_attack(&engine),
            Err(ActionError::NotCurrentActor {
                unit: UnitId(2),
                current: Some(UnitId(1)),
            })
        );
    }
}
