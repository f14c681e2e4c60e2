use crate::action::{
    ActionError, ActionOutcome, ActionTransition, HpChange, Resource, Target, apply_hp_change,
    check_occupancy, living_unit, placed,
};
use crate::combat;
use crate::env::BattleEnv;
use crate::state::{BattleState, UnitId};

/// Basic attack against a hostile unit within the attacker's range.
///
/// Costs no AP or MP; each unit gets one per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: UnitId,
    pub target: UnitId,
}

impl AttackAction {
    pub fn new(actor: UnitId, target: UnitId) -> Self {
        Self { actor, target }
    }

    fn damage(&self, state: &BattleState) -> Result<u32, ActionError> {
        let attacker = living_unit(state, self.actor)?;
        let target = living_unit(state, self.target)?;
        if self.actor == self.target || !attacker.faction.is_hostile_to(target.faction) {
            return Err(ActionError::InvalidTarget(Target::Unit(self.target)));
        }

        let distance = placed(attacker)?.manhattan(placed(target)?);
        let range = attacker.stats.attack_range;
        if distance.is_none_or(|d| d > range) {
            return Err(ActionError::OutOfRange { distance, range });
        }

        if attacker.has_attacked {
            return Err(ActionError::InsufficientResource {
                resource: Resource::Attack,
                required: 1,
                available: 0,
            });
        }

        Ok(combat::basic_attack_damage(&attacker.stats, &target.stats))
    }
}

impl ActionTransition for AttackAction {
    type Error = ActionError;
    type Result = ActionOutcome;

    fn actor(&self) -> UnitId {
        self.actor
    }

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        self.damage(state).map(|_| ())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _env: &BattleEnv<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let damage = self.damage(state)?;
        if let Some(attacker) = state.unit_mut(self.actor) {
            attacker.has_attacked = true;
        }
        let effect = apply_hp_change(state, self.target, HpChange::Damage(damage))?;

        Ok(ActionOutcome {
            path: None,
            effects: vec![effect],
        })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        check_occupancy(state, self.actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{SkillCatalog, Terrain};
    use crate::state::{Cell, Faction, GridPos, Stats, SurfaceId, Unit};

    fn at(x: i32, z: i32) -> GridPos {
        GridPos::new(SurfaceId(0), Cell::new(x, z))
    }

    fn duel(attack: i32, defense: i32, target_hp: u32) -> BattleState {
        let mut state = BattleState::new();
        state
            .add_unit(Unit::new(UnitId(1), Faction::Player, Stats::new(10, attack, 0, 1)))
            .unwrap();
        state
            .add_unit(Unit::new(UnitId(2), Faction::Enemy, Stats::new(target_hp, 1, defense, 1)))
            .unwrap();
        state
            .add_unit(Unit::new(UnitId(3), Faction::Player, Stats::default()))
            .unwrap();
        state.place(UnitId(1), at(0, 0)).unwrap();
        state.place(UnitId(2), at(1, 0)).unwrap();
        state.place(UnitId(3), at(0, 1)).unwrap();
        state
    }

    fn run(state: &mut BattleState, action: AttackAction) -> Result<ActionOutcome, ActionError> {
        let terrain = Terrain::new();
        let skills = SkillCatalog::new();
        let config = BattleConfig::default();
        let env = BattleEnv::new(&terrain, &skills, &config);
        action.pre_validate(state, &env)?;
        let outcome = action.apply(state, &env)?;
        action.post_validate(state, &env)?;
        Ok(outcome)
    }

    #[test]
    fn heavy_armour_still_takes_one_damage() {
        let mut state = duel(10, 12, 20);
        let outcome = run(&mut state, AttackAction::new(UnitId(1), UnitId(2))).unwrap();
        assert_eq!(outcome.effects[0].change, HpChange::Damage(1));
        assert_eq!(state.unit(UnitId(2)).unwrap().stats.current_hp, 19);
    }

    #[test]
    fn lethal_attack_removes_target_from_grid() {
        let mut state = duel(10, 0, 5);
        let outcome = run(&mut state, AttackAction::new(UnitId(1), UnitId(2))).unwrap();
        assert!(outcome.effects[0].defeated);
        assert_eq!(outcome.defeated().collect::<Vec<_>>(), vec![UnitId(2)]);
        assert_eq!(state.grid.occupant_at(at(1, 0)), None);
        assert!(state.occupancy_consistent());
    }

    #[test]
    fn allies_and_second_attacks_are_rejected() {
        let mut state = duel(2, 0, 20);
        assert_eq!(
            run(&mut state, AttackAction::new(UnitId(1), UnitId(3))),
            Err(ActionError::InvalidTarget(Target::Unit(UnitId(3))))
        );
        run(&mut state, AttackAction::new(UnitId(1), UnitId(2))).unwrap();
        assert!(matches!(
            run(&mut state, AttackAction::new(UnitId(1), UnitId(2))),
            Err(ActionError::InsufficientResource {
                resource: Resource::Attack,
                ..
            })
        ));
    }

    #[test]
    fn distant_target_is_out_of_range() {
        let mut state = duel(2, 0, 20);
        state.place(UnitId(2), at(3, 0)).unwrap();
        assert_eq!(
            run(&mut state, AttackAction::new(UnitId(1), UnitId(2))),
            Err(ActionError::OutOfRange {
                distance: Some(3),
                range: 1,
            })
        );
    }
}
