use crate::action::{
    ActionError, ActionOutcome, ActionTransition, HpChange, Resource, Target, apply_hp_change,
    check_occupancy, living_unit, placed,
};
use crate::combat::{self, SkillImpact};
use crate::env::{BattleEnv, SkillDefinition, SkillId, TargetKind, TerrainOracle};
use crate::state::{BattleState, CardinalDirection, GridPos, Unit, UnitId};

/// Cast a catalog skill from the actor's loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillAction {
    pub actor: UnitId,
    pub skill: SkillId,
    pub target: Target,
}

/// Fully validated cast, computed against the pre-mutation state.
struct CastPlan<'a> {
    skill: &'a SkillDefinition,
    origin: GridPos,
    /// Charge relocation; `None` when the caster stays put.
    charge_to: Option<GridPos>,
    affected: Vec<(UnitId, HpChange)>,
}

impl SkillAction {
    pub fn new(actor: UnitId, skill: SkillId, target: Target) -> Self {
        Self {
            actor,
            skill,
            target,
        }
    }

    fn plan<'a>(
        &self,
        state: &BattleState,
        env: &BattleEnv<'a>,
    ) -> Result<CastPlan<'a>, ActionError> {
        let caster = living_unit(state, self.actor)?;
        let origin = placed(caster)?;

        let skill = env
            .skills()
            .skill(self.skill)
            .filter(|_| caster.knows_skill(self.skill))
            .ok_or(ActionError::UnknownSkill {
                unit: self.actor,
                skill: self.skill,
            })?;

        if caster.stats.current_ap < skill.ap_cost {
            return Err(ActionError::InsufficientResource {
                resource: Resource::ActionPoints,
                required: skill.ap_cost,
                available: caster.stats.current_ap,
            });
        }

        let (cell, unit_target) = self.resolve_target(state, env.terrain(), caster, skill.target)?;

        let distance = origin.manhattan(cell);
        if distance.is_none_or(|d| d > skill.range) {
            return Err(ActionError::OutOfRange {
                distance,
                range: skill.range,
            });
        }

        let change = match combat::skill_impact(skill, &caster.stats) {
            SkillImpact::Damage(amount) => Some(HpChange::Damage(amount)),
            SkillImpact::Heal(amount) => Some(HpChange::Heal(amount)),
            SkillImpact::Nothing => None,
        };

        let affected = match (skill.target, change) {
            (_, None) => Vec::new(),
            (TargetKind::Area, Some(change)) => {
                area_units(state, caster, cell, skill.area_radius, change)
                    .map(|unit| (unit, change))
                    .collect()
            }
            (_, Some(change)) => unit_target.map(|u| (u.id, change)).into_iter().collect(),
        };

        let charge_to = if skill.is_charge() {
            let target = unit_target
                .filter(|u| u.id != caster.id)
                .ok_or(ActionError::InvalidTarget(self.target))?;
            match charge_destination(state, env.terrain(), caster.id, origin, cell) {
                Some(dest) if dest == origin => None,
                Some(dest) => Some(dest),
                None if env.config().charge_requires_destination => {
                    return Err(ActionError::NoLegalDestination { target: target.id });
                }
                None => None,
            }
        } else {
            None
        };

        Ok(CastPlan {
            skill,
            origin,
            charge_to,
            affected,
        })
    }

    /// Resolves the target into a cell and, where present, the unit on it,
    /// checking both against the skill's target kind.
    fn resolve_target<'s>(
        &self,
        state: &'s BattleState,
        terrain: &dyn TerrainOracle,
        caster: &Unit,
        kind: TargetKind,
    ) -> Result<(GridPos, Option<&'s Unit>), ActionError> {
        let invalid = ActionError::InvalidTarget(self.target);

        let (cell, unit) = match self.target {
            Target::Unit(id) => {
                let unit = living_unit(state, id)?;
                (placed(unit)?, Some(unit))
            }
            Target::Cell(pos) => (pos, state.occupant_at(pos)),
        };

        if !kind.requires_unit() {
            return if terrain.has_ground(cell) {
                Ok((cell, unit))
            } else {
                Err(invalid)
            };
        }

        let Some(unit) = unit else {
            return Err(invalid);
        };
        let legal = match kind {
            TargetKind::Enemy => caster.faction.is_hostile_to(unit.faction),
            TargetKind::Ally => !caster.faction.is_hostile_to(unit.faction),
            TargetKind::AnyUnit => true,
            TargetKind::SelfOnly => unit.id == caster.id,
            TargetKind::Ground | TargetKind::Area => true,
        };
        if legal { Ok((cell, Some(unit))) } else { Err(invalid) }
    }
}

/// Living units within `radius` of `center` that an area `change` applies to:
/// hostiles for damage, the caster's side for healing.
fn area_units<'s>(
    state: &'s BattleState,
    caster: &'s Unit,
    center: GridPos,
    radius: u32,
    change: HpChange,
) -> impl Iterator<Item = UnitId> + 's {
    state
        .units()
        .iter()
        .filter(|u| u.is_alive())
        .filter(move |u| match change {
            HpChange::Damage(_) => caster.faction.is_hostile_to(u.faction),
            HpChange::Heal(_) => !caster.faction.is_hostile_to(u.faction),
        })
        .filter(move |u| {
            u.position
                .and_then(|pos| pos.manhattan(center))
                .is_some_and(|d| d <= radius)
        })
        .map(|u| u.id)
}

/// Cell a charging unit ends up on next to `target`.
///
/// Prefers the neighbour on the side facing the caster, then the orthogonal
/// neighbours in [`CardinalDirection::ALL`] order. A cell qualifies when it
/// is on the grid, has ground, and is empty or already holds the caster.
pub fn charge_destination(
    state: &BattleState,
    terrain: &dyn TerrainOracle,
    caster: UnitId,
    origin: GridPos,
    target: GridPos,
) -> Option<GridPos> {
    let free = |pos: GridPos| {
        terrain.is_within_bounds(pos)
            && terrain.has_ground(pos)
            && state.grid.occupant_at(pos).is_none_or(|id| id == caster)
    };

    let facing = (origin.surface == target.surface)
        .then(|| target.with_cell(target.cell.adjacent_toward(origin.cell)));
    let fallback = CardinalDirection::ALL
        .iter()
        .map(|dir| target.with_cell(dir.step(target.cell)));

    facing.into_iter().chain(fallback).find(|&pos| free(pos))
}

impl ActionTransition for SkillAction {
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
        let plan = self.plan(state, env)?;

        let caster = state
            .unit_mut(self.actor)
            .ok_or_else(|| ActionError::desync(self.actor))?;
        caster.stats.current_ap -= plan.skill.ap_cost;

        // Relocation commits before any damage lands.
        let path = match plan.charge_to {
            Some(dest) => {
                state
                    .place(self.actor, dest)
                    .map_err(|_| ActionError::desync(self.actor))?;
                Some(vec![plan.origin, dest])
            }
            None => None,
        };

        let mut effects = Vec::with_capacity(plan.affected.len());
        for (unit, change) in plan.affected {
            effects.push(apply_hp_change(state, unit, change)?);
        }

        Ok(ActionOutcome { path, effects })
    }

    fn post_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        check_occupancy(state, self.actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{SkillCatalog, SkillEffect, Surface, Terrain};
    use crate::state::{Cell, Faction, Stats, SurfaceId};

    const BOLT: SkillId = SkillId(1);
    const MEND: SkillId = SkillId(2);
    const BLAST: SkillId = SkillId(3);
    const RUSH: SkillId = SkillId(4);

    fn at(x: i32, z: i32) -> GridPos {
        GridPos::new(SurfaceId(0), Cell::new(x, z))
    }

    fn catalog() -> SkillCatalog {
        SkillCatalog::from_definitions([
            SkillDefinition::new(BOLT, "bolt", TargetKind::Enemy)
                .with_range(3)
                .with_cost(1)
                .with_damage(5.0, 1.0),
            SkillDefinition::new(MEND, "mend", TargetKind::Ally)
                .with_range(2)
                .with_cost(1)
                .with_healing(6),
            SkillDefinition::new(BLAST, "blast", TargetKind::Area)
                .with_range(4)
                .with_cost(2)
                .with_damage(3.0, 0.0)
                .with_radius(1),
            SkillDefinition::new(RUSH, "rush", TargetKind::Enemy)
                .with_range(4)
                .with_cost(1)
                .with_damage(2.0, 0.5)
                .with_effect(SkillEffect::Charge),
        ])
        .unwrap()
    }

    struct Fixture {
        state: BattleState,
        terrain: Terrain,
        skills: SkillCatalog,
        config: BattleConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut state = BattleState::new();
            let caster = Stats::new(20, 8, 0, 3).with_ap(5).with_mp(3);
            state
                .add_unit(
                    Unit::new(UnitId(1), Faction::Player, caster)
                        .with_skills([BOLT, MEND, BLAST, RUSH]),
                )
                .unwrap();
            state
                .add_unit(Unit::new(UnitId(2), Faction::Enemy, Stats::new(30, 1, 5, 1)))
                .unwrap();
            state
                .add_unit(Unit::new(UnitId(3), Faction::Enemy, Stats::new(30, 1, 0, 1)))
                .unwrap();
            state.place(UnitId(1), at(0, 0)).unwrap();
            state.place(UnitId(2), at(2, 0)).unwrap();
            state.place(UnitId(3), at(3, 0)).unwrap();
            Self {
                state,
                terrain: Terrain::new()
                    .with_surface(Surface::flat(SurfaceId(0), 6, 6))
                    .unwrap(),
                skills: catalog(),
                config: BattleConfig::default(),
            }
        }

        fn cast(&mut self, skill: SkillId, target: Target) -> Result<ActionOutcome, ActionError> {
            let env = BattleEnv::new(&self.terrain, &self.skills, &self.config);
            let action = SkillAction::new(UnitId(1), skill, target);
            action.pre_validate(&self.state, &env)?;
            let outcome = action.apply(&mut self.state, &env)?;
            action.post_validate(&self.state, &env)?;
            Ok(outcome)
        }

        fn hp(&self, unit: u32) -> u32 {
            self.state.unit(UnitId(unit)).unwrap().stats.current_hp
        }
    }

    #[test]
    fn damage_skill_ignores_defense_and_spends_ap() {
        let mut fx = Fixture::new();
        let outcome = fx.cast(BOLT, Target::Unit(UnitId(2))).unwrap();
        assert_eq!(outcome.effects[0].change, HpChange::Damage(13));
        assert_eq!(fx.hp(2), 17);
        assert_eq!(fx.state.unit(UnitId(1)).unwrap().stats.current_ap, 4);
    }

    #[test]
    fn cell_target_resolves_to_its_occupant() {
        let mut fx = Fixture::new();
        fx.cast(BOLT, Target::Cell(at(3, 0))).unwrap();
        assert_eq!(fx.hp(3), 17);
        assert_eq!(
            fx.cast(BOLT, Target::Cell(at(1, 1))).unwrap_err(),
            ActionError::InvalidTarget(Target::Cell(at(1, 1)))
        );
    }

    #[test]
    fn heal_is_capped_and_wrong_side_is_rejected() {
        let mut fx = Fixture::new();
        fx.state.unit_mut(UnitId(1)).unwrap().stats.current_hp = 17;
        let outcome = fx.cast(MEND, Target::Unit(UnitId(1))).unwrap();
        assert_eq!(outcome.effects[0].change, HpChange::Heal(3));
        assert_eq!(fx.hp(1), 20);

        assert_eq!(
            fx.cast(MEND, Target::Unit(UnitId(2))).unwrap_err(),
            ActionError::InvalidTarget(Target::Unit(UnitId(2)))
        );
    }

    #[test]
    fn failed_cast_leaves_state_untouched() {
        let mut fx = Fixture::new();
        fx.state.unit_mut(UnitId(1)).unwrap().stats.current_ap = 0;
        let before = fx.state.clone();
        assert!(matches!(
            fx.cast(BOLT, Target::Unit(UnitId(2))),
            Err(ActionError::InsufficientResource {
                resource: Resource::ActionPoints,
                ..
            })
        ));
        assert_eq!(fx.state, before);
    }

    #[test]
    fn unknown_or_unlearned_skills_are_rejected() {
        let mut fx = Fixture::new();
        fx.state.unit_mut(UnitId(1)).unwrap().skills.clear();
        assert_eq!(
            fx.cast(BOLT, Target::Unit(UnitId(2))).unwrap_err(),
            ActionError::UnknownSkill {
                unit: UnitId(1),
                skill: BOLT,
            }
        );
    }

    #[test]
    fn area_hits_every_hostile_in_radius() {
        let mut fx = Fixture::new();
        let outcome = fx.cast(BLAST, Target::Cell(at(2, 1))).unwrap();
        let hit: Vec<_> = outcome.effects.iter().map(|e| e.unit).collect();
        assert_eq!(hit, vec![UnitId(2)]);

        let outcome = fx.cast(BLAST, Target::Cell(at(3, 0))).unwrap();
        let hit: Vec<_> = outcome.effects.iter().map(|e| e.unit).collect();
        assert_eq!(hit, vec![UnitId(2), UnitId(3)]);
        assert_eq!(fx.hp(1), 20, "caster is never caught in its own blast");
    }

    #[test]
    fn charge_lands_on_facing_side_then_strikes() {
        let mut fx = Fixture::new();
        let outcome = fx.cast(RUSH, Target::Unit(UnitId(2))).unwrap();
        assert_eq!(outcome.path, Some(vec![at(0, 0), at(1, 0)]));
        assert_eq!(fx.state.unit(UnitId(1)).unwrap().position, Some(at(1, 0)));
        // round(2 + 8 * 0.5)
        assert_eq!(fx.hp(2), 24);
    }

    #[test]
    fn charge_without_room_strikes_in_place_unless_strict() {
        let mut fx = Fixture::new();
        // Surround the target at (2,0) from every side the caster could land on.
        for (id, cell) in [(10, at(1, 0)), (11, at(2, 1)), (12, at(1, 1))] {
            fx.state
                .add_unit(Unit::new(UnitId(id), Faction::Enemy, Stats::default()))
                .unwrap();
            fx.state.place(UnitId(id), cell).unwrap();
        }
        // (3,0) holds unit 3 and (2,-1) is off the grid.
        fx.config = BattleConfig::default().with_strict_charge(true);
        let before = fx.state.clone();
        assert_eq!(
            fx.cast(RUSH, Target::Unit(UnitId(2))).unwrap_err(),
            ActionError::NoLegalDestination { target: UnitId(2) }
        );
        assert_eq!(fx.state, before);

        fx.config = BattleConfig::default();
        let outcome = fx.cast(RUSH, Target::Unit(UnitId(2))).unwrap();
        assert_eq!(outcome.path, None);
        assert_eq!(fx.state.unit(UnitId(1)).unwrap().position, Some(at(0, 0)));
        assert_eq!(fx.hp(2), 24);
    }
}
