//! Legal target queries.
//!
//! These back the attack and skill selection modes: every cell or unit they
//! return passes the same validation the corresponding intent runs, so a
//! highlighted target can always be confirmed.

use crate::action::{ActionTransition, AttackAction, SkillAction, Target};
use crate::env::{BattleEnv, SkillId};
use crate::state::{BattleState, GridPos, UnitId};

/// Living units `unit` may basic-attack right now, in roster order.
pub fn attack_targets(state: &BattleState, env: &BattleEnv<'_>, unit: UnitId) -> Vec<UnitId> {
    state
        .units()
        .iter()
        .filter(|candidate| candidate.is_alive() && candidate.id != unit)
        .map(|candidate| candidate.id)
        .filter(|&target| {
            AttackAction::new(unit, target)
                .pre_validate(state, env)
                .is_ok()
        })
        .collect()
}

/// Cells `unit` may aim `skill` at right now, in row order.
///
/// Empty when the skill is unknown, unaffordable or the caster is not placed.
pub fn skill_targets(
    state: &BattleState,
    env: &BattleEnv<'_>,
    unit: UnitId,
    skill: SkillId,
) -> Vec<GridPos> {
    let Some(origin) = state.unit(unit).and_then(|u| u.position) else {
        return Vec::new();
    };
    let Some(range) = env.skills().skill(skill).map(|s| s.range) else {
        return Vec::new();
    };
    let Some(surface) = env.terrain().surface(origin.surface) else {
        return Vec::new();
    };

    surface
        .ground_cells()
        .filter(|&cell| cell.manhattan(origin.cell) <= range)
        .map(|cell| origin.with_cell(cell))
        .filter(|&pos| {
            SkillAction::new(unit, skill, Target::Cell(pos))
                .pre_validate(state, env)
                .is_ok()
        })
        .collect()
}
