#![allow(dead_code)]

use tactics_core::{
    BattleConfig, BattleState, Cell, Faction, GridPos, SkillCatalog, SkillDefinition, SkillEffect,
    SkillId, Stats, Surface, SurfaceId, TargetKind, Terrain, Unit, UnitId,
};

pub const BOLT: SkillId = SkillId(1);
pub const RUSH: SkillId = SkillId(2);
pub const MEND: SkillId = SkillId(3);

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn at(x: i32, z: i32) -> GridPos {
    GridPos::new(SurfaceId(0), Cell::new(x, z))
}

pub fn flat(width: u32, depth: u32) -> Terrain {
    Terrain::new()
        .with_surface(Surface::flat(SurfaceId(0), width, depth))
        .expect("single surface")
}

pub fn skills() -> SkillCatalog {
    SkillCatalog::from_definitions([
        SkillDefinition::new(BOLT, "bolt", TargetKind::Enemy)
            .with_range(4)
            .with_cost(1)
            .with_damage(5.0, 1.0),
        SkillDefinition::new(RUSH, "rush", TargetKind::Enemy)
            .with_range(4)
            .with_cost(1)
            .with_damage(0.0, 1.0)
            .with_effect(SkillEffect::Charge),
        SkillDefinition::new(MEND, "mend", TargetKind::Ally)
            .with_range(3)
            .with_cost(1)
            .with_healing(5),
    ])
    .expect("unique skill ids")
}

pub fn config() -> BattleConfig {
    BattleConfig::default()
}

/// A unit with plenty of HP, 2 AP and the given MP.
pub fn fighter(id: u32, faction: Faction, attack: i32, speed: i32, mp: u32) -> Unit {
    Unit::new(
        UnitId(id),
        faction,
        Stats::new(50, attack, 0, speed).with_ap(2).with_mp(mp),
    )
    .with_skills([BOLT, RUSH, MEND])
}

pub fn roster(units: impl IntoIterator<Item = Unit>) -> BattleState {
    let mut state = BattleState::new();
    for unit in units {
        state.add_unit(unit).expect("roster fits");
    }
    state
}
