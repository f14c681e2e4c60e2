mod common;

use common::*;
use tactics_core::{
    ActionError, BattleEngine, BattleEnv, BattleEvent, BattlePhase, BattleResult, BattleState,
    Cell, Decision, Faction, ManualPolicy, NearestTargetPolicy, Resource, Stats, Surface, SurfaceId, Target,
    Terrain, TurnError, TurnPolicy, Unit, UnitId,
};

fn start<'a>(engine: &mut BattleEngine<'a>, placements: &[(u32, (i32, i32))]) {
    for &(id, (x, z)) in placements {
        engine.place_unit(UnitId(id), at(x, z)).unwrap();
    }
    engine.enter_combat().unwrap();
}

#[test]
fn heavy_armour_takes_minimum_damage() {
    init_tracing();
    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(20, 10, 0, 3)),
        Unit::new(UnitId(2), Faction::Enemy, Stats::new(20, 1, 12, 1)),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (1, 0))]);

    engine.request_attack(UnitId(1), UnitId(2)).unwrap();

    assert_eq!(engine.state().unit(UnitId(2)).unwrap().stats.current_hp, 19);
    assert!(engine.events().contains(&BattleEvent::UnitDamaged {
        unit: UnitId(2),
        amount: 1,
        source: UnitId(1),
    }));
}

#[test]
fn player_wins_speed_ties() {
    let mut state = roster([
        fighter(2, Faction::Enemy, 3, 5, 3),
        fighter(1, Faction::Player, 3, 5, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config().with_faction_bias(0.1));
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (3, 3))]);

    assert_eq!(engine.current_unit(), Some(UnitId(1)));
    assert_eq!(engine.state().turn.order, vec![UnitId(1), UnitId(2)]);
    let events = engine.take_events();
    assert!(events.ends_with(&[
        BattleEvent::PhaseChanged {
            phase: BattlePhase::Combat,
        },
        BattleEvent::TurnStarted { unit: UnitId(1) },
    ]));
}

#[test]
fn skill_damage_adds_scaled_attack() {
    let mut state = roster([
        fighter(1, Faction::Player, 8, 5, 3),
        fighter(2, Faction::Enemy, 1, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (2, 2))]);

    let outcome = engine
        .request_skill(UnitId(1), BOLT, Target::Unit(UnitId(2)))
        .unwrap();

    assert_eq!(outcome.effects.len(), 1);
    assert_eq!(engine.state().unit(UnitId(2)).unwrap().stats.current_hp, 37);
    let caster = engine.state().unit(UnitId(1)).unwrap();
    assert_eq!(caster.stats.current_ap, 1);
}

#[test]
fn charge_relocates_to_only_free_side_then_strikes() {
    // Diagonals around the target at (2,2) are holes.
    let mut surface = Surface::flat(SurfaceId(0), 5, 5);
    for (x, z) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
        surface.set_height(Cell::new(x, z), None).unwrap();
    }
    let terrain = Terrain::new().with_surface(surface).unwrap();
    let (skills, config) = (skills(), config());

    let mut state = roster([
        fighter(1, Faction::Player, 6, 9, 0),
        fighter(2, Faction::Enemy, 1, 1, 0),
        fighter(3, Faction::Player, 1, 1, 0),
        fighter(4, Faction::Player, 1, 1, 0),
        fighter(5, Faction::Player, 1, 1, 0),
    ]);
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(
        &mut engine,
        &[(1, (2, 4)), (2, (2, 2)), (3, (2, 3)), (4, (1, 2)), (5, (3, 2))],
    );
    engine.take_events();

    let outcome = engine
        .request_skill(UnitId(1), RUSH, Target::Unit(UnitId(2)))
        .unwrap();

    assert_eq!(outcome.path, Some(vec![at(2, 4), at(2, 1)]));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().position, Some(at(2, 1)));
    assert_eq!(engine.state().grid.occupant_at(at(2, 4)), None);
    assert_eq!(
        engine.take_events(),
        vec![
            BattleEvent::UnitMoved {
                unit: UnitId(1),
                path: vec![at(2, 4), at(2, 1)],
            },
            BattleEvent::UnitDamaged {
                unit: UnitId(2),
                amount: 6,
                source: UnitId(1),
            },
        ]
    );
    assert!(engine.state().occupancy_consistent());
}

#[test]
fn move_beyond_move_points_changes_nothing() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (5, 5))]);
    engine.take_events();
    let before = engine.state().clone();

    let err = engine.request_move(UnitId(1), at(3, 1)).unwrap_err();

    assert_eq!(
        err,
        ActionError::InsufficientResource {
            resource: Resource::MovePoints,
            required: 4,
            available: 3,
        }
    );
    assert_eq!(engine.state(), &before);
    assert!(engine.events().is_empty());
}

#[test]
fn move_far_off_the_grid_is_rejected() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (3, 3))]);
    let before = engine.state().clone();

    for far in [at(i32::MIN, i32::MIN), at(i32::MAX, 0), at(0, 4)] {
        assert_eq!(
            engine.request_move(UnitId(1), far),
            Err(ActionError::OccupiedOrBlocked(far))
        );
    }
    assert_eq!(engine.state(), &before);
}

#[test]
fn allies_wall_off_a_corridor() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Player, 3, 4, 3),
        fighter(3, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 1), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (1, 0)), (3, (3, 0))]);

    let reachable = engine.reachable(UnitId(1)).unwrap();
    assert!(reachable.is_empty());
    assert_eq!(
        engine.request_move(UnitId(1), at(2, 0)),
        Err(ActionError::OccupiedOrBlocked(at(2, 0)))
    );
}

#[test]
fn move_emits_path_and_spends_points() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (5, 5))]);

    let reachable = engine.reachable(UnitId(1)).unwrap();
    assert!(reachable.contains(at(2, 1)));
    assert!(!reachable.contains(at(2, 2)));

    let outcome = engine.request_move(UnitId(1), at(2, 1)).unwrap();
    let path = outcome.path.unwrap();
    assert_eq!(path.first(), Some(&at(0, 0)));
    assert_eq!(path.last(), Some(&at(2, 1)));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().stats.current_mp, 0);
    assert_eq!(engine.state().grid.cells_holding(UnitId(1)), 1);
}

#[test]
fn last_enemy_down_ends_battle_once() {
    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(20, 10, 0, 3).with_mp(2)),
        Unit::new(UnitId(2), Faction::Enemy, Stats::new(5, 1, 0, 1)),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (0, 1))]);

    engine.request_attack(UnitId(1), UnitId(2)).unwrap();

    let events = engine.take_events();
    let ended: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, BattleEvent::BattleEnded { .. }))
        .collect();
    assert_eq!(
        ended,
        vec![&BattleEvent::BattleEnded {
            result: BattleResult::Victory,
        }]
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == BattleEvent::UnitDefeated { unit: UnitId(2) })
            .count(),
        1
    );
    assert_eq!(engine.phase(), BattlePhase::BattleEnd);
    assert_eq!(engine.state().turn.result, Some(BattleResult::Victory));
    assert_eq!(engine.state().grid.occupant_at(at(0, 1)), None);

    let invalid = ActionError::InvalidPhase {
        phase: BattlePhase::BattleEnd,
    };
    assert_eq!(engine.request_move(UnitId(1), at(1, 0)), Err(invalid.clone()));
    assert_eq!(engine.request_attack(UnitId(1), UnitId(2)), Err(invalid));
    assert_eq!(
        engine.end_turn(),
        Err(TurnError::InvalidPhase {
            phase: BattlePhase::BattleEnd,
        })
    );
    assert!(engine.take_events().is_empty());
}

#[test]
fn end_turn_hands_over_with_full_resources() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 3, 3),
        fighter(2, Faction::Enemy, 3, 2, 3),
        fighter(3, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(8, 8), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&ManualPolicy);
    start(&mut engine, &[(1, (0, 0)), (2, (3, 3)), (3, (7, 7))]);

    engine.request_move(UnitId(1), at(1, 1)).unwrap();
    engine
        .request_skill(UnitId(1), BOLT, Target::Unit(UnitId(2)))
        .unwrap();
    engine.take_events();

    for expected in [2, 3, 1, 2] {
        engine.end_turn().unwrap();
        let current = engine.state().current_unit().unwrap();
        assert_eq!(current.id, UnitId(expected));
        assert_eq!(current.stats.current_ap, current.stats.max_ap);
        assert_eq!(current.stats.current_mp, current.stats.max_mp);
        assert!(!current.has_attacked);
    }

    let events = engine.take_events();
    assert_eq!(events[0], BattleEvent::TurnEnded { unit: UnitId(1) });
    assert_eq!(events[1], BattleEvent::TurnStarted { unit: UnitId(2) });
    assert_eq!(engine.state().turn.turn_count, 4);
}

#[test]
fn defeated_unit_leaves_the_rotation() {
    let mut state = roster([
        fighter(1, Faction::Player, 8, 9, 3),
        Unit::new(UnitId(2), Faction::Enemy, Stats::new(10, 1, 0, 5)),
        fighter(3, Faction::Enemy, 1, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(8, 8), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&ManualPolicy);
    start(&mut engine, &[(1, (0, 0)), (2, (2, 0)), (3, (7, 7))]);
    assert_eq!(
        engine.state().turn.order,
        vec![UnitId(1), UnitId(2), UnitId(3)]
    );

    engine
        .request_skill(UnitId(1), BOLT, Target::Unit(UnitId(2)))
        .unwrap();
    assert_eq!(engine.state().turn.order, vec![UnitId(1), UnitId(3)]);
    assert_eq!(engine.phase(), BattlePhase::Combat);

    engine.end_turn().unwrap();
    assert_eq!(engine.current_unit(), Some(UnitId(3)));
    engine.end_turn().unwrap();
    assert_eq!(engine.current_unit(), Some(UnitId(1)));
}

#[test]
fn intents_from_inactive_units_are_rejected() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));

    engine.place_unit(UnitId(1), at(0, 0)).unwrap();
    engine.place_unit(UnitId(2), at(1, 0)).unwrap();
    assert_eq!(
        engine.request_attack(UnitId(1), UnitId(2)),
        Err(ActionError::InvalidPhase {
            phase: BattlePhase::Placement,
        })
    );
    engine.enter_combat().unwrap();

    assert_eq!(
        engine.request_attack(UnitId(2), UnitId(1)),
        Err(ActionError::NotCurrentActor {
            unit: UnitId(2),
            current: Some(UnitId(1)),
        })
    );
    assert_eq!(
        engine.request_move(UnitId(9), at(2, 2)),
        Err(ActionError::DeadUnitReference(UnitId(9)))
    );
}

#[test]
fn exhausted_unit_ends_its_turn_automatically() {
    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(20, 2, 0, 3)),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&ManualPolicy);
    start(&mut engine, &[(1, (0, 0)), (2, (1, 0))]);

    engine.request_attack(UnitId(1), UnitId(2)).unwrap();
    assert_eq!(engine.current_unit(), Some(UnitId(2)));

    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(20, 2, 0, 3)),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let config = common::config().with_auto_end_turn(false);
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (1, 0))]);

    engine.request_attack(UnitId(1), UnitId(2)).unwrap();
    assert_eq!(engine.current_unit(), Some(UnitId(1)));
}

#[test]
fn enemy_policy_attacks_adjacent_player() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 4, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let policy = NearestTargetPolicy::default();
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&policy);
    start(&mut engine, &[(1, (0, 0)), (2, (1, 0))]);
    engine.take_events();

    engine.end_turn().unwrap();

    assert_eq!(engine.current_unit(), Some(UnitId(1)));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().stats.current_hp, 46);
    assert_eq!(
        engine.take_events(),
        vec![
            BattleEvent::TurnEnded { unit: UnitId(1) },
            BattleEvent::TurnStarted { unit: UnitId(2) },
            BattleEvent::UnitDamaged {
                unit: UnitId(1),
                amount: 4,
                source: UnitId(2),
            },
            BattleEvent::TurnEnded { unit: UnitId(2) },
            BattleEvent::TurnStarted { unit: UnitId(1) },
        ]
    );
}

#[test]
fn default_engine_plays_enemy_turns() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(3, Faction::Enemy, 4, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (3, (0, 1))]);

    engine.end_turn().unwrap();

    assert_eq!(engine.current_unit(), Some(UnitId(1)));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().stats.current_hp, 46);
    assert_eq!(engine.state().turn.turn_count, 2);
}

#[test]
fn enemy_policy_passes_when_far_and_can_win() {
    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(3, 1, 0, 5)),
        fighter(2, Faction::Enemy, 5, 1, 3),
        fighter(3, Faction::Enemy, 5, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(8, 8), skills(), config());
    let policy = NearestTargetPolicy::default();
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&policy);
    start(&mut engine, &[(1, (0, 0)), (2, (7, 7)), (3, (0, 3))]);

    // Unit 2 is far away; unit 3 is three cells off, beyond 1 * 2.
    engine.end_turn().unwrap();
    assert_eq!(engine.current_unit(), Some(UnitId(1)));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().stats.current_hp, 3);

    assert!(
        !engine
            .take_events()
            .iter()
            .any(|e| matches!(e, BattleEvent::UnitDamaged { .. }))
    );

    // Close the gap: unit 3 now attacks from (0,3) and wins.
    let mut state = roster([
        Unit::new(UnitId(1), Faction::Player, Stats::new(3, 1, 0, 5)),
        fighter(3, Faction::Enemy, 5, 1, 3),
    ]);
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&policy);
    start(&mut engine, &[(1, (0, 2)), (3, (0, 3))]);
    engine.end_turn().unwrap();

    assert_eq!(engine.phase(), BattlePhase::BattleEnd);
    assert_eq!(engine.state().turn.result, Some(BattleResult::Defeat));
}

#[test]
fn enemy_policy_forfeits_when_approximation_misses() {
    // Diagonal distance sqrt(2) passes the policy check but Manhattan 2 > range 1.
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 4, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let policy = NearestTargetPolicy::default();
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&policy);
    start(&mut engine, &[(1, (0, 0)), (2, (1, 1))]);
    let before = engine.state().unit(UnitId(1)).unwrap().stats;

    engine.end_turn().unwrap();

    assert_eq!(engine.current_unit(), Some(UnitId(1)));
    assert_eq!(engine.state().unit(UnitId(1)).unwrap().stats.current_hp, before.current_hp);
}

struct AutoplayEverything;

impl TurnPolicy for AutoplayEverything {
    fn controls(&self, _unit: &Unit) -> bool {
        true
    }

    fn decide(&self, _: &BattleState, _: &BattleEnv<'_>, _: UnitId) -> Decision {
        Decision::Pass
    }
}

#[test]
fn automation_pauses_after_one_rotation() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let policy = AutoplayEverything;
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config))
        .with_policy(&policy);
    start(&mut engine, &[(1, (0, 0)), (2, (3, 3))]);

    assert_eq!(engine.phase(), BattlePhase::Combat);
    assert_eq!(engine.state().turn.turn_count, 2);
    assert_eq!(engine.current_unit(), Some(UnitId(1)));
}

#[test]
fn placement_rules() {
    let mut surface = Surface::flat(SurfaceId(0), 3, 3);
    surface.set_height(Cell::new(1, 1), None).unwrap();
    let terrain = Terrain::new().with_surface(surface).unwrap();
    let (skills, config) = (skills(), config());
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
    ]);
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));

    assert_eq!(engine.enter_combat(), Err(TurnError::Unplaced(UnitId(1))));
    assert_eq!(
        engine.place_unit(UnitId(1), at(1, 1)),
        Err(ActionError::OccupiedOrBlocked(at(1, 1)))
    );
    assert_eq!(
        engine.place_unit(UnitId(1), at(5, 0)),
        Err(ActionError::OccupiedOrBlocked(at(5, 0)))
    );
    engine.place_unit(UnitId(1), at(0, 0)).unwrap();
    assert_eq!(
        engine.place_unit(UnitId(2), at(0, 0)),
        Err(ActionError::OccupiedOrBlocked(at(0, 0)))
    );
    engine.place_unit(UnitId(2), at(2, 2)).unwrap();
    engine.place_unit(UnitId(1), at(2, 0)).unwrap();
    assert_eq!(engine.state().grid.occupant_at(at(0, 0)), None);

    engine.enter_combat().unwrap();
    assert_eq!(
        engine.enter_combat(),
        Err(TurnError::InvalidPhase {
            phase: BattlePhase::Combat,
        })
    );
    assert_eq!(
        engine.place_unit(UnitId(1), at(0, 0)),
        Err(ActionError::InvalidPhase {
            phase: BattlePhase::Combat,
        })
    );
}

#[test]
fn empty_side_ends_battle_on_entry() {
    let mut state = roster([fighter(1, Faction::Player, 3, 5, 3)]);
    let (terrain, skills, config) = (flat(4, 4), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    engine.place_unit(UnitId(1), at(0, 0)).unwrap();
    engine.enter_combat().unwrap();

    assert_eq!(engine.phase(), BattlePhase::BattleEnd);
    assert_eq!(engine.state().turn.result, Some(BattleResult::Victory));

    let mut empty = BattleState::new();
    let mut engine = BattleEngine::new(&mut empty, BattleEnv::new(&terrain, &skills, &config));
    assert_eq!(engine.enter_combat(), Err(TurnError::NoUnits));
}

#[test]
fn healing_skill_targets_allies() {
    let mut state = roster([
        fighter(1, Faction::Player, 3, 5, 3),
        fighter(2, Faction::Enemy, 3, 1, 3),
        fighter(3, Faction::Player, 3, 1, 3),
    ]);
    let (terrain, skills, config) = (flat(6, 6), skills(), config());
    let mut engine = BattleEngine::new(&mut state, BattleEnv::new(&terrain, &skills, &config));
    start(&mut engine, &[(1, (0, 0)), (2, (5, 5)), (3, (0, 2))]);

    assert_eq!(engine.skill_targets(UnitId(1), MEND), vec![at(0, 0), at(0, 2)]);
    assert_eq!(
        engine.request_skill(UnitId(1), MEND, Target::Unit(UnitId(2))),
        Err(ActionError::InvalidTarget(Target::Unit(UnitId(2))))
    );

    engine.take_events();
    engine
        .request_skill(UnitId(1), MEND, Target::Cell(at(0, 2)))
        .unwrap();
    // Already at full HP: nothing to restore.
    assert_eq!(
        engine.take_events(),
        vec![BattleEvent::UnitHealed {
            unit: UnitId(3),
            amount: 0,
            source: UnitId(1),
        }]
    );
}
