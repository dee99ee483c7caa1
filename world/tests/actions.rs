use std::collections::BTreeSet;

use skirmish_core::{
    Action, ActionKind, ActionRejection, CellCoord, Command, Event, GameObjectRecord,
    GameObjectType, GameObjectTypeId, PlayerColor, PlayerId, PlayerRecord, PlayerSetup, RuleConfig,
    SavedWorld, Scenario, TypeCatalog, UsedActions,
};
use skirmish_world::{self as world, query, World};

const SOLDIER: GameObjectTypeId = GameObjectTypeId::new(1);
const BASE: GameObjectTypeId = GameObjectTypeId::new(2);
const ARTILLERY: GameObjectTypeId = GameObjectTypeId::new(3);
const RED: PlayerId = PlayerId::new(1);
const BLUE: PlayerId = PlayerId::new(2);

fn catalog() -> TypeCatalog {
    TypeCatalog::new([
        GameObjectType {
            id: SOLDIER,
            name: "Soldier".to_owned(),
            movement_radius: 1,
            attack_radius: 1,
            cost: 4,
            income_per_round: 1,
            bounty: 7,
            max_hit_points: 5,
            attack_damage: 3,
            ..GameObjectType::default()
        },
        GameObjectType {
            id: BASE,
            name: "Base".to_owned(),
            production_radius: 1,
            income_per_round: 5,
            bounty: 20,
            max_hit_points: 10,
            producible: BTreeSet::from([SOLDIER]),
            ..GameObjectType::default()
        },
        GameObjectType {
            id: ARTILLERY,
            name: "Artillery".to_owned(),
            attack_radius: 2,
            cost: 30,
            max_hit_points: 2,
            attack_damage: 10,
            ..GameObjectType::default()
        },
    ])
    .expect("valid catalog")
}

fn scenario(rules: RuleConfig) -> Scenario {
    let player = |id: PlayerId, money: u64| PlayerSetup {
        id,
        name: format!("P{}", id.get()),
        color: PlayerColor::from_rgb(0x2f, 0x95, 0x32),
        starting_money: money,
    };
    Scenario {
        columns: 5,
        rows: 5,
        seed: 1,
        rules,
        players: vec![player(RED, 10), player(BLUE, 25)],
        placements: Vec::new(),
    }
}

fn world_with(layout: &[(GameObjectTypeId, PlayerId, i32, i32)]) -> World {
    world_with_rules(RuleConfig::default(), layout)
}

fn world_with_rules(rules: RuleConfig, layout: &[(GameObjectTypeId, PlayerId, i32, i32)]) -> World {
    let catalog = catalog();
    let objects = layout
        .iter()
        .map(|&(kind, owner, x, y)| GameObjectRecord {
            kind,
            owner,
            cell: CellCoord::new(x, y),
            hit_points: catalog.get(kind).expect("known type").max_hit_points,
            used_actions: UsedActions::none(),
        })
        .collect();
    let mut world = World::new(catalog, &scenario(rules)).expect("world");
    world
        .load(&SavedWorld {
            columns: 5,
            rows: 5,
            active_player: None,
            players: Vec::new(),
            objects,
        })
        .expect("layout loads");
    world
}

fn money(world: &World, player: PlayerId) -> u64 {
    query::player(world, player).expect("player").money()
}

fn cell(x: i32, y: i32) -> CellCoord {
    CellCoord::new(x, y)
}

#[test]
fn predicates_reject_out_of_bounds_coordinates() {
    let mut world = world_with(&[(BASE, RED, 0, 0), (SOLDIER, BLUE, 1, 0)]);
    let _ = world.start_round(RED, true).expect("round starts");

    let outside = [cell(-1, 0), cell(0, -1), cell(5, 0), cell(0, 5), cell(9, 9)];
    for bad in outside {
        assert!(!world.can_move(bad, cell(0, 1)));
        assert!(!world.can_move(cell(0, 0), bad));
        assert!(!world.can_fight(bad, cell(0, 0)));
        assert!(!world.can_fight(cell(1, 0), bad));
        assert!(!world.can_produce(bad, cell(0, 1), SOLDIER));
        assert!(!world.can_produce(cell(0, 0), bad, SOLDIER));
        assert_eq!(
            world.check_move(cell(0, 0), bad),
            Err(ActionRejection::OutOfBounds)
        );
    }
}

#[test]
fn move_relocates_object_and_consumes_move() {
    let mut world = world_with(&[(SOLDIER, RED, 2, 2)]);
    let id = query::object_at(&world, cell(2, 2)).expect("soldier").id();

    let report = world.move_object(cell(2, 2), cell(3, 3)).expect("move applies");

    assert_eq!(report.object, id);
    assert!(query::object_at(&world, cell(2, 2)).is_none());
    let moved = query::object_at(&world, cell(3, 3)).expect("soldier moved");
    assert_eq!(moved.id(), id);
    assert_eq!(moved.cell(), cell(3, 3));
    assert!(moved.was_used(ActionKind::Move));
    assert!(!moved.was_used(ActionKind::Fight));

    assert_eq!(
        world.move_object(cell(3, 3), cell(3, 4)),
        Err(ActionRejection::AlreadyUsed)
    );
    assert!(query::object_at(&world, cell(3, 3)).is_some());
}

#[test]
fn move_rejections_name_the_failed_precondition() {
    let world = world_with(&[(SOLDIER, RED, 2, 2), (SOLDIER, BLUE, 2, 3)]);

    assert_eq!(
        world.check_move(cell(0, 0), cell(0, 1)),
        Err(ActionRejection::MissingActor)
    );
    assert_eq!(
        world.check_move(cell(2, 2), cell(2, 3)),
        Err(ActionRejection::DestinationOccupied)
    );
    assert_eq!(
        world.check_move(cell(2, 2), cell(2, 0)),
        Err(ActionRejection::OutOfRange)
    );
    assert_eq!(world.check_move(cell(2, 2), cell(1, 1)), Ok(()));
}

#[test]
fn checks_are_free_of_side_effects() {
    let world = world_with(&[(SOLDIER, RED, 2, 2)]);
    let before = world.save().expect("saves");

    assert!(world.can_move(cell(2, 2), cell(2, 1)));
    assert!(world.can_move(cell(2, 2), cell(2, 1)));
    assert!(!world.can_fight(cell(2, 2), cell(2, 1)));

    assert_eq!(world.save().expect("saves"), before);
}

#[test]
fn scenario_from_move_to_conquest() {
    let mut world = world_with(&[(SOLDIER, RED, 2, 2), (SOLDIER, BLUE, 2, 3)]);

    let _ = world.start_round(RED, true).expect("red starts");
    assert_eq!(money(&world, RED), 11);
    assert!(world.do_action(&Action::Move {
        from: cell(2, 2),
        to: cell(2, 1),
    }));
    assert!(query::object_at(&world, cell(2, 2)).is_none());

    let _ = world.start_round(BLUE, true).expect("blue starts");
    assert_eq!(money(&world, BLUE), 26);
    assert_eq!(
        world.check_fight(cell(2, 3), cell(2, 1)),
        Err(ActionRejection::OutOfRange)
    );

    assert!(world.do_action(&Action::Move {
        from: cell(2, 3),
        to: cell(2, 2),
    }));
    let report = world.fight(cell(2, 2), cell(2, 1)).expect("fight applies");
    assert_eq!(report.damage, 3);
    assert_eq!(report.hp_delta, -3);
    assert_eq!(report.remaining_hp, 2);
    assert!(!report.destroyed);
    assert_eq!(
        world.fight(cell(2, 2), cell(2, 1)),
        Err(ActionRejection::AlreadyUsed)
    );

    let _ = world.start_round(BLUE, true).expect("blue again");
    assert_eq!(money(&world, BLUE), 27);
    let report = world.fight(cell(2, 2), cell(2, 1)).expect("second fight");
    assert!(report.destroyed);
    assert_eq!(report.bounty, 7);
    assert!(query::object_at(&world, cell(2, 1)).is_none());
    assert!(!world.is_player_still_alive(RED));
    assert!(world.is_player_still_alive(BLUE));

    let conquest = report.conquest.expect("red was conquered");
    assert_eq!(conquest.loser, RED);
    assert_eq!(conquest.conqueror, BLUE);
    assert_eq!(conquest.transferred, 11);
    assert_eq!(money(&world, RED), 0);
    assert_eq!(money(&world, BLUE), 27 + 7 + 11);
    assert_eq!(query::living_players(&world), vec![BLUE]);
}

#[test]
fn destroying_one_of_several_objects_pays_only_the_bounty() {
    let mut world = world_with(&[
        (ARTILLERY, BLUE, 0, 0),
        (SOLDIER, RED, 2, 0),
        (BASE, RED, 4, 4),
    ]);
    let _ = world.start_round(BLUE, true).expect("blue starts");
    let before_blue = money(&world, BLUE);
    let before_red = money(&world, RED);

    let report = world.fight(cell(0, 0), cell(2, 0)).expect("artillery fires");

    assert!(report.destroyed);
    assert!(report.conquest.is_none());
    assert_eq!(money(&world, BLUE), before_blue + 7);
    assert_eq!(money(&world, RED), before_red);
    assert!(world.is_player_still_alive(RED));
    assert!(query::object(&world, report.defender).is_none());
}

#[test]
fn fight_requires_hostile_target_and_active_player() {
    let mut world = world_with(&[(SOLDIER, RED, 1, 1), (SOLDIER, RED, 1, 2), (SOLDIER, BLUE, 2, 1)]);

    assert_eq!(
        world.check_fight(cell(1, 1), cell(2, 1)),
        Err(ActionRejection::NoActivePlayer)
    );
    let _ = world.start_round(RED, true).expect("red starts");
    assert_eq!(
        world.check_fight(cell(1, 1), cell(1, 2)),
        Err(ActionRejection::FriendlyTarget)
    );
    assert_eq!(
        world.check_fight(cell(1, 1), cell(3, 3)),
        Err(ActionRejection::MissingTarget)
    );
    assert!(world.can_fight(cell(1, 1), cell(2, 1)));
}

#[test]
fn produce_debits_cost_and_locks_new_object() {
    let mut world = world_with(&[(BASE, RED, 0, 0), (SOLDIER, BLUE, 4, 4)]);
    let _ = world.start_round(RED, true).expect("red starts");
    assert_eq!(money(&world, RED), 15);

    let report = world
        .produce(cell(0, 0), cell(1, 1), SOLDIER)
        .expect("production applies");

    assert_eq!(report.cost, 4);
    assert_eq!(report.owner, RED);
    assert_eq!(money(&world, RED), 11);
    let produced = query::object_at(&world, cell(1, 1)).expect("new soldier");
    assert_eq!(produced.owner(), RED);
    assert_eq!(produced.hit_points(), 5);
    assert!(ActionKind::ALL.iter().all(|kind| produced.was_used(*kind)));
    assert!(world.exhausted(cell(1, 1)).expect("occupied"));
    assert!(!world.can_move(cell(1, 1), cell(1, 2)));

    let base = query::object_at(&world, cell(0, 0)).expect("base");
    assert!(base.was_used(ActionKind::Produce));
    assert_eq!(
        world.check_produce(cell(0, 0), cell(1, 0), SOLDIER),
        Err(ActionRejection::AlreadyUsed)
    );

    let _ = world.start_round(RED, true).expect("next round");
    assert!(world.can_move(cell(1, 1), cell(1, 2)));
    assert!(!world.exhausted(cell(1, 1)).expect("occupied"));
}

#[test]
fn produce_rejections_cover_type_range_and_funds() {
    let mut world = world_with(&[(BASE, RED, 0, 0), (SOLDIER, RED, 4, 4)]);

    assert_eq!(
        world.check_produce(cell(0, 0), cell(1, 0), SOLDIER),
        Err(ActionRejection::NoActivePlayer)
    );
    let _ = world.start_round(RED, false).expect("red starts");
    assert_eq!(
        world.check_produce(cell(0, 0), cell(1, 0), ARTILLERY),
        Err(ActionRejection::NotProducible)
    );
    assert_eq!(
        world.check_produce(cell(0, 0), cell(2, 0), SOLDIER),
        Err(ActionRejection::OutOfRange)
    );
    assert_eq!(
        world.check_produce(cell(4, 4), cell(3, 3), SOLDIER),
        Err(ActionRejection::OutOfRange)
    );

    let mut poor = world_with(&[(BASE, RED, 0, 0)]);
    let mut saved = poor.save().expect("saves");
    saved.active_player = Some(RED);
    saved.players = vec![PlayerRecord { id: RED, money: 3 }];
    poor.load(&saved).expect("balance restored");
    assert_eq!(
        poor.check_produce(cell(0, 0), cell(1, 0), SOLDIER),
        Err(ActionRejection::InsufficientFunds)
    );
    assert!(!poor.do_action(&Action::Produce {
        from: cell(0, 0),
        to: cell(1, 0),
        kind: SOLDIER,
    }));
    assert_eq!(money(&poor, RED), 3);
    assert!(query::object_at(&poor, cell(1, 0)).is_none());
}

#[test]
fn ownership_rule_restricts_actors_to_active_player() {
    let rules = RuleConfig {
        require_active_owner: true,
        ..RuleConfig::default()
    };
    let mut world = world_with_rules(rules, &[(SOLDIER, RED, 1, 1), (SOLDIER, BLUE, 3, 3)]);
    let _ = world.start_round(RED, true).expect("red starts");

    assert_eq!(
        world.check_move(cell(3, 3), cell(3, 2)),
        Err(ActionRejection::NotActivePlayersObject)
    );
    assert!(world.can_move(cell(1, 1), cell(1, 0)));

    let mut lenient = world_with(&[(SOLDIER, RED, 1, 1), (SOLDIER, BLUE, 3, 3)]);
    let _ = lenient.start_round(RED, true).expect("red starts");
    assert!(lenient.can_move(cell(3, 3), cell(3, 2)));
}

#[test]
fn apply_reports_outcomes_and_rejections_as_events() {
    let mut world = world_with(&[(SOLDIER, RED, 2, 2), (SOLDIER, BLUE, 2, 3)]);
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::StartRound {
            player: RED,
            reenable_used_actions: true,
        },
        &mut events,
    );
    let attack = Action::Fight {
        from: cell(2, 2),
        to: cell(2, 3),
    };
    world::apply(&mut world, Command::Perform { action: attack }, &mut events);
    world::apply(&mut world, Command::Perform { action: attack }, &mut events);

    let red_soldier = query::object_at(&world, cell(2, 2)).expect("red").id();
    let blue_soldier = query::object_at(&world, cell(2, 3)).expect("blue").id();
    assert_eq!(
        events,
        vec![
            Event::RoundStarted {
                player: RED,
                income: 1,
            },
            Event::AttackResolved {
                attacker: red_soldier,
                defender: blue_soldier,
                damage: 3,
                remaining_hp: 2,
            },
            Event::ActionRejected {
                action: attack,
                reason: ActionRejection::AlreadyUsed,
            },
        ]
    );
}

#[test]
fn apply_emits_destruction_and_conquest() {
    let mut world = world_with(&[(ARTILLERY, RED, 0, 0), (SOLDIER, BLUE, 2, 2)]);
    let mut events = Vec::new();
    let _ = world.start_round(RED, true).expect("red starts");
    let defender = query::object_at(&world, cell(2, 2)).expect("blue").id();

    world::apply(
        &mut world,
        Command::Perform {
            action: Action::Fight {
                from: cell(0, 0),
                to: cell(2, 2),
            },
        },
        &mut events,
    );

    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        Event::ObjectDestroyed {
            object: defender,
            owner: BLUE,
            cell: cell(2, 2),
            bounty: 7,
        }
    );
    assert_eq!(
        events[2],
        Event::PlayerConquered {
            conqueror: RED,
            loser: BLUE,
            transferred: 25,
        }
    );
}
