//! Goal-seeking behavior scenarios driven through `simulate`.

mod common;

use bevy_ecs::query::{With, Without};

use delve_sim::actions::{
    ExitMap, FollowPath, GatherTreasure, Idle, RallyTo, SeekEnemies, StampRoom,
};
use delve_sim::ecs::{InStorage, IsActor, IsItem, spawn_loot};
use delve_sim::model::{Action, ActionResult};
use delve_sim::sim::set_location;
use delve_sim::{Gold, Location, RoomGrid, RoomKind, Ticket, schedule, simulate};

use common::{build_world, loc, set_tile, spawn_keeper, spawn_player, spawn_raider, tile_name_at};

fn idle() -> Box<dyn Action> {
    Box::new(Idle)
}

#[test]
fn follow_path_steps_dequeue_only_on_arrival() {
    let (mut world, map) = build_world(8, 8);
    let walker = spawn_player(&mut world, loc(map, 1, 1));
    let mut follow = FollowPath::new([(2, 1), (3, 1)]);

    assert!(follow.perform(&mut world, walker).is_success());
    assert_eq!(world.get::<Location>(walker), Some(&loc(map, 2, 1)));
    assert_eq!(follow.remaining(), 1);

    assert!(follow.perform(&mut world, walker).is_success());
    assert!(follow.is_exhausted());
    assert_eq!(
        follow.perform(&mut world, walker),
        ActionResult::impossible("End of path reached."),
    );
}

#[test]
fn follow_path_clears_itself_on_a_blocked_step() {
    let (mut world, map) = build_world(8, 8);
    set_tile(&mut world, map, 2, 1, "bedrock");
    let walker = spawn_player(&mut world, loc(map, 1, 1));
    let mut follow = FollowPath::new([(2, 1), (3, 1)]);

    let result = follow.perform(&mut world, walker);
    assert_eq!(result, ActionResult::impossible("Blocked."));
    assert!(follow.is_exhausted());
}

#[test]
fn stamping_designates_the_footprint_as_a_room() {
    let (mut world, map) = build_world(8, 8);
    let digger = spawn_player(&mut world, loc(map, 2, 2));

    let result = StampRoom {
        kind: RoomKind::Treasury,
    }
    .perform(&mut world, digger);

    assert!(result.is_success());
    let rooms = world.get::<RoomGrid>(map).expect("map has rooms");
    assert_eq!(rooms.room_at(2, 2), RoomKind::Treasury);
    assert_eq!(rooms.room_at(2, 3), RoomKind::Unassigned);
}

#[test]
fn gatherer_hauls_loot_into_the_treasury() {
    let (mut world, map) = build_world(8, 8);
    world
        .get_mut::<RoomGrid>(map)
        .expect("map has rooms")
        .set_room(1, 1, RoomKind::Treasury);
    spawn_loot(&mut world, loc(map, 5, 5), 50);
    let worker = spawn_keeper(&mut world, loc(map, 3, 3), Box::new(GatherTreasure::default()));
    let player = spawn_player(&mut world, loc(map, 0, 7));

    schedule(&mut world, player, 5_000);
    simulate(&mut world);

    // The loose pile is gone, a stored pile sits in the treasury, and the
    // worker's pockets are empty.
    let loose = world
        .query_filtered::<&Location, (With<IsItem>, Without<InStorage>)>()
        .iter(&world)
        .count();
    assert_eq!(loose, 0);
    let stored: Vec<(Location, Gold)> = world
        .query_filtered::<(&Location, &Gold), With<InStorage>>()
        .iter(&world)
        .map(|(&l, &g)| (l, g))
        .collect();
    assert_eq!(stored, vec![(loc(map, 1, 1), Gold(50))]);
    assert_eq!(world.get::<Gold>(worker), Some(&Gold(0)));
}

#[test]
fn seeker_hunts_down_the_enemy() {
    let (mut world, map) = build_world(8, 8);
    let raider = spawn_raider(&mut world, loc(map, 1, 1), Box::new(SeekEnemies::default()));
    let victim = spawn_keeper(&mut world, loc(map, 5, 1), idle());
    world.entity_mut(victim).insert(delve_sim::Hp(3));
    let player = spawn_player(&mut world, loc(map, 7, 7));

    schedule(&mut world, player, 3_000);
    simulate(&mut world);

    assert!(world.get::<IsActor>(victim).is_none(), "the keeper fell");
    assert!(world.get::<IsActor>(raider).is_some());
    assert!(world.get::<Ticket>(raider).is_some());
}

#[test]
fn seeker_without_targets_wanders_instead_of_failing() {
    let (mut world, map) = build_world(8, 8);
    let raider = spawn_raider(&mut world, loc(map, 4, 4), Box::new(SeekEnemies::default()));
    // A factionless actor is nobody's enemy, so the map holds no targets.
    spawn_player(&mut world, loc(map, 0, 0));

    let result = SeekEnemies::default().perform(&mut world, raider);

    // Every adjacent cell is open floor, so the random step lands somewhere.
    assert!(result.is_success(), "expected a wandering step, got {result:?}");
    let pos = world.get::<Location>(raider).expect("raider still placed");
    assert_ne!((pos.x, pos.y), (4, 4));
    assert!((pos.x - 4).abs() <= 1 && (pos.y - 4).abs() <= 1);
}

#[test]
fn unreachable_goals_degrade_to_wandering() {
    // Scenario D: a bedrock wall seals the worker away from the only loot.
    let (mut world, map) = build_world(8, 8);
    for y in 0..8 {
        set_tile(&mut world, map, 4, y, "bedrock");
    }
    spawn_loot(&mut world, loc(map, 6, 3), 25);
    let worker = spawn_keeper(&mut world, loc(map, 1, 3), Box::new(GatherTreasure::default()));
    let player = spawn_player(&mut world, loc(map, 0, 7));

    schedule(&mut world, player, 2_000);
    simulate(&mut world);

    // The worker kept taking (possibly failing) random steps, never wedged
    // the loop, and never dug through the seal.
    assert!(world.get::<Ticket>(worker).is_some());
    let pos = world.get::<Location>(worker).expect("worker still placed");
    assert!(pos.x < 4, "the seal held");
    for y in 0..8 {
        assert_eq!(tile_name_at(&world, map, 4, y), "bedrock");
    }
    assert_eq!(
        world
            .query_filtered::<&Location, (With<IsItem>, Without<InStorage>)>()
            .iter(&world)
            .count(),
        1,
        "the loot stayed put",
    );
}

#[test]
fn exiting_raider_leaves_play_for_good() {
    let (mut world, map) = build_world(6, 6);
    let raider = spawn_raider(&mut world, loc(map, 3, 3), Box::new(ExitMap::default()));
    let player = spawn_player(&mut world, loc(map, 0, 0));

    schedule(&mut world, player, 2_000);
    simulate(&mut world);

    assert!(!world.entities().contains(raider));
    let actors = world
        .query_filtered::<&Location, With<IsActor>>()
        .iter(&world)
        .count();
    assert_eq!(actors, 1, "only the player remains");
}

#[test]
fn rally_closes_the_distance_to_its_target() {
    let (mut world, map) = build_world(8, 8);
    let player = spawn_player(&mut world, loc(map, 5, 5));
    let escort = spawn_keeper(&mut world, loc(map, 1, 1), Box::new(RallyTo::new(player)));

    schedule(&mut world, player, 2_000);
    simulate(&mut world);

    let pos = world.get::<Location>(escort).expect("escort still placed");
    let distance = (pos.x - 5).abs().max((pos.y - 5).abs());
    assert!(distance <= 2, "escort ended at distance {distance}");
}

#[test]
fn rally_replans_when_the_target_moves() {
    let (mut world, map) = build_world(8, 8);
    let target = spawn_player(&mut world, loc(map, 5, 1));
    let escort = spawn_keeper(&mut world, loc(map, 1, 1), idle());
    let mut rally = RallyTo::new(target);

    // Two steps along the straight line toward (5, 1), stopping adjacent.
    assert!(rally.perform(&mut world, escort).is_success());
    assert!(rally.perform(&mut world, escort).is_success());
    assert_eq!(world.get::<Location>(escort), Some(&loc(map, 3, 1)));

    // The target relocates; the very next turn heads for the new spot
    // rather than finishing any remembered path.
    set_location(&mut world, target, loc(map, 3, 5));
    assert!(rally.perform(&mut world, escort).is_success());
    assert_eq!(world.get::<Location>(escort), Some(&loc(map, 3, 2)));
}
