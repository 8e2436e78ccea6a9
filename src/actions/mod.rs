//! The action catalog: primitive actions plus the goal-seeking behaviors
//! used as autonomous brains.

pub mod ai;
pub mod follow;

pub use ai::{ExitMap, GatherTreasure, RallyTo, SeekEnemies};
pub use follow::FollowPath;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use rand::Rng;

use crate::ecs::components::{Gold, InStorage, IsItem, Location, RoomGrid, RoomKind};
use crate::ecs::resources::{SimRng, SpatialIndex};
use crate::ecs::spawn::{remove_from_play, spawn_stored_loot};
use crate::model::action::{Action, ActionResult};
use crate::sim::combat::{attack, is_enemy};
use crate::sim::travel::{actor_at, check_move, footprint, force_move, in_bounds};

/// The eight cell-adjacent directions.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Do nothing for one turn.
pub struct Idle;

impl Action for Idle {
    fn perform(&mut self, _world: &mut World, _actor: Entity) -> ActionResult {
        ActionResult::success()
    }
}

/// Act toward an adjacent cell: attack the enemy standing there, or move
/// (digging through diggable terrain when allowed).
///
/// A successful move also picks up any loose loot under the actor's
/// footprint and deposits carried gold when standing on a free treasury
/// cell.
pub struct Bump {
    pub dir: (i32, i32),
    pub allow_dig: bool,
}

impl Action for Bump {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Nowhere to move from.");
        };
        let dest = pos + self.dir;
        if !in_bounds(world, dest) {
            return ActionResult::impossible("Out of bounds.");
        }

        for cell in footprint(world, actor, dest) {
            for target in actor_at(world, cell) {
                if target == actor {
                    continue;
                }
                if is_enemy(world, actor, target) {
                    return attack(world, actor, target);
                }
            }
        }

        let Some(cost) = check_move(world, actor, dest, self.allow_dig) else {
            return ActionResult::impossible("Blocked.");
        };
        force_move(world, actor, dest);
        handle_loot(world, actor);
        ActionResult::Success { time_cost: cost }
    }
}

/// Walk one step in a uniformly random direction, never digging.
pub struct WalkRandom;

impl Action for WalkRandom {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let dir = {
            let mut rng = world.resource_mut::<SimRng>();
            let pick = rng.rng.random_range(0..DIRECTIONS.len());
            DIRECTIONS[pick]
        };
        Bump {
            dir,
            allow_dig: false,
        }
        .perform(world, actor)
    }
}

/// Designate every cell of the actor's footprint as `kind` in the room
/// layer.
pub struct StampRoom {
    pub kind: RoomKind,
}

impl Action for StampRoom {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Nowhere to stamp.");
        };
        for cell in footprint(world, actor, pos) {
            if !in_bounds(world, cell) {
                continue;
            }
            if let Some(mut rooms) = world.get_mut::<RoomGrid>(cell.map) {
                rooms.set_room(cell.x, cell.y, self.kind);
            }
        }
        ActionResult::success()
    }
}

/// Pick up loose loot under the actor and deposit carried gold on a free
/// treasury cell.
fn handle_loot(world: &mut World, actor: Entity) {
    let Some(&pos) = world.get::<Location>(actor) else {
        return;
    };
    for cell in footprint(world, actor, pos) {
        let here: Vec<Entity> = world.resource::<SpatialIndex>().at(cell).to_vec();
        for item in here {
            if item == actor
                || world.get::<IsItem>(item).is_none()
                || world.get::<InStorage>(item).is_some()
            {
                continue;
            }
            let Some(amount) = world.get::<Gold>(item).map(|g| g.0) else {
                continue;
            };
            let carried = world.get::<Gold>(actor).map(|g| g.0).unwrap_or(0);
            world.entity_mut(actor).insert(Gold(carried + amount));
            remove_from_play(world, item);
        }

        let carried = world.get::<Gold>(actor).map(|g| g.0).unwrap_or(0);
        if carried == 0 {
            continue;
        }
        let in_treasury = world
            .get::<RoomGrid>(cell.map)
            .is_some_and(|rooms| rooms.room_at(cell.x, cell.y) == RoomKind::Treasury);
        if !in_treasury || stored_pile_at(world, cell) {
            continue;
        }
        world.entity_mut(actor).insert(Gold(0));
        spawn_stored_loot(world, cell, carried);
    }
}

/// True if a stored gold pile already sits on `cell`.
pub(crate) fn stored_pile_at(world: &World, cell: Location) -> bool {
    world.resource::<SpatialIndex>().at(cell).iter().any(|&e| {
        world.get::<InStorage>(e).is_some() && world.get::<Gold>(e).is_some()
    })
}
