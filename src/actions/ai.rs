//! Goal-seeking behaviors used as autonomous brains.
//!
//! Each behavior plans lazily: when its sub-path is exhausted it computes a
//! fresh set of goal cells, runs one multi-root shortest-path query, and
//! delegates to [`FollowPath`] until that path runs out. When no goal or no
//! path exists, the behavior degrades to an undirected [`WalkRandom`].

use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::world::World;

use crate::actions::follow::FollowPath;
use crate::actions::{WalkRandom, stored_pile_at};
use crate::ecs::components::{
    Gold, InStorage, IsActor, IsItem, Location, MapGrid, RoomGrid, RoomKind,
};
use crate::ecs::spawn::remove_from_play;
use crate::model::action::{Action, ActionResult};
use crate::model::tile::TileDb;
use crate::sim::combat::is_enemy;
use crate::sim::pathfind::{CostGrid, Pathfinder};
use crate::sim::travel::footprint;

/// Build a pathfinder over the actor's map, or `None` if the map is gone.
fn planner(world: &World, map: Entity) -> Option<Pathfinder> {
    let grid = world.get::<MapGrid>(map)?;
    let tiles = world.resource::<TileDb>();
    Some(Pathfinder::new(CostGrid::from_map(grid, tiles)))
}

/// Start following `path` (skipping the leading start cell) and store it as
/// the behavior's sub-action. Falls back to a random step when the path has
/// nowhere to go.
fn follow_or_wander(
    sub: &mut Option<FollowPath>,
    path: &[(i32, i32)],
    skip_last: bool,
    world: &mut World,
    actor: Entity,
) -> ActionResult {
    let end = if skip_last {
        path.len().saturating_sub(1)
    } else {
        path.len()
    };
    if end > 1 {
        let mut follow = FollowPath::new(path[1..end].iter().copied());
        let result = follow.perform(world, actor);
        *sub = Some(follow);
        return result;
    }
    WalkRandom.perform(world, actor)
}

// ---------------------------------------------------------------------------
// GatherTreasure
// ---------------------------------------------------------------------------

/// Haul loot: seek the nearest unclaimed gold pile; once carrying, seek the
/// nearest treasury cell not already holding a stored pile and deposit
/// there.
#[derive(Default)]
pub struct GatherTreasure {
    sub: Option<FollowPath>,
}

impl Action for GatherTreasure {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        if let Some(sub) = self.sub.as_mut()
            && !sub.is_exhausted()
        {
            return sub.perform(world, actor);
        }
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Not on any map.");
        };
        let Some(mut pf) = planner(world, pos.map) else {
            return ActionResult::impossible("Not on any map.");
        };

        let carrying = world.get::<Gold>(actor).map(|g| g.0).unwrap_or(0) > 0;
        if carrying {
            // Carry back: every treasury cell without a stored pile.
            if let Some(rooms) = world.get::<RoomGrid>(pos.map) {
                let grid = world
                    .get::<MapGrid>(pos.map)
                    .expect("map has rooms but no terrain");
                let mut cells = Vec::new();
                for y in 0..grid.height() {
                    for x in 0..grid.width() {
                        if rooms.room_at(x, y) == RoomKind::Treasury {
                            cells.push((x, y));
                        }
                    }
                }
                for (x, y) in cells {
                    if !stored_pile_at(world, Location { x, y, map: pos.map }) {
                        pf.add_root((x, y));
                    }
                }
            }
        } else {
            // Find loot: every loose gold pile on this map.
            let mut query = world
                .query_filtered::<&Location, (With<Gold>, With<IsItem>, Without<InStorage>)>();
            let goals: Vec<(i32, i32)> = query
                .iter(world)
                .filter(|loc| loc.map == pos.map)
                .map(|loc| (loc.x, loc.y))
                .collect();
            for goal in goals {
                pf.add_root(goal);
            }
        }

        let path = pf.path_from((pos.x, pos.y));
        follow_or_wander(&mut self.sub, &path, false, world, actor)
    }
}

// ---------------------------------------------------------------------------
// SeekEnemies
// ---------------------------------------------------------------------------

/// Seek out and engage any enemy-faction actor.
#[derive(Default)]
pub struct SeekEnemies {
    sub: Option<FollowPath>,
}

impl Action for SeekEnemies {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        if let Some(sub) = self.sub.as_mut()
            && !sub.is_exhausted()
        {
            return sub.perform(world, actor);
        }
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Not on any map.");
        };

        let mut query = world.query_filtered::<(Entity, &Location), With<IsActor>>();
        let candidates: Vec<(Entity, Location)> = query
            .iter(world)
            .map(|(entity, &loc)| (entity, loc))
            .collect();
        let targets: Vec<Location> = candidates
            .into_iter()
            .filter(|&(entity, loc)| {
                entity != actor && loc.map == pos.map && is_enemy(world, actor, entity)
            })
            .map(|(_, loc)| loc)
            .collect();
        if targets.is_empty() {
            return WalkRandom.perform(world, actor);
        }

        let Some(mut pf) = planner(world, pos.map) else {
            return ActionResult::impossible("Not on any map.");
        };
        for target in targets {
            pf.add_root((target.x, target.y));
        }
        let path = pf.path_from((pos.x, pos.y));
        follow_or_wander(&mut self.sub, &path, false, world, actor)
    }
}

// ---------------------------------------------------------------------------
// RallyTo
// ---------------------------------------------------------------------------

/// Move adjacent to a designated target entity. Unlike the other behaviors
/// it keeps no sub-path between turns: the target moves, so the plan is
/// recomputed on every call.
pub struct RallyTo {
    pub target: Entity,
}

impl RallyTo {
    pub fn new(target: Entity) -> Self {
        Self { target }
    }
}

impl Action for RallyTo {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Not on any map.");
        };
        let (Some(&target_pos), Some(mut pf)) = (
            world.get::<Location>(self.target),
            planner(world, pos.map),
        ) else {
            return WalkRandom.perform(world, actor);
        };
        if target_pos.map != pos.map {
            return WalkRandom.perform(world, actor);
        }
        for cell in footprint(world, self.target, target_pos) {
            pf.add_root((cell.x, cell.y));
        }
        // Stop one short of the target's own cell; the single-use sub-path
        // is discarded after its first step.
        let path = pf.path_from((pos.x, pos.y));
        follow_or_wander(&mut None, &path, true, world, actor)
    }
}

// ---------------------------------------------------------------------------
// ExitMap
// ---------------------------------------------------------------------------

/// Flee to the nearest passable map-edge cell and leave play.
#[derive(Default)]
pub struct ExitMap {
    sub: Option<FollowPath>,
}

impl Action for ExitMap {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Not on any map.");
        };
        let Some(grid) = world.get::<MapGrid>(pos.map) else {
            return ActionResult::impossible("Not on any map.");
        };
        let (width, height) = (grid.width(), grid.height());
        if pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1 {
            remove_from_play(world, actor);
            return ActionResult::success();
        }

        if let Some(sub) = self.sub.as_mut()
            && !sub.is_exhausted()
        {
            return sub.perform(world, actor);
        }

        let Some(mut pf) = planner(world, pos.map) else {
            return ActionResult::impossible("Not on any map.");
        };
        {
            let grid = world
                .get::<MapGrid>(pos.map)
                .expect("map checked above");
            let tiles = world.resource::<TileDb>();
            for x in 0..width {
                for y in [0, height - 1] {
                    if tiles.get(grid.tile_at(x, y)).move_cost != 0 {
                        pf.add_root((x, y));
                    }
                }
            }
            for y in 1..height - 1 {
                for x in [0, width - 1] {
                    if tiles.get(grid.tile_at(x, y)).move_cost != 0 {
                        pf.add_root((x, y));
                    }
                }
            }
        }
        let path = pf.path_from((pos.x, pos.y));
        follow_or_wander(&mut self.sub, &path, false, world, actor)
    }
}
