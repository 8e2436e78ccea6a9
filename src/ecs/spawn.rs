//! World construction and entity spawning.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::ecs::components::{
    Brain, Faction, Gold, Graphic, Hp, InStorage, IsActor, IsItem, Location, MapGrid, MaxHp,
    Offset, PlayerControlled, RoomGrid, Strength,
};
use crate::ecs::relationships::{FacetOf, Facets};
use crate::ecs::resources::{MessageLog, SimRng, SpatialIndex, TurnClock, TurnQueue};
use crate::model::action::Action;
use crate::model::tile::{TileDb, TileIndex};
use crate::sim::travel::{clear_location, set_location};
use crate::turn::scheduler::schedule;

/// Build an empty simulation world with all core resources installed.
///
/// The tile database starts with only the void tile; install a real
/// [`TileDb`] before spawning maps.
pub fn new_world(seed: u64) -> World {
    let mut world = World::new();
    world.insert_resource(TurnClock::default());
    world.insert_resource(TurnQueue::default());
    world.insert_resource(SpatialIndex::default());
    world.insert_resource(MessageLog::default());
    world.insert_resource(TileDb::default());
    world.insert_resource(SimRng {
        rng: SmallRng::seed_from_u64(seed),
        seed,
    });
    world
}

/// Spawn a map entity with its terrain and room layers, filled with `fill`.
pub fn spawn_map(world: &mut World, width: i32, height: i32, fill: TileIndex) -> Entity {
    world
        .spawn((
            MapGrid::filled(width, height, fill),
            RoomGrid::new(width, height),
        ))
        .id()
}

/// Spawn an actor at `pos` and schedule it for an immediate turn.
///
/// An actor spawned without a brain is the human-controlled actor.
pub fn spawn_actor(
    world: &mut World,
    pos: Location,
    graphic: Graphic,
    max_hp: i32,
    strength: i32,
    faction: Option<Faction>,
    brain: Option<Box<dyn Action>>,
) -> Entity {
    let actor = world
        .spawn((graphic, IsActor, Hp(max_hp), MaxHp(max_hp), Strength(strength)))
        .id();
    if let Some(faction) = faction {
        world.entity_mut(actor).insert(faction);
    }
    match brain {
        Some(action) => {
            world.entity_mut(actor).insert(Brain(action));
        }
        None => {
            world.entity_mut(actor).insert(PlayerControlled);
        }
    }
    set_location(world, actor, pos);
    schedule(world, actor, 0);
    actor
}

/// Spawn one facet cell of a multi-tile `owner`. The facet's location is
/// derived from the owner's location plus `offset` and tracks it on every
/// owner move.
pub fn spawn_facet(world: &mut World, owner: Entity, offset: Offset, graphic: Graphic) -> Entity {
    let facet = world.spawn((graphic, offset, FacetOf(owner))).id();
    if let Some(&pos) = world.get::<Location>(owner) {
        set_location(world, facet, pos + (offset.x, offset.y));
    }
    facet
}

/// Spawn a loose gold pile at `pos`.
pub fn spawn_loot(world: &mut World, pos: Location, amount: i64) -> Entity {
    let item = world
        .spawn((
            Graphic {
                ch: '$',
                fg: (255, 215, 0),
            },
            IsItem,
            Gold(amount),
        ))
        .id();
    set_location(world, item, pos);
    item
}

/// Spawn a gold pile already deposited in storage at `pos`.
pub fn spawn_stored_loot(world: &mut World, pos: Location, amount: i64) -> Entity {
    let item = spawn_loot(world, pos, amount);
    world.entity_mut(item).insert(InStorage);
    item
}

/// Remove an entity (and its facets) from play entirely: spatial index
/// entries cleared, entities despawned. Any queued ticket for it goes stale
/// and is discarded lazily by the scheduler.
pub fn remove_from_play(world: &mut World, entity: Entity) {
    let facets: Vec<Entity> = world
        .get::<Facets>(entity)
        .map(|f| f.to_vec())
        .unwrap_or_default();
    for facet in facets {
        clear_location(world, facet);
        world.despawn(facet);
    }
    clear_location(world, entity);
    world.despawn(entity);
}
