//! Movement and collision resolution.
//!
//! All `Location` writes go through [`set_location`] / [`clear_location`] so
//! the [`SpatialIndex`] stays consistent with the components it mirrors.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{IsActor, Location, MapGrid, Offset};
use crate::ecs::relationships::{FacetOf, Facets};
use crate::ecs::resources::SpatialIndex;
use crate::model::tile::TileDb;

/// Move an entity's `Location`, keeping the spatial index in step.
pub fn set_location(world: &mut World, entity: Entity, dest: Location) {
    let old = world.get::<Location>(entity).copied();
    let mut index = world.resource_mut::<SpatialIndex>();
    if let Some(old) = old {
        index.remove(old, entity);
    }
    index.insert(dest, entity);
    world.entity_mut(entity).insert(dest);
}

/// Remove an entity's `Location` and its spatial index entry.
pub fn clear_location(world: &mut World, entity: Entity) {
    if let Some(old) = world.get::<Location>(entity).copied() {
        world.resource_mut::<SpatialIndex>().remove(old, entity);
        world.entity_mut(entity).remove::<Location>();
    }
}

/// True if `pos` lies inside its own map.
pub fn in_bounds(world: &World, pos: Location) -> bool {
    world
        .get::<MapGrid>(pos.map)
        .is_some_and(|grid| grid.in_bounds(pos.x, pos.y))
}

/// Every cell the entity occupies when standing at `at`: its own cell plus
/// one cell per facet, offset from `at`.
pub fn footprint(world: &World, entity: Entity, at: Location) -> Vec<Location> {
    let mut cells = vec![at];
    if let Some(facets) = world.get::<Facets>(entity) {
        for &facet in facets.iter() {
            if let Some(offset) = world.get::<Offset>(facet) {
                cells.push(at + (offset.x, offset.y));
            }
        }
    }
    cells
}

/// Resolve an entity standing on a cell to the blocking actor it represents:
/// a facet resolves to its owner; non-actors resolve to nothing.
fn blocking_owner(world: &World, entity: Entity) -> Option<Entity> {
    let owner = world.get::<FacetOf>(entity).map(|f| f.0).unwrap_or(entity);
    world.get::<IsActor>(owner).map(|_| owner)
}

/// Every blocking actor with a presence on `pos`, facets resolved to their
/// owners.
pub fn actor_at(world: &World, pos: Location) -> Vec<Entity> {
    let mut found = Vec::new();
    for &entity in world.resource::<SpatialIndex>().at(pos) {
        if let Some(owner) = blocking_owner(world, entity)
            && !found.contains(&owner)
        {
            found.push(owner);
        }
    }
    found
}

/// Return the time cost for the entity to move to `dest`, or `None` if the
/// move is blocked.
///
/// Every footprint cell must be in bounds, passable (or diggable when
/// `allow_dig` is set), and free of other blocking actors; the mover's own
/// cells never block it. The reported cost is the maximum per-cell cost — a
/// multi-tile entity moves no faster than its slowest-occupied tile.
pub fn check_move(
    world: &World,
    entity: Entity,
    dest: Location,
    allow_dig: bool,
) -> Option<u64> {
    let grid = world.get::<MapGrid>(dest.map)?;
    let tiles = world.resource::<TileDb>();
    let index = world.resource::<SpatialIndex>();
    let mut cost = 0u64;
    for cell in footprint(world, entity, dest) {
        if !grid.in_bounds(cell.x, cell.y) {
            return None;
        }
        let tile = tiles.get(grid.tile_at(cell.x, cell.y));
        let mut step = u64::from(tile.move_cost);
        if step == 0 && allow_dig {
            step = u64::from(tile.dig_cost);
        }
        if step == 0 {
            return None;
        }
        for &occupant in index.at(cell) {
            if let Some(owner) = blocking_owner(world, occupant)
                && owner != entity
            {
                return None;
            }
        }
        cost = cost.max(step);
    }
    Some(cost)
}

/// Excavate `dest` if its tile is diggable, converting it in place.
fn touch_tile(world: &mut World, dest: Location) {
    let Some(grid) = world.get::<MapGrid>(dest.map) else {
        return;
    };
    if !grid.in_bounds(dest.x, dest.y) {
        return;
    }
    let current = grid.tile_at(dest.x, dest.y);
    let replacement = {
        let tiles = world.resource::<TileDb>();
        let tile = tiles.get(current);
        if tile.dig_cost == 0 {
            return;
        }
        tiles
            .index_of(&tile.excavated_tile)
            .unwrap_or_else(|| panic!("unknown excavated tile {:?}", tile.excavated_tile))
    };
    if let Some(mut grid) = world.get_mut::<MapGrid>(dest.map) {
        grid.set_tile(dest.x, dest.y, replacement);
    }
}

/// Unconditionally relocate the entity to `dest`.
///
/// Facet locations are recomputed from their offsets, and every newly
/// entered diggable cell — owner and facets alike — is excavated as a side
/// effect of traversal.
pub fn force_move(world: &mut World, entity: Entity, dest: Location) {
    touch_tile(world, dest);
    set_location(world, entity, dest);
    let facets: Vec<Entity> = world
        .get::<Facets>(entity)
        .map(|f| f.to_vec())
        .unwrap_or_default();
    for facet in facets {
        if let Some(offset) = world.get::<Offset>(facet).copied() {
            let facet_dest = dest + (offset.x, offset.y);
            touch_tile(world, facet_dest);
            set_location(world, facet, facet_dest);
        }
    }
}
