#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use delve_sim::ecs::{new_world, spawn_actor, spawn_map};
use delve_sim::model::Action;
use delve_sim::{Faction, Graphic, Location, MapGrid, Tile, TileDb, TileIndex};

/// Tile set used across the scenario tests: open floor, diggable walls,
/// undiggable bedrock, and slow mud.
const TILE_SET: &str = r##"[
    {"name": "floor", "glyph": ".", "transparent": true, "move_cost": 100},
    {"name": "mud", "glyph": ",", "transparent": true, "move_cost": 200},
    {"name": "wall", "glyph": "#", "dig_cost": 200, "excavated_tile": "floor"},
    {"name": "bedrock", "glyph": "%"}
]"##;

pub fn tile_db() -> TileDb {
    let tiles: Vec<Tile> = serde_json::from_str(TILE_SET).expect("tile fixture parses");
    TileDb::new(tiles)
}

/// A fresh world with the fixture tile set and one floor-filled map.
pub fn build_world(width: i32, height: i32) -> (World, Entity) {
    let mut world = new_world(7);
    world.insert_resource(tile_db());
    let floor = tile_index(&world, "floor");
    let map = spawn_map(&mut world, width, height, floor);
    (world, map)
}

pub fn loc(map: Entity, x: i32, y: i32) -> Location {
    Location { x, y, map }
}

pub fn tile_index(world: &World, name: &str) -> TileIndex {
    world
        .resource::<TileDb>()
        .index_of(name)
        .unwrap_or_else(|| panic!("fixture tile {name:?}"))
}

pub fn set_tile(world: &mut World, map: Entity, x: i32, y: i32, name: &str) {
    let tile = tile_index(world, name);
    let mut grid = world.get_mut::<MapGrid>(map).expect("map has terrain");
    grid.set_tile(x, y, tile);
}

pub fn tile_name_at(world: &World, map: Entity, x: i32, y: i32) -> String {
    let grid = world.get::<MapGrid>(map).expect("map has terrain");
    world
        .resource::<TileDb>()
        .get(grid.tile_at(x, y))
        .name
        .clone()
}

/// The human-controlled actor. Factionless so AI scenarios can choose their
/// own targets.
pub fn spawn_player(world: &mut World, pos: Location) -> Entity {
    spawn_actor(
        world,
        pos,
        Graphic {
            ch: '@',
            fg: (255, 255, 255),
        },
        10,
        2,
        None,
        None,
    )
}

pub fn spawn_keeper(world: &mut World, pos: Location, brain: Box<dyn Action>) -> Entity {
    spawn_actor(
        world,
        pos,
        Graphic {
            ch: 'k',
            fg: (64, 255, 64),
        },
        10,
        2,
        Some(Faction::Keepers),
        Some(brain),
    )
}

pub fn spawn_raider(world: &mut World, pos: Location, brain: Box<dyn Action>) -> Entity {
    spawn_actor(
        world,
        pos,
        Graphic {
            ch: 'r',
            fg: (255, 64, 64),
        },
        10,
        5,
        Some(Faction::Raiders),
        Some(brain),
    )
}
