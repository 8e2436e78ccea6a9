//! Components attached to simulation entities.

use std::ops::Add;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use serde::{Deserialize, Serialize};

use crate::model::action::Action;
use crate::model::tile::TileIndex;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell on a specific map. Adding a direction vector yields a new location
/// on the same map.
///
/// Never write this component directly on a positioned entity; go through
/// `sim::travel::set_location` / `clear_location` so the spatial index stays
/// consistent.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub map: Entity,
}

impl Add<(i32, i32)> for Location {
    type Output = Location;

    fn add(self, (dx, dy): (i32, i32)) -> Location {
        Location {
            x: self.x + dx,
            y: self.y + dy,
            map: self.map,
        }
    }
}

/// Cell offset of a facet relative to its owner's location.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

/// Per-map terrain layer: one [`TileIndex`] per cell, row-major.
#[derive(Component, Debug, Clone)]
pub struct MapGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileIndex>,
}

impl MapGrid {
    pub fn filled(width: i32, height: i32, fill: TileIndex) -> Self {
        assert!(width > 0 && height > 0, "map must have positive dimensions");
        Self {
            width,
            height,
            tiles: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        (y * self.width + x) as usize
    }

    pub fn tile_at(&self, x: i32, y: i32) -> TileIndex {
        self.tiles[self.idx(x, y)]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileIndex) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }
}

/// Kind of room a cell has been designated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    #[default]
    Unassigned,
    Treasury,
}

/// Per-map room designation layer, parallel to [`MapGrid`].
#[derive(Component, Debug, Clone)]
pub struct RoomGrid {
    width: i32,
    rooms: Vec<RoomKind>,
}

impl RoomGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            rooms: vec![RoomKind::default(); (width * height) as usize],
        }
    }

    pub fn room_at(&self, x: i32, y: i32) -> RoomKind {
        self.rooms[(y * self.width + x) as usize]
    }

    pub fn set_room(&mut self, x: i32, y: i32, kind: RoomKind) {
        self.rooms[(y * self.width + x) as usize] = kind;
    }
}

// ---------------------------------------------------------------------------
// Actor state
// ---------------------------------------------------------------------------

/// Entity glyph for the presentation shell.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphic {
    pub ch: char,
    pub fg: (u8, u8, u8),
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hp(pub i32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxHp(pub i32);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strength(pub i32);

/// Gold carried by an actor, or the value of a loot pile.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gold(pub i64);

/// Which side an actor fights for. Entities without a faction are nobody's
/// enemy.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Keepers,
    Raiders,
}

/// The autonomous decision provider: the stored behavior is itself the
/// [`Action`] executed on the entity's turn.
#[derive(Component)]
pub struct Brain(pub Box<dyn Action>);

impl Brain {
    pub fn new(action: impl Action) -> Self {
        Self(Box::new(action))
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// A living, blocking actor. Removed on death.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IsActor;

/// A pickable item (loot).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct IsItem;

/// An item that has been deposited in storage.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InStorage;

/// The single human-controlled actor. The dispatcher hands control back to
/// the caller whenever this entity's turn comes up.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerControlled;
