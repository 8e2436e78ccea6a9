//! Tile types and the tile database.

use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

/// Index into the tile database. Maps store one of these per cell.
pub type TileIndex = u8;

fn default_glyph() -> char {
    '?'
}

fn default_fg() -> (u8, u8, u8) {
    (255, 255, 255)
}

/// Data for one tile type.
///
/// `move_cost == 0` means impassable. A tile with `move_cost == 0` and
/// `dig_cost > 0` can be excavated by spending `dig_cost`, converting the
/// cell to `excavated_tile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub name: String,
    #[serde(default = "default_glyph")]
    pub glyph: char,
    #[serde(default = "default_fg")]
    pub fg: (u8, u8, u8),
    #[serde(default)]
    pub transparent: bool,
    #[serde(default)]
    pub move_cost: u16,
    #[serde(default)]
    pub dig_cost: u16,
    #[serde(default)]
    pub excavated_tile: String,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            name: String::new(),
            glyph: default_glyph(),
            fg: default_fg(),
            transparent: false,
            move_cost: 0,
            dig_cost: 0,
            excavated_tile: String::new(),
        }
    }
}

/// Database of tile types, indexed by [`TileIndex`].
///
/// Index 0 is the reserved void tile (impassable, not diggable). Assignment
/// validates content: `move_cost` takes strict priority over `dig_cost`, so a
/// tile authored with both nonzero is rejected outright rather than guessed
/// at.
#[derive(Resource, Debug, Clone)]
pub struct TileDb {
    tiles: Vec<Tile>,
    names: HashMap<String, TileIndex>,
}

impl Default for TileDb {
    fn default() -> Self {
        Self {
            tiles: vec![Tile {
                name: "void".into(),
                glyph: ' ',
                ..Tile::default()
            }],
            names: HashMap::new(),
        }
    }
}

impl TileDb {
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut db = Self::default();
        for tile in tiles {
            db.assign(tile);
        }
        db
    }

    /// Assign a new tile type and return its index.
    ///
    /// Panics on content-authoring errors: a duplicate name, a tile with both
    /// `move_cost` and `dig_cost` nonzero, a diggable tile with no
    /// `excavated_tile`, or a full database.
    pub fn assign(&mut self, tile: Tile) -> TileIndex {
        assert!(
            !self.names.contains_key(&tile.name),
            "duplicate tile name {:?}",
            tile.name,
        );
        assert!(
            tile.move_cost == 0 || tile.dig_cost == 0,
            "tile {:?} has both move_cost and dig_cost; walkable tiles are never dug",
            tile.name,
        );
        assert!(
            tile.dig_cost == 0 || !tile.excavated_tile.is_empty(),
            "diggable tile {:?} has no excavated_tile",
            tile.name,
        );
        assert!(
            self.tiles.len() <= TileIndex::MAX as usize,
            "tile database is full",
        );
        let index = self.tiles.len() as TileIndex;
        self.names.insert(tile.name.clone(), index);
        self.tiles.push(tile);
        index
    }

    pub fn get(&self, index: TileIndex) -> &Tile {
        &self.tiles[usize::from(index)]
    }

    pub fn index_of(&self, name: &str) -> Option<TileIndex> {
        self.names.get(name).copied()
    }
}
