pub mod action;
pub mod tile;

pub use action::{Action, ActionResult, BASE_ACTION_COST};
pub use tile::{Tile, TileDb, TileIndex};
