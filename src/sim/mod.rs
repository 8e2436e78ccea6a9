pub mod combat;
pub mod pathfind;
pub mod travel;

pub use combat::{attack, die, is_enemy};
pub use pathfind::{CostGrid, Pathfinder};
pub use travel::{
    actor_at, check_move, clear_location, footprint, force_move, in_bounds, set_location,
};
