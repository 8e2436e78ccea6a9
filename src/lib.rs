//! Turn-resolution core for a tile-based digging/raiding simulation.
//!
//! The crate decides, tick by tick, which actor acts next, what an attempted
//! action does to the shared grid, and how control alternates between the one
//! human-controlled actor and any number of autonomous ones. Rendering,
//! input mapping, persistence, and content generation live in the consuming
//! shell.
//!
//! The usual driving loop, given a world built with [`ecs::new_world`]:
//!
//! ```no_run
//! # use bevy_ecs::world::World;
//! # use delve_sim::actions::Bump;
//! # use delve_sim::turn::{do_action, next_ticket};
//! # let mut world: World = delve_sim::ecs::new_world(42);
//! loop {
//!     let ticket = next_ticket(&mut world);
//!     // ... await input for ticket.entity, the player-controlled actor ...
//!     let mut action = Bump { dir: (1, 0), allow_dig: false };
//!     do_action(&mut world, ticket.entity, &mut action);
//!     // do_action returns once every autonomous turn in between has
//!     // resolved and it is the player's turn again.
//! }
//! ```

pub mod actions;
pub mod ecs;
pub mod model;
pub mod sim;
pub mod turn;

pub use ecs::{
    Brain, Faction, Gold, Graphic, Hp, Location, MapGrid, MessageLog, Offset, RoomGrid, RoomKind,
    SimRng, new_world, spawn_actor, spawn_facet, spawn_loot, spawn_map,
};
pub use model::{Action, ActionResult, BASE_ACTION_COST, Tile, TileDb, TileIndex};
pub use turn::{Ticket, do_action, next_ticket, schedule, simulate, unschedule};
