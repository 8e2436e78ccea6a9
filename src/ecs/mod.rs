pub mod components;
pub mod relationships;
pub mod resources;
pub mod spawn;

pub use components::{
    Brain, Faction, Gold, Graphic, Hp, InStorage, IsActor, IsItem, Location, MapGrid, MaxHp,
    Offset, PlayerControlled, RoomGrid, RoomKind, Strength,
};
pub use relationships::{FacetOf, Facets};
pub use resources::{MessageLog, SimRng, SpatialIndex, TurnClock, TurnQueue};
pub use spawn::{
    new_world, remove_from_play, spawn_actor, spawn_facet, spawn_loot, spawn_map,
    spawn_stored_loot,
};
