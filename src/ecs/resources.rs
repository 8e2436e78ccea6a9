//! Singleton world state.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;

use crate::ecs::components::Location;
use crate::turn::scheduler::Ticket;

// ---------------------------------------------------------------------------
// Time and turn order
// ---------------------------------------------------------------------------

/// The logical clock. Advanced only by `next_ticket`, never backwards.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TurnClock {
    pub current_tick: u64,
}

/// Global min-heap of scheduling tickets ordered by `(time, uid)`.
///
/// Entries are never eagerly removed when an entity reschedules; the old
/// entry goes stale (it no longer matches the entity's `Ticket` component)
/// and is discarded lazily when observed at the head.
#[derive(Resource, Debug, Default)]
pub struct TurnQueue {
    pub(crate) heap: BinaryHeap<Reverse<Ticket>>,
    pub(crate) next_uid: u64,
}

impl TurnQueue {
    /// Queued entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// Deterministic RNG for the simulation. Seeded once at world construction
/// so runs replay identically given identical scheduling history.
#[derive(Resource)]
pub struct SimRng {
    pub rng: SmallRng,
    pub seed: u64,
}

// ---------------------------------------------------------------------------
// Presentation sink
// ---------------------------------------------------------------------------

/// Accumulates player-facing messages (failed-action feedback) between
/// drains by the presentation shell.
#[derive(Resource, Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

// ---------------------------------------------------------------------------
// Spatial index
// ---------------------------------------------------------------------------

/// Side table answering "who stands on cell (x, y) of map M" in O(1)
/// amortized. Kept consistent with `Location` components by
/// `sim::travel::set_location` / `clear_location`.
#[derive(Resource, Debug, Default)]
pub struct SpatialIndex {
    cells: HashMap<Location, Vec<Entity>>,
}

impl SpatialIndex {
    pub(crate) fn insert(&mut self, pos: Location, entity: Entity) {
        let cell = self.cells.entry(pos).or_default();
        if !cell.contains(&entity) {
            cell.push(entity);
        }
    }

    pub(crate) fn remove(&mut self, pos: Location, entity: Entity) {
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.retain(|&e| e != entity);
            if cell.is_empty() {
                self.cells.remove(&pos);
            }
        }
    }

    /// Every entity standing on `pos`, facets included.
    pub fn at(&self, pos: Location) -> &[Entity] {
        self.cells.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }
}
