//! The action contract.
//!
//! An action is invoked for one actor on its turn and reports either
//! `Success` with the time cost to charge the actor, or `Impossible` with a
//! human-readable reason. `Impossible` is a normal domain outcome, not an
//! error; scheduling policy for it lives in the dispatcher.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

/// Time cost of an ordinary turn. Also the reschedule penalty applied to an
/// autonomous actor whose action came back `Impossible`.
pub const BASE_ACTION_COST: u64 = 100;

/// Outcome of performing an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The action happened; reschedule the actor `time_cost` ticks later.
    Success { time_cost: u64 },
    /// The action could not happen. The actor's turn state is unchanged.
    Impossible { message: String },
}

impl ActionResult {
    /// `Success` at the base action cost.
    pub fn success() -> Self {
        Self::Success {
            time_cost: BASE_ACTION_COST,
        }
    }

    pub fn impossible(message: impl Into<String>) -> Self {
        Self::Impossible {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Something an actor can do on its turn.
///
/// Implementors may hold mutable state between calls (a remaining path, a
/// cached sub-action); stateless actions take `&mut self` all the same.
pub trait Action: Send + Sync + 'static {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult;
}
