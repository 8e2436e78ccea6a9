//! Stateful path-following.

use std::collections::VecDeque;

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::actions::Bump;
use crate::ecs::components::Location;
use crate::model::action::{Action, ActionResult};

/// Follow a stored cell sequence one bump at a time.
///
/// Each call attempts one step toward the path's head cell, dequeuing it only
/// when the actor ends up exactly there. Any `Impossible` step clears the
/// remaining path, terminating the behavior; the holder is expected to check
/// [`is_exhausted`](Self::is_exhausted) and replan.
pub struct FollowPath {
    path: VecDeque<(i32, i32)>,
}

impl FollowPath {
    pub fn new(cells: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self {
            path: cells.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.path.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.path.len()
    }
}

impl Action for FollowPath {
    fn perform(&mut self, world: &mut World, actor: Entity) -> ActionResult {
        let Some(&(goal_x, goal_y)) = self.path.front() else {
            return ActionResult::impossible("End of path reached.");
        };
        let Some(&pos) = world.get::<Location>(actor) else {
            return ActionResult::impossible("Nowhere to move from.");
        };
        let result = Bump {
            dir: (goal_x - pos.x, goal_y - pos.y),
            allow_dig: true,
        }
        .perform(world, actor);
        match &result {
            ActionResult::Success { .. } => {
                // An attack also reports success without moving; only dequeue
                // on exact arrival.
                if world
                    .get::<Location>(actor)
                    .is_some_and(|now| now.x == goal_x && now.y == goal_y)
                {
                    self.path.pop_front();
                }
            }
            ActionResult::Impossible { .. } => self.path.clear(),
        }
        result
    }
}
