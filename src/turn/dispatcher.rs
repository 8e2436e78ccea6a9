//! The action dispatcher: applies one actor's action, settles its scheduling
//! consequences, and auto-simulates autonomous turns until the
//! player-controlled actor is next.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{Brain, PlayerControlled};
use crate::ecs::resources::MessageLog;
use crate::model::action::{Action, ActionResult, BASE_ACTION_COST};
use crate::turn::scheduler::{Ticket, next_ticket, schedule, unschedule};

/// Apply `action` for `actor` and settle the result.
///
/// The caller must only invoke this for the entity the scheduler currently
/// says is active; anything else is a turn-order contract violation and
/// panics.
///
/// On `Success` the actor is rescheduled `time_cost` ticks ahead, unless the
/// action removed it from play. On `Impossible` the policy splits by actor
/// kind: the player's ticket is left untouched (failed input costs no time)
/// and the message is surfaced through [`MessageLog`]; an autonomous actor is
/// rescheduled after a [`BASE_ACTION_COST`] penalty so a stuck brain cannot
/// spin the scheduler.
///
/// When the acting entity is the player, every following autonomous turn is
/// resolved via [`simulate`] before this returns, so control always comes
/// back to the caller on the player's turn.
pub fn do_action(world: &mut World, actor: Entity, action: &mut dyn Action) {
    let ticket = next_ticket(world);
    assert_eq!(
        ticket.entity, actor,
        "do_action: it is not this entity's turn",
    );
    match action.perform(world, actor) {
        ActionResult::Success { time_cost } => {
            if world.get::<Ticket>(actor).is_some() {
                schedule(world, actor, time_cost);
            } else {
                // The action removed the actor from play; retract the turn
                // that was just taken.
                unschedule(world, ticket);
            }
        }
        ActionResult::Impossible { message } => {
            if world.get::<PlayerControlled>(actor).is_some() {
                tracing::debug!(%message, "player action impossible");
                world.resource_mut::<MessageLog>().push(message);
            } else if world.get::<Ticket>(actor).is_some() {
                tracing::debug!(?actor, %message, "autonomous action impossible");
                schedule(world, actor, BASE_ACTION_COST);
            } else {
                unschedule(world, ticket);
            }
        }
    }
    if world.get::<PlayerControlled>(actor).is_some() {
        simulate(world);
    }
}

/// Resolve autonomous turns in scheduler order until the player-controlled
/// actor is next.
///
/// Each autonomous actor's [`Brain`] is taken off the entity while its action
/// runs (so the action can mutate the world freely) and restored afterwards
/// if the actor is still in play.
pub fn simulate(world: &mut World) {
    loop {
        let ticket = next_ticket(world);
        let actor = ticket.entity;
        if world.get::<PlayerControlled>(actor).is_some() {
            return;
        }
        let Some(mut brain) = world.entity_mut(actor).take::<Brain>() else {
            tracing::warn!(?actor, "autonomous entity has no brain, skipping its turn");
            schedule(world, actor, BASE_ACTION_COST);
            continue;
        };
        do_action(world, actor, brain.0.as_mut());
        if world.entities().contains(actor) && world.get::<Ticket>(actor).is_some() {
            world.entity_mut(actor).insert(brain);
        }
    }
}
