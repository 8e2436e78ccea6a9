//! Minimal combat resolution.

use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::components::{Brain, Faction, Graphic, Hp, IsActor, Strength};
use crate::model::action::ActionResult;
use crate::turn::scheduler::Ticket;

/// Two actors are enemies when both carry a faction and the factions differ.
/// A factionless entity is nobody's enemy.
pub fn is_enemy(world: &World, a: Entity, b: Entity) -> bool {
    match (world.get::<Faction>(a), world.get::<Faction>(b)) {
        (Some(fa), Some(fb)) => fa != fb,
        _ => false,
    }
}

/// Resolve an attack. Always reports success at the base cost — striking a
/// target that cannot take damage is a no-op, not a failure.
pub fn attack(world: &mut World, actor: Entity, target: Entity) -> ActionResult {
    let strength = world.get::<Strength>(actor).map(|s| s.0).unwrap_or(0);
    tracing::debug!(?actor, ?target, strength, "attack");
    let mut killed = false;
    if let Some(mut hp) = world.get_mut::<Hp>(target) {
        hp.0 -= strength;
        killed = hp.0 <= 0;
    }
    if killed {
        die(world, target);
    }
    ActionResult::success()
}

/// Kill an entity: it stops being a living actor, keeps its cell as a
/// corpse, and permanently exits the scheduler (its queued ticket goes
/// stale).
pub fn die(world: &mut World, entity: Entity) {
    tracing::debug!(?entity, "dies");
    let mut e = world.entity_mut(entity);
    e.remove::<(IsActor, Brain, Ticket)>();
    e.insert(Graphic {
        ch: '%',
        fg: (191, 0, 0),
    });
}
