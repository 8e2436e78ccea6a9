//! The turn scheduler: a global priority queue of scheduling tickets plus
//! the logical clock.
//!
//! A [`Ticket`] lives in two places at once: as a component on its entity and
//! as an entry in the [`TurnQueue`] heap. Rescheduling overwrites the
//! component and pushes a fresh entry without touching the old one; a queued
//! entry that no longer matches its entity's component is stale and is
//! discarded the moment [`next_ticket`] observes it at the head. Lazy
//! invalidation keeps rescheduling O(log n) with no heap deletion.

use std::cmp::{Ordering, Reverse};

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;

use crate::ecs::resources::{TurnClock, TurnQueue};

/// A scheduled activation: `entity` becomes eligible to act at tick `time`.
///
/// `uid` is assigned monotonically at schedule time and breaks ties between
/// equal times in FIFO order; `start_time` records when the ticket was
/// created and plays no part in ordering.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub time: u64,
    pub uid: u64,
    pub entity: Entity,
    pub start_time: u64,
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.time, self.uid).cmp(&(other.time, other.uid))
    }
}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Schedule `entity` to act `interval` ticks from now and return its ticket.
///
/// Interval 0 is legal and means "eligible on the very next turn"; freshly
/// spawned actors are scheduled this way. Any previous ticket for the entity
/// is superseded, its queue entry left to go stale.
pub fn schedule(world: &mut World, entity: Entity, interval: u64) -> Ticket {
    let now = world
        .get_resource_or_insert_with(TurnClock::default)
        .current_tick;
    let mut queue = world.get_resource_or_insert_with(TurnQueue::default);
    let ticket = Ticket {
        time: now + interval,
        uid: queue.next_uid,
        entity,
        start_time: now,
    };
    queue.next_uid += 1;
    queue.heap.push(Reverse(ticket));
    world.entity_mut(entity).insert(ticket);
    ticket
}

/// Retract `ticket`, which must be the current queue head.
///
/// Unscheduling is only ever applied to the ticket just returned by
/// [`next_ticket`]; calling this with anything else is a turn-order contract
/// violation and panics.
pub fn unschedule(world: &mut World, ticket: Ticket) {
    let mut queue = world.resource_mut::<TurnQueue>();
    let head = queue.heap.peek().map(|entry| entry.0);
    assert_eq!(
        head,
        Some(ticket),
        "unschedule: ticket is not the queue head",
    );
    queue.heap.pop();
}

/// Return the next valid ticket, advancing the clock to its time.
///
/// Stale heads — entries whose entity has been rescheduled or removed — are
/// popped and dropped until a live one surfaces. The surviving head is
/// returned without being removed, so calling this again before any
/// scheduling change returns the identical ticket.
///
/// Panics if the queue has no live entries; an empty schedule means the
/// caller has lost every scheduled entity, which the core cannot recover
/// from.
pub fn next_ticket(world: &mut World) -> Ticket {
    loop {
        let head = world
            .resource::<TurnQueue>()
            .heap
            .peek()
            .expect("turn queue is empty")
            .0;
        if world.get::<Ticket>(head.entity).copied() == Some(head) {
            world.resource_mut::<TurnClock>().current_tick = head.time;
            return head;
        }
        world.resource_mut::<TurnQueue>().heap.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_entities(n: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let entities = (0..n).map(|_| world.spawn_empty().id()).collect();
        (world, entities)
    }

    #[test]
    fn tickets_pop_in_time_order() {
        let (mut world, e) = world_with_entities(3);
        schedule(&mut world, e[0], 30);
        schedule(&mut world, e[1], 10);
        schedule(&mut world, e[2], 20);

        let first = next_ticket(&mut world);
        assert_eq!(first.entity, e[1]);
        assert_eq!(first.time, 10);
        unschedule(&mut world, first);

        let second = next_ticket(&mut world);
        assert_eq!(second.entity, e[2]);
        unschedule(&mut world, second);

        assert_eq!(next_ticket(&mut world).entity, e[0]);
    }

    #[test]
    fn equal_times_resolve_fifo_by_uid() {
        let (mut world, e) = world_with_entities(3);
        for &entity in &e {
            schedule(&mut world, entity, 5);
        }
        for &expected in &e {
            let ticket = next_ticket(&mut world);
            assert_eq!(ticket.entity, expected);
            unschedule(&mut world, ticket);
        }
    }

    #[test]
    fn clock_defaults_to_zero_and_never_goes_backwards() {
        let (mut world, e) = world_with_entities(2);
        let ticket = schedule(&mut world, e[0], 7);
        assert_eq!(ticket.start_time, 0);
        assert_eq!(ticket.time, 7);

        let mut last = 0;
        schedule(&mut world, e[1], 3);
        for _ in 0..4 {
            let ticket = next_ticket(&mut world);
            let now = world.resource::<TurnClock>().current_tick;
            assert!(now >= last);
            assert_eq!(now, ticket.time);
            last = now;
            schedule(&mut world, ticket.entity, 10);
        }
    }

    #[test]
    fn next_ticket_is_idempotent_without_scheduling_changes() {
        let (mut world, e) = world_with_entities(2);
        schedule(&mut world, e[0], 1);
        schedule(&mut world, e[1], 2);
        let first = next_ticket(&mut world);
        let second = next_ticket(&mut world);
        assert_eq!(first, second);
    }

    #[test]
    fn superseded_ticket_is_never_returned() {
        let (mut world, e) = world_with_entities(2);
        schedule(&mut world, e[0], 1);
        schedule(&mut world, e[1], 5);
        // e[0] reschedules before acting; its queued ticket at time 1 is now
        // stale and must be skipped.
        schedule(&mut world, e[0], 10);

        let ticket = next_ticket(&mut world);
        assert_eq!(ticket.entity, e[1]);
        assert_eq!(ticket.time, 5);
    }

    #[test]
    fn despawned_entity_ticket_is_discarded() {
        let (mut world, e) = world_with_entities(2);
        schedule(&mut world, e[0], 1);
        schedule(&mut world, e[1], 2);
        world.despawn(e[0]);
        assert_eq!(next_ticket(&mut world).entity, e[1]);
    }

    #[test]
    #[should_panic(expected = "not the queue head")]
    fn unscheduling_a_non_head_ticket_panics() {
        let (mut world, e) = world_with_entities(2);
        let early = schedule(&mut world, e[0], 1);
        let late = schedule(&mut world, e[1], 2);
        assert_eq!(next_ticket(&mut world), early);
        unschedule(&mut world, late);
    }
}
