//! Entity relationships.

use std::ops::Deref;

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;

// ---------------------------------------------------------------------------
// FacetOf — facet cell → multi-tile owner
// ---------------------------------------------------------------------------

/// Marks a facet entity as one cell of a multi-tile owner's footprint.
/// Facets are never scheduled or targeted themselves; logic that finds a
/// facet resolves it back to the owner through this relationship.
#[derive(Component, Clone, Debug)]
#[relationship(relationship_target = Facets)]
pub struct FacetOf(pub Entity);

/// Reverse index on the owner: every facet entity belonging to it.
#[derive(Component, Default, Debug)]
#[relationship_target(relationship = FacetOf)]
pub struct Facets(Vec<Entity>);

impl Deref for Facets {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
