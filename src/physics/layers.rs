//! Collision groups for the target layers.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::TargetLayer;

/// Static level geometry.
pub const WORLD_GROUP: Group = Group::GROUP_1;
pub const PLAYER_GROUP: Group = Group::GROUP_2;
pub const ENEMY_GROUP: Group = Group::GROUP_3;

/// Which target layer an actor's collider belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorLayer(pub TargetLayer);

pub fn layer_group(layer: TargetLayer) -> Group {
    match layer {
        TargetLayer::Player => PLAYER_GROUP,
        TargetLayer::Enemy => ENEMY_GROUP,
    }
}

/// Groups for an actor collider: member of its layer, collides with everything.
pub fn actor_collision_groups(layer: TargetLayer) -> CollisionGroups {
    CollisionGroups::new(layer_group(layer), Group::ALL)
}

/// Groups for a query that should only see colliders on `layer`.
pub fn layer_query_groups(layer: TargetLayer) -> CollisionGroups {
    CollisionGroups::new(Group::ALL, layer_group(layer))
}

/// Give freshly spawned actors the collision groups of their layer.
pub fn assign_collision_groups(
    mut commands: Commands,
    actors: Query<(Entity, &ActorLayer), Added<ActorLayer>>,
) {
    for (entity, layer) in actors.iter() {
        commands
            .entity(entity)
            .insert(actor_collision_groups(layer.0));
    }
}
