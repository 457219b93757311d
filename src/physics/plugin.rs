//! Physics plugin - keeps actor colliders on their target layer.

use bevy::prelude::*;

use super::layers::assign_collision_groups;

/// Expects `RapierPhysicsPlugin` to be added by the application.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, assign_collision_groups);
    }
}
