//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::{spawn_requested_enemies, ReactivateEnemyEvent, SpawnEnemyEvent};
use crate::combat::GameplaySet;

/// Enemy plugin - handles enemy definitions, spawning, perception and attacks.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_event::<SpawnEnemyEvent>()
            .add_event::<ReactivateEnemyEvent>()
            .add_systems(Startup, load_enemy_definitions)
            // Decisions run every frame
            .add_systems(
                Update,
                (
                    (
                        spawn_requested_enemies,
                        ai::validate_enemies,
                        ai::reactivate_enemies,
                    )
                        .chain()
                        .in_set(GameplaySet::Sense),
                    (
                        ai::handle_attack_animation_events,
                        ai::run_perception,
                        ai::check_attack_range,
                    )
                        .chain()
                        .in_set(GameplaySet::Decide),
                    ai::on_enemy_death.in_set(GameplaySet::React),
                ),
            )
            // Facing and attack sweeps run on the physics step
            .add_systems(
                FixedUpdate,
                ai::resolve_attack_sweeps.in_set(GameplaySet::Strike),
            );
    }
}
