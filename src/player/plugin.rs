//! Player plugin - input, movement and health feedback.

use bevy::prelude::*;

use super::components::*;
use super::input::{read_player_input, InputBindings};
use super::movement::player_movement;
use super::shooter::{player_shooting, PlayerShooter};
use crate::combat::GameplaySet;
use crate::core::PresentationCue;

/// Player plugin - handles player input, movement, and HUD health.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<PlayerConfig>()
            .init_resource::<InputBindings>()
            .add_systems(
                Update,
                (
                    activate_new_players.in_set(GameplaySet::Sense),
                    read_player_input.in_set(GameplaySet::Decide),
                    player_shooting.in_set(GameplaySet::Strike),
                    player_movement.in_set(GameplaySet::Move),
                ),
            );
    }
}

/// Freshly spawned players start at full health and show it on the HUD,
/// along with their ammo.
fn activate_new_players(
    mut cues: EventWriter<PresentationCue>,
    mut players: Query<(&mut PlayerHealth, Option<&PlayerShooter>), Added<PlayerHealth>>,
) {
    for (mut health, shooter) in players.iter_mut() {
        health.reactivate(&mut cues);
        if let Some(shooter) = shooter {
            shooter.publish_ammo(&mut cues);
        }
    }
}
