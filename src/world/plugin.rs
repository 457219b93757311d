//! World plugin - arena setup and the follow camera.

use bevy::prelude::*;

use crate::combat::GameplaySet;
use crate::core::{GameState, GameplayConfig};
use crate::enemies::SpawnEnemyEvent;
use crate::navigation::WalkableArea;
use crate::player::{spawn_player, Player, PlayerConfig};

use super::builder::{build_arena, FollowCamera};
use super::data::{load_arena_definition, ArenaDefinition};

/// Builds the playable arena when the game starts.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaDefinition>()
            .add_systems(Startup, load_arena_definition)
            .add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(Update, follow_player.after(GameplaySet::Move));
    }
}

/// Build the arena, spawn the player and request the placed enemies.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    arena: Res<ArenaDefinition>,
    player_config: Res<PlayerConfig>,
    gameplay: Res<GameplayConfig>,
    mut spawns: EventWriter<SpawnEnemyEvent>,
) {
    info!("Building arena: {}", arena.name);

    let start = build_arena(&mut commands, &mut meshes, &mut materials, &arena);
    commands.insert_resource(WalkableArea(arena.walkable_area()));
    spawn_player(&mut commands, start, &player_config, &gameplay);

    for placement in &arena.enemies {
        spawns.send(SpawnEnemyEvent {
            enemy_type: placement.enemy_type.clone(),
            position: Vec3::new(placement.position.0, 0.0, placement.position.1),
            setup: None,
        });
    }
}

fn follow_player(
    time: Res<Time>,
    player: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok(player) = player.get_single() else {
        return;
    };

    for (mut transform, follow) in cameras.iter_mut() {
        let goal = player.translation + follow.offset;
        let blend = 1.0 - (-follow.smoothing * time.delta_secs()).exp();
        transform.translation = transform.translation.lerp(goal, blend);
        transform.look_at(player.translation + Vec3::Y, Vec3::Y);
    }
}
