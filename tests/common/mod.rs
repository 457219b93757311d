//! Shared headless harness for the integration tests.
//!
//! No renderer and no audio device. `headless_app` has no physics context,
//! so systems that need rapier return early; `physics_app` adds rapier and
//! steps time in fixed 60 Hz frames.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use std::time::Duration;
use tps_prototype::core::{GameState, PresentationCue};
use tps_prototype::enemies::{EnemyDefinition, EnemyRegistry};
use tps_prototype::GameplayPlugins;

/// Every presentation cue seen so far, in order.
#[derive(Resource, Default)]
pub struct CueLog(pub Vec<PresentationCue>);

fn record_cues(mut cues: EventReader<PresentationCue>, mut log: ResMut<CueLog>) {
    log.0.extend(cues.read().cloned());
}

pub const ZOMBIE: &str = r#"(
    name: "Zombie",
    max_health: 100.0,
    damage: 30.0,
    run_speed: 10.0,
    patrol_speed: 3.0,
    attack_radius: 2.0,
    field_of_view: 50.0,
    view_distance: 10.0,
    score_value: 100,
    eye: Some((0.0, 1.4, 0.0)),
    attack_root: Some((0.0, 1.0, -0.8)),
    animation: (attack_duration: 1.0, attack_hit_frame: 0.4),
)"#;

pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .add_plugins(GameplayPlugins)
        .init_resource::<CueLog>()
        .add_systems(Last, record_cues);

    use_test_zombie(&mut app);
    app
}

/// Frame length used by `physics_app`.
pub const FRAME: Duration = Duration::from_nanos(16_666_667);

/// Headless gameplay with a rapier world. Meshes and scenes are registered
/// because rapier's collider systems look them up.
pub fn physics_app() -> App {
    let mut app = headless_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins((
            bevy::transform::TransformPlugin,
            bevy::hierarchy::HierarchyPlugin,
            AssetPlugin::default(),
            bevy::scene::ScenePlugin,
        ))
        .init_asset::<Mesh>()
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    app
}

/// Register the test zombie again, replacing the one read from disk at startup
/// so no model is loaded.
pub fn use_test_zombie(app: &mut App) {
    let zombie = EnemyDefinition::from_ron("zombie.ron", ZOMBIE).expect("valid zombie definition");
    app.world_mut()
        .resource_mut::<EnemyRegistry>()
        .definitions
        .insert("zombie".to_string(), zombie);
}

/// Tick until the loading state has handed over to gameplay.
pub fn boot(app: &mut App) {
    for _ in 0..5 {
        app.update();
        if state(app) == GameState::InGame {
            return;
        }
    }
    panic!("game never left {:?}", state(app));
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
